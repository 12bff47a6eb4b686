//! Error types.

use std::fmt;

/// A broken structural invariant, as reported by [`Llrb::validate`].
///
/// [`Llrb::validate`]: crate::Llrb::validate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// The root link is red.
    RedRoot,
    /// A node has a red right child.
    RightLeaningRed,
    /// A red node has a red left child.
    ConsecutiveReds,
    /// Two sibling subtrees have different numbers of black links.
    UnbalancedBlacks { left: usize, right: usize },
    /// A child is on the wrong side of its parent under the comparator.
    OutOfOrder,
    /// The live count disagrees with the number of reachable nodes.
    CountMismatch { count: usize, reachable: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RedRoot => write!(f, "root link is red"),
            Violation::RightLeaningRed => write!(f, "red link leans right"),
            Violation::ConsecutiveReds => write!(f, "two red links in a row"),
            Violation::UnbalancedBlacks { left, right } => {
                write!(f, "unbalanced black height (left: {}, right: {})", left, right)
            }
            Violation::OutOfOrder => write!(f, "keys out of order"),
            Violation::CountMismatch { count, reachable } => {
                write!(f, "count is {} but {} nodes are reachable", count, reachable)
            }
        }
    }
}

/// Error type for tree operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Strict insert of a key that is already present.
    DuplicateKey,
    /// Direct lookup of a key that is not present.
    KeyNotFound,
    /// The tree could not be built from the supplied settings.
    InvalidConfiguration(&'static str),
    /// The tree no longer satisfies its balance or order invariants.
    Corrupted(Violation),
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Corrupted(v)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already present"),
            Error::KeyNotFound => write!(f, "key not found"),
            Error::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Corrupted(v) => write!(f, "corrupted tree: {}", v),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;
