//! # llrb-rs
//!
//! An ordered map and set backed by a left-leaning red-black tree (LLRB).
//!
//! Based on "Left-leaning Red-Black Trees" (Sedgewick, 2008). Red links only
//! lean left, which keeps insertion and deletion down to a handful of local
//! rotations and color flips applied on the way back up a recursive descent.
//!
//! ## Example
//!
//! ```rust
//! use llrb_rs::{Direction, Llrb};
//!
//! let mut tree: Llrb<u32, &str> = Llrb::new();
//! tree.insert(2, "two").unwrap();
//! tree.insert(5, "five").unwrap();
//! tree.insert(8, "eight").unwrap();
//!
//! assert_eq!(tree.get(&5), Some(&"five"));
//! assert!(tree.insert(5, "again").is_err());
//!
//! let n = tree.nearest(&6);
//! assert_eq!(n.lower, Some((&5, &"five")));
//! assert_eq!(n.upper, Some((&8, &"eight")));
//!
//! let desc: Vec<u32> = tree.traverse(Direction::Backward).map(|(k, _)| *k).collect();
//! assert_eq!(desc, vec![8, 5, 2]);
//! ```

#![deny(unsafe_code)]

mod balance;
mod builder;
mod compare;
mod error;
mod iter;
mod navigate;
mod node;
mod set;
mod tree;

pub use builder::LlrbBuilder;
pub use compare::{Comparator, OrdComparator};
pub use error::{Error, Result, Violation};
pub use iter::{Direction, Iter};
pub use navigate::Neighbors;
pub use set::{LlrbSet, SetIter};
pub use tree::{Llrb, Stats};


#[cfg(test)]
mod proptests;
