//! Read-only descents: exact lookup and neighbor queries.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::compare::Comparator;
use crate::node::Node;

/// The closest entries on either side of a probe key.
///
/// Each side is either present or absent. Absence means there is no entry in
/// that direction, which is distinct from an entry whose key or value happens
/// to be a default (`0`, `""`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighbors<T> {
    /// The greatest entry ordered before (or, for `nearest`, at) the probe.
    pub lower: Option<T>,
    /// The least entry ordered after (or, for `nearest`, at) the probe.
    pub upper: Option<T>,
}

impl<T> Neighbors<T> {
    /// `true` when neither side is present, e.g. for an empty tree.
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    pub fn map<U, F>(self, mut f: F) -> Neighbors<U>
    where
        F: FnMut(T) -> U,
    {
        Neighbors {
            lower: self.lower.map(&mut f),
            upper: self.upper.map(&mut f),
        }
    }

    pub fn into_tuple(self) -> (Option<T>, Option<T>) {
        (self.lower, self.upper)
    }
}

pub(crate) fn find<'a, K, V, Q, C>(
    root: Option<&'a Node<K, V>>,
    key: &Q,
    cmp: &C,
) -> Option<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    let mut link = root;
    while let Some(node) = link {
        link = match cmp.compare(key, node.key.borrow()) {
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

pub(crate) fn find_mut<'a, K, V, Q, C>(
    root: Option<&'a mut Node<K, V>>,
    key: &Q,
    cmp: &C,
) -> Option<&'a mut Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    let mut link = root;
    while let Some(node) = link {
        link = match cmp.compare(key, node.key.borrow()) {
            Ordering::Less => node.left.as_deref_mut(),
            Ordering::Greater => node.right.as_deref_mut(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

/// Strict in-order predecessor and successor of `key`, whether or not `key`
/// itself is present.
pub(crate) fn siblings<'a, K, V, Q, C>(
    root: Option<&'a Node<K, V>>,
    key: &Q,
    cmp: &C,
) -> Neighbors<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    neighbors(root, key, cmp, false)
}

/// Like [`siblings`], but a present `key` is its own neighbor on both sides.
pub(crate) fn nearest<'a, K, V, Q, C>(
    root: Option<&'a Node<K, V>>,
    key: &Q,
    cmp: &C,
) -> Neighbors<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    neighbors(root, key, cmp, true)
}

// One root-to-leaf walk. The last node where the search turned right is the
// best predecessor seen so far, the last where it turned left the best
// successor. On an exact hit the extremes of the node's subtrees are tighter
// than any ancestor, since every ancestor lies outside that subtree's range.
fn neighbors<'a, K, V, Q, C>(
    root: Option<&'a Node<K, V>>,
    key: &Q,
    cmp: &C,
    inclusive: bool,
) -> Neighbors<&'a Node<K, V>>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    let mut out = Neighbors {
        lower: None,
        upper: None,
    };
    let mut link = root;
    while let Some(node) = link {
        match cmp.compare(key, node.key.borrow()) {
            Ordering::Less => {
                out.upper = Some(node);
                link = node.left.as_deref();
            }
            Ordering::Greater => {
                out.lower = Some(node);
                link = node.right.as_deref();
            }
            Ordering::Equal if inclusive => {
                return Neighbors {
                    lower: Some(node),
                    upper: Some(node),
                };
            }
            Ordering::Equal => {
                if let Some(left) = node.left.as_deref() {
                    out.lower = Some(left.max());
                }
                if let Some(right) = node.right.as_deref() {
                    out.upper = Some(right.min());
                }
                break;
            }
        }
    }
    out
}
