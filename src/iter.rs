//! Lazy in-order traversal.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::Bound;

use crate::compare::Comparator;
use crate::node::Node;

/// Traversal order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending key order.
    #[default]
    Forward,
    /// Descending key order.
    Backward,
}

/// An in-order walk over a tree, optionally clipped to a key range.
///
/// The walk keeps an explicit stack of the nodes whose near subtree has been
/// entered but which have not been yielded yet. Subtrees that lie entirely
/// before the range are never pushed, and the walk ends at the first key past
/// the far bound.
pub struct Iter<'a, K, V, C, Q: ?Sized = K> {
    stack: Vec<&'a Node<K, V>>,
    direction: Direction,
    lower: Bound<&'a Q>,
    upper: Bound<&'a Q>,
    cmp: &'a C,
}

impl<'a, K, V, C, Q> Iter<'a, K, V, C, Q>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    pub(crate) fn new(
        root: Option<&'a Node<K, V>>,
        cmp: &'a C,
        direction: Direction,
        lower: Bound<&'a Q>,
        upper: Bound<&'a Q>,
    ) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            direction,
            lower,
            upper,
            cmp,
        };
        iter.descend(root);
        iter
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn below_lower(&self, key: &Q) -> bool {
        match self.lower {
            Bound::Included(b) => self.cmp.compare(key, b) == Ordering::Less,
            Bound::Excluded(b) => self.cmp.compare(key, b) != Ordering::Greater,
            Bound::Unbounded => false,
        }
    }

    fn above_upper(&self, key: &Q) -> bool {
        match self.upper {
            Bound::Included(b) => self.cmp.compare(key, b) == Ordering::Greater,
            Bound::Excluded(b) => self.cmp.compare(key, b) != Ordering::Less,
            Bound::Unbounded => false,
        }
    }

    /// The key comes before the first key the walk may yield.
    fn before_start(&self, key: &Q) -> bool {
        match self.direction {
            Direction::Forward => self.below_lower(key),
            Direction::Backward => self.above_upper(key),
        }
    }

    /// The key comes after the last key the walk may yield.
    fn past_end(&self, key: &Q) -> bool {
        match self.direction {
            Direction::Forward => self.above_upper(key),
            Direction::Backward => self.below_lower(key),
        }
    }

    fn near(&self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        match self.direction {
            Direction::Forward => node.left.as_deref(),
            Direction::Backward => node.right.as_deref(),
        }
    }

    fn far(&self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        match self.direction {
            Direction::Forward => node.right.as_deref(),
            Direction::Backward => node.left.as_deref(),
        }
    }

    fn descend(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            let key: &Q = node.key.borrow();
            if self.before_start(key) {
                // Node and its near subtree are out of range.
                link = self.far(node);
            } else {
                // Everything past `node` is past the end as well; only the
                // near subtree can still contribute.
                if !self.past_end(key) {
                    self.stack.push(node);
                }
                link = self.near(node);
            }
        }
    }
}

impl<'a, K, V, C, Q> Iterator for Iter<'a, K, V, C, Q>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let far = self.far(node);
        self.descend(far);
        Some(node.entry())
    }
}

impl<K, V, C, Q> FusedIterator for Iter<'_, K, V, C, Q>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{insert, InsertMode};
    use crate::compare::OrdComparator;
    use crate::node::Link;

    fn build(keys: impl IntoIterator<Item = u32>) -> Link<u32, u32> {
        let mut root = None;
        for k in keys {
            let (r, _) = insert(root, k, k * 10, InsertMode::Reject, &OrdComparator);
            root = Some(r);
        }
        root
    }

    fn walk(
        root: &Link<u32, u32>,
        direction: Direction,
        lower: Bound<&u32>,
        upper: Bound<&u32>,
    ) -> Vec<u32> {
        Iter::new(root.as_deref(), &OrdComparator, direction, lower, upper)
            .map(|(k, _)| *k)
            .collect()
    }

    #[test]
    fn test_full_walk_both_directions() {
        let root = build([5, 3, 8, 1, 4, 7, 9, 2, 6]);
        let fwd = walk(&root, Direction::Forward, Bound::Unbounded, Bound::Unbounded);
        assert_eq!(fwd, (1..=9).collect::<Vec<_>>());
        let bwd = walk(&root, Direction::Backward, Bound::Unbounded, Bound::Unbounded);
        assert_eq!(bwd, (1..=9).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_values_follow_keys() {
        let root = build([2, 1, 3]);
        let pairs: Vec<_> = Iter::<_, _, _, u32>::new(
            root.as_deref(),
            &OrdComparator,
            Direction::Forward,
            Bound::Unbounded,
            Bound::Unbounded,
        )
        .map(|(k, v)| (*k, *v))
        .collect();
        assert_eq!(pairs, vec![(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn test_bounded_walks() {
        let root = build(0..100);
        assert_eq!(
            walk(&root, Direction::Forward, Bound::Included(&10), Bound::Excluded(&15)),
            vec![10, 11, 12, 13, 14]
        );
        assert_eq!(
            walk(&root, Direction::Forward, Bound::Excluded(&10), Bound::Included(&15)),
            vec![11, 12, 13, 14, 15]
        );
        assert_eq!(
            walk(&root, Direction::Backward, Bound::Included(&10), Bound::Excluded(&15)),
            vec![14, 13, 12, 11, 10]
        );
        assert_eq!(
            walk(&root, Direction::Backward, Bound::Unbounded, Bound::Included(&3)),
            vec![3, 2, 1, 0]
        );
        assert_eq!(
            walk(&root, Direction::Forward, Bound::Included(&97), Bound::Unbounded),
            vec![97, 98, 99]
        );
    }

    #[test]
    fn test_empty_and_inverted_ranges() {
        let root = build(0..20);
        assert!(walk(&root, Direction::Forward, Bound::Included(&12), Bound::Included(&8)).is_empty());
        assert!(walk(&root, Direction::Backward, Bound::Excluded(&5), Bound::Excluded(&6)).is_empty());
        assert!(walk(&None, Direction::Forward, Bound::Unbounded, Bound::Unbounded).is_empty());
    }

    #[test]
    fn test_walk_is_fused() {
        let root = build([1, 2]);
        let mut it = Iter::new(
            root.as_deref(),
            &OrdComparator,
            Direction::Forward,
            Bound::Unbounded,
            Bound::Included(&1),
        );
        assert_eq!(it.next().map(|(k, _)| *k), Some(1));
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
