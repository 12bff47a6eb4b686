//! The ordered map.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, Index};

use tracing::{debug, trace};

use crate::balance::{self, is_red, InsertMode, Inserted};
use crate::builder::LlrbBuilder;
use crate::compare::{Comparator, OrdComparator};
use crate::error::{Error, Result, Violation};
use crate::iter::{Direction, Iter};
use crate::navigate::{self, Neighbors};
use crate::node::{Color, Link, Node};

/// Shape summary returned by [`Llrb::validate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of entries.
    pub entries: usize,
    /// Black links on every root-to-leaf path.
    pub black_height: usize,
    /// Nodes on the longest root-to-leaf path.
    pub max_depth: usize,
}

/// An ordered map backed by a left-leaning red-black tree.
///
/// Keys are ordered by the comparator `C`, fixed at construction. Lookups,
/// insertions and removals are O(log n); traversals are lazy and may be
/// bounded on either side.
#[derive(Clone)]
pub struct Llrb<K, V, C = OrdComparator> {
    root: Link<K, V>,
    count: usize,
    cmp: C,
    name: Option<String>,
}

impl<K: Ord, V> Llrb<K, V> {
    /// An empty tree ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::from_parts(OrdComparator, None)
    }
}

impl<K: Ord, V> Default for Llrb<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Llrb<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::from_parts(cmp, None)
    }

    pub fn builder() -> LlrbBuilder<K, V, C> {
        LlrbBuilder::new()
    }

    pub(crate) fn from_parts(cmp: C, name: Option<String>) -> Self {
        Self {
            root: None,
            count: 0,
            cmp,
            name,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    #[cfg(test)]
    pub(crate) fn root_is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The entry with the least key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(|n| n.min().entry())
    }

    /// The entry with the greatest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(|n| n.max().entry())
    }

    /// Takes the root, lends it to `op` with the root link reddened when both
    /// children are black, then re-attaches the result with a black root.
    ///
    /// Reddening lets the first `move_red_*` on the search path borrow from
    /// the root like from any other red parent.
    fn detach<R>(&mut self, op: impl FnOnce(Box<Node<K, V>>, &C) -> (Link<K, V>, R)) -> Option<R> {
        let mut root = self.root.take()?;
        if !is_red(&root.left) && !is_red(&root.right) {
            root.color = Color::Red;
        }
        let (root, out) = op(root, &self.cmp);
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
        Some(out)
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl<K, V, C: Comparator<K>> Llrb<K, V, C> {
    fn put(&mut self, key: K, value: V, mode: InsertMode) -> Inserted<K, V> {
        let (mut root, outcome) = balance::insert(self.root.take(), key, value, mode, &self.cmp);
        root.color = Color::Black;
        self.root = Some(root);
        if let Inserted::New = outcome {
            self.count += 1;
        }
        trace!(tree = ?self.name, len = self.count, ?mode, "put");
        outcome
    }

    /// Inserts a new entry. Fails with [`Error::DuplicateKey`], leaving the
    /// tree unchanged, if the key is already present.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        match self.put(key, value, InsertMode::Reject) {
            Inserted::New => Ok(()),
            _ => Err(Error::DuplicateKey),
        }
    }

    /// Inserts a new entry if the key is absent and returns `None`. Otherwise
    /// drops `key` and `value` and returns the entry already in the tree.
    pub fn try_insert(&mut self, key: K, value: V) -> Option<(&K, &V)> {
        match self.put(key, value, InsertMode::Reject) {
            Inserted::Rejected(key, _) => {
                navigate::find(self.root.as_deref(), &key, &self.cmp).map(Node::entry)
            }
            _ => None,
        }
    }

    /// Inserts or overwrites, returning the previous value if there was one.
    /// The key already in the tree is kept.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match self.put(key, value, InsertMode::Replace) {
            Inserted::Replaced(old) => Some(old),
            _ => None,
        }
    }

    /// Removes and returns the entry with the least key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let min = self.detach(|root, _| balance::remove_min(root))?;
        self.count -= 1;
        trace!(tree = ?self.name, len = self.count, "pop_first");
        Some(min.into_entry())
    }

    /// Removes and returns the entry with the greatest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let max = self.detach(|root, _| balance::remove_max(root))?;
        self.count -= 1;
        trace!(tree = ?self.name, len = self.count, "pop_last");
        Some(max.into_entry())
    }
}

impl<K, V, C> Llrb<K, V, C> {
    /// Removes `key`, returning its value. A missing key leaves the tree
    /// untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if !self.contains_key(key) {
            return None;
        }
        let removed = self.detach(|root, cmp| balance::remove(root, key, cmp)).flatten();
        if removed.is_some() {
            self.count -= 1;
        }
        trace!(tree = ?self.name, len = self.count, hit = removed.is_some(), "remove");
        removed
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<K, V, C> Llrb<K, V, C> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        navigate::find(self.root.as_deref(), key, &self.cmp).map(Node::entry)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        navigate::find_mut(self.root.as_deref_mut(), key, &self.cmp).map(|n| &mut n.value)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        navigate::find(self.root.as_deref(), key, &self.cmp).is_some()
    }

    /// The closest entries strictly before and strictly after `key`. A present
    /// `key` is skipped.
    pub fn siblings<Q>(&self, key: &Q) -> Neighbors<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        navigate::siblings(self.root.as_deref(), key, &self.cmp).map(Node::entry)
    }

    /// The closest entries at or before and at or after `key`. A present
    /// `key` is returned on both sides.
    pub fn nearest<Q>(&self, key: &Q) -> Neighbors<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        navigate::nearest(self.root.as_deref(), key, &self.cmp).map(Node::entry)
    }
}

// =============================================================================
// Traversal
// =============================================================================

impl<K, V, C: Comparator<K>> Llrb<K, V, C> {
    /// All entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.traverse(Direction::Forward)
    }

    pub fn traverse(&self, direction: Direction) -> Iter<'_, K, V, C> {
        Iter::new(
            self.root.as_deref(),
            &self.cmp,
            direction,
            Bound::Unbounded,
            Bound::Unbounded,
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Checks every structural invariant and returns a shape summary.
    pub fn validate(&self) -> Result<Stats> {
        let result = self.check();
        if let Err(ref e) = result {
            debug!(tree = ?self.name, error = %e, "validation failed");
        }
        result
    }

    fn check(&self) -> Result<Stats> {
        if is_red(&self.root) {
            return Err(Violation::RedRoot.into());
        }

        let mut reachable = 0;
        let mut max_depth = 0;
        let black_height = balance::check_subtree(&self.root, 0, &mut reachable, &mut max_depth)?;
        if reachable != self.count {
            return Err(Violation::CountMismatch {
                count: self.count,
                reachable,
            }
            .into());
        }

        let mut prev: Option<&K> = None;
        for key in self.keys() {
            if let Some(prev) = prev {
                if self.cmp.compare(prev, key) != Ordering::Less {
                    return Err(Violation::OutOfOrder.into());
                }
            }
            prev = Some(key);
        }

        Ok(Stats {
            entries: self.count,
            black_height,
            max_depth,
        })
    }
}

impl<K, V, C> Llrb<K, V, C> {
    /// Entries between `lower` and `upper`, walked in `direction`.
    pub fn range<'a, Q>(
        &'a self,
        lower: Bound<&'a Q>,
        upper: Bound<&'a Q>,
        direction: Direction,
    ) -> Iter<'a, K, V, C, Q>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        Iter::new(self.root.as_deref(), &self.cmp, direction, lower, upper)
    }

    /// Entries from `key` onwards in `direction`: keys at or after `key`
    /// ascending when walking forward, keys at or before `key` descending
    /// when walking backward.
    pub fn traverse_from<'a, Q>(&'a self, key: &'a Q, direction: Direction) -> Iter<'a, K, V, C, Q>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        match direction {
            Direction::Forward => self.range(Bound::Included(key), Bound::Unbounded, direction),
            Direction::Backward => self.range(Bound::Unbounded, Bound::Included(key), direction),
        }
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<K, V, C, Q> Index<&Q> for Llrb<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a Llrb<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Later duplicates overwrite earlier ones.
impl<K: Ord, V> FromIterator<(K, V)> for Llrb<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for Llrb<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.upsert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for Llrb<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
