//! Key-only projection of [`Llrb`].

use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Bound;

use crate::compare::{Comparator, OrdComparator};
use crate::error::Result;
use crate::iter::{Direction, Iter};
use crate::navigate::Neighbors;
use crate::tree::{Llrb, Stats};

/// An ordered set backed by a left-leaning red-black tree.
#[derive(Clone)]
pub struct LlrbSet<K, C = OrdComparator> {
    map: Llrb<K, (), C>,
}

impl<K: Ord> LlrbSet<K> {
    pub fn new() -> Self {
        Self { map: Llrb::new() }
    }
}

impl<K: Ord> Default for LlrbSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> From<Llrb<K, (), C>> for LlrbSet<K, C> {
    fn from(map: Llrb<K, (), C>) -> Self {
        Self { map }
    }
}

impl<K, C> LlrbSet<K, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            map: Llrb::with_comparator(cmp),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn first(&self) -> Option<&K> {
        self.map.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.map.last().map(|(k, _)| k)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.contains_key(key)
    }

    /// The stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.get_key_value(key).map(|(k, _)| k)
    }

    /// Returns whether the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.remove(key).is_some()
    }

    /// Removes and returns the stored key equal to `key`.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.remove_entry(key).map(|(k, _)| k)
    }

    pub fn siblings<Q>(&self, key: &Q) -> Neighbors<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.siblings(key).map(|(k, _)| k)
    }

    pub fn nearest<Q>(&self, key: &Q) -> Neighbors<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.map.nearest(key).map(|(k, _)| k)
    }

    pub fn range<'a, Q>(
        &'a self,
        lower: Bound<&'a Q>,
        upper: Bound<&'a Q>,
        direction: Direction,
    ) -> SetIter<'a, K, C, Q>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        SetIter {
            inner: self.map.range(lower, upper, direction),
        }
    }

    pub fn traverse_from<'a, Q>(&'a self, key: &'a Q, direction: Direction) -> SetIter<'a, K, C, Q>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        SetIter {
            inner: self.map.traverse_from(key, direction),
        }
    }
}

impl<K, C: Comparator<K>> LlrbSet<K, C> {
    /// Fails with [`Error::DuplicateKey`](crate::Error::DuplicateKey) if the
    /// key is already present.
    pub fn insert(&mut self, key: K) -> Result<()> {
        self.map.insert(key, ())
    }

    /// Inserts `key` if absent and returns `None`; otherwise returns the key
    /// already stored.
    pub fn try_insert(&mut self, key: K) -> Option<&K> {
        self.map.try_insert(key, ()).map(|(k, _)| k)
    }

    pub fn pop_first(&mut self) -> Option<K> {
        self.map.pop_first().map(|(k, _)| k)
    }

    pub fn pop_last(&mut self) -> Option<K> {
        self.map.pop_last().map(|(k, _)| k)
    }

    pub fn iter(&self) -> SetIter<'_, K, C> {
        self.traverse(Direction::Forward)
    }

    pub fn traverse(&self, direction: Direction) -> SetIter<'_, K, C> {
        SetIter {
            inner: self.map.traverse(direction),
        }
    }

    pub fn validate(&self) -> Result<Stats> {
        self.map.validate()
    }
}

/// Iterator over the keys of an [`LlrbSet`].
pub struct SetIter<'a, K, C, Q: ?Sized = K> {
    inner: Iter<'a, K, (), C, Q>,
}

impl<'a, K, C, Q> Iterator for SetIter<'a, K, C, Q>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, C, Q> FusedIterator for SetIter<'_, K, C, Q>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
}

impl<'a, K, C: Comparator<K>> IntoIterator for &'a LlrbSet<K, C> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Duplicates are ignored.
impl<K: Ord> FromIterator<K> for LlrbSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, C: Comparator<K>> Extend<K> for LlrbSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.try_insert(key);
        }
    }
}

impl<K: fmt::Debug, C: Comparator<K>> fmt::Debug for LlrbSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
