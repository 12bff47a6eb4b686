//! Construction-time settings.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::tree::Llrb;

/// Builder for [`Llrb`].
///
/// The comparator is required; [`build`](Self::build) fails with
/// [`Error::InvalidConfiguration`] when none was supplied. The optional name
/// is attached to the tree's trace events.
///
/// ```rust
/// use llrb_rs::Llrb;
///
/// let tree = Llrb::<u32, &str, _>::builder()
///     .comparator(|a: &u32, b: &u32| b.cmp(a))
///     .name("descending")
///     .build()
///     .unwrap();
/// assert_eq!(tree.name(), Some("descending"));
/// ```
pub struct LlrbBuilder<K, V, C> {
    comparator: Option<C>,
    name: Option<String>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> LlrbBuilder<K, V, C> {
    pub fn new() -> Self {
        Self {
            comparator: None,
            name: None,
            _marker: PhantomData,
        }
    }

    pub fn comparator(mut self, comparator: C) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Llrb<K, V, C>> {
        let comparator = self
            .comparator
            .ok_or(Error::InvalidConfiguration("a comparator is required"))?;
        Ok(Llrb::from_parts(comparator, self.name))
    }
}

impl<K, V, C> Default for LlrbBuilder<K, V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> fmt::Debug for LlrbBuilder<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlrbBuilder")
            .field("comparator", &self.comparator.is_some())
            .field("name", &self.name)
            .finish()
    }
}
