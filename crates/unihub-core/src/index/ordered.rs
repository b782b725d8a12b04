//! Ordered store for directory-style enumeration.
//!
//! Identifiers are kept in a B-tree so insertion stays `O(log n)` and a full
//! ordered walk stays `O(n)` whatever order files arrive in. Upload paths
//! are usually inserted in near-sorted batches, which is the worst case for
//! an unbalanced tree.

use super::types::ResourceId;
use std::collections::btree_set::{self, BTreeSet};
use std::ops::Bound;

/// Identifiers in ascending byte-wise order.
#[derive(Debug, Default)]
pub struct OrderedStore {
    ids: BTreeSet<ResourceId>,
}

impl OrderedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: ResourceId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Lazily walks every identifier in ascending order.
    ///
    /// Each call starts a fresh walk from the smallest identifier.
    pub fn all_in_order(&self) -> btree_set::Iter<'_, ResourceId> {
        self.ids.iter()
    }

    /// Walks identifiers starting with `prefix` in ascending order.
    ///
    /// Seeks straight to the first candidate and stops at the first
    /// identifier past the prefix, so the cost is `O(log n + matches)`.
    pub fn with_prefix<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a ResourceId> + 'a {
        let owned = prefix.to_owned();
        self.ids
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |id| id.as_str().starts_with(owned.as_str()))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
