//! Exact-match lookup maps for record attributes (tags, uploaders).
//!
//! Unlike the inverted index, keys are stored verbatim: `"DP"` and `"dp"`
//! are different tags.

use super::types::ResourceId;
use std::collections::HashMap;

/// Attribute value → identifiers, in insertion order, without repeats.
#[derive(Debug, Default)]
pub struct AttributeIndex {
    entries: HashMap<String, Vec<ResourceId>>,
}

impl AttributeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `id` under `value`.
    ///
    /// All values for one record must be added before the next record's, so
    /// a repeat can only be the tail of the list.
    pub fn add(&mut self, value: &str, id: &ResourceId) {
        let ids = self.entries.entry(value.to_string()).or_default();
        if ids.last() != Some(id) {
            ids.push(id.clone());
        }
    }

    pub fn get(&self, value: &str) -> &[ResourceId] {
        self.entries
            .get(value)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates every (value, identifiers) pair in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResourceId])> {
        self.entries
            .iter()
            .map(|(value, ids)| (value.as_str(), ids.as_slice()))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
