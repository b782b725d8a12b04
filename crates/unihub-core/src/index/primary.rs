//! Primary store: the single owner of record content.
//!
//! Every other structure in the index holds identifiers only. Resolving an
//! identifier into a full record always goes through here, and this is the
//! only place a record is mutated after insertion.

use super::types::{ResourceId, ResourceRecord};
use crate::error::IndexError;
use std::collections::HashMap;

/// Identifier → record map.
#[derive(Debug, Default)]
pub struct PrimaryStore {
    records: HashMap<ResourceId, ResourceRecord>,
}

impl PrimaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `record`.
    ///
    /// Returns a reference to the stored copy so the caller can derive
    /// secondary keys without cloning the record.
    ///
    /// # Errors
    /// [`IndexError::DuplicateIdentifier`] if the identifier is already present;
    /// the store is left unchanged.
    pub fn insert(&mut self, record: ResourceRecord) -> Result<&ResourceRecord, IndexError> {
        use std::collections::hash_map::Entry;

        match self.records.entry(record.id.clone()) {
            Entry::Occupied(entry) => Err(IndexError::DuplicateIdentifier(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(record)),
        }
    }

    pub fn get(&self, id: &str) -> Result<&ResourceRecord, IndexError> {
        self.records
            .get(id)
            .ok_or_else(|| IndexError::NotFound(ResourceId::from(id)))
    }

    /// Looks up a record without producing an error.
    pub fn lookup(&self, id: &str) -> Option<&ResourceRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Replaces the download count of an existing record.
    pub fn update_download_count(&mut self, id: &str, count: u64) -> Result<(), IndexError> {
        let record = self.get_mut(id)?;
        record.download_count = count;
        Ok(())
    }

    /// Replaces the rating of an existing record. Range checks are the
    /// caller's responsibility.
    pub fn update_rating(&mut self, id: &str, rating: f64) -> Result<(), IndexError> {
        let record = self.get_mut(id)?;
        record.rating = rating;
        Ok(())
    }

    /// Iterates all records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ResourceRecord, IndexError> {
        self.records
            .get_mut(id)
            .ok_or_else(|| IndexError::NotFound(ResourceId::from(id)))
    }
}
