//! Thread-safe handle around a [`ResourceIndex`].
//!
//! Many readers may query at once; a mutation takes the write lock and so
//! runs alone. Because each mutation completes inside a single write-lock
//! section, readers never see a record that is in some structures but not
//! others.
//!
//! Query wrappers return owned data, since borrowed results cannot outlive
//! the read guard. Use [`SharedResourceIndex::read`] directly to run several
//! queries against one consistent view without cloning.

use super::engine::ResourceIndex;
use super::types::{IndexStats, ResourceId, ResourceRecord};
use crate::config::IndexConfig;
use crate::error::IndexError;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::error;

/// Cloneable, `Send + Sync` handle to one shared index.
#[derive(Debug, Clone, Default)]
pub struct SharedResourceIndex {
    inner: Arc<RwLock<ResourceIndex>>,
}

impl SharedResourceIndex {
    pub fn new(index: ResourceIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self::new(ResourceIndex::with_config(config))
    }

    /// Acquires a read guard.
    ///
    /// # Errors
    /// [`IndexError::LockPoisoned`] if a writer panicked while holding the lock.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, ResourceIndex>, IndexError> {
        self.inner.read().map_err(|_| {
            error!("Resource index read lock poisoned");
            IndexError::LockPoisoned
        })
    }

    /// Acquires the write guard.
    ///
    /// # Errors
    /// [`IndexError::LockPoisoned`] if a writer panicked while holding the lock.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, ResourceIndex>, IndexError> {
        self.inner.write().map_err(|_| {
            error!("Resource index write lock poisoned");
            IndexError::LockPoisoned
        })
    }

    pub fn add_resource(&self, record: ResourceRecord) -> Result<(), IndexError> {
        self.write()?.add_resource(record)
    }

    pub fn increment_download(&self, id: &str) -> Result<u64, IndexError> {
        self.write()?.increment_download(id)
    }

    pub fn connect_resources(&self, a: &str, b: &str) -> Result<(), IndexError> {
        self.write()?.connect_resources(a, b)
    }

    pub fn set_rating(&self, id: &str, rating: f64) -> Result<(), IndexError> {
        self.write()?.set_rating(id, rating)
    }

    pub fn get_resource(&self, id: &str) -> Result<ResourceRecord, IndexError> {
        self.read()?.get_resource(id).cloned()
    }

    pub fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, IndexError> {
        Ok(self.read()?.autocomplete(prefix))
    }

    pub fn top_popular(&self, k: usize) -> Result<Vec<ResourceRecord>, IndexError> {
        self.read()?.top_popular(k).map(owned)
    }

    pub fn search_by_keyword(&self, keyword: &str) -> Result<Vec<ResourceRecord>, IndexError> {
        self.read()?.search_by_keyword(keyword).map(owned)
    }

    pub fn resources_by_tag(&self, tag: &str) -> Result<Vec<ResourceRecord>, IndexError> {
        self.read()?.resources_by_tag(tag).map(owned)
    }

    pub fn resources_by_uploader(&self, uploader: &str) -> Result<Vec<ResourceRecord>, IndexError> {
        self.read()?.resources_by_uploader(uploader).map(owned)
    }

    pub fn related_resources(&self, id: &str) -> Result<Vec<ResourceId>, IndexError> {
        Ok(self.read()?.related_resources(id))
    }

    pub fn stats(&self) -> Result<IndexStats, IndexError> {
        Ok(self.read()?.stats())
    }
}

impl From<ResourceIndex> for SharedResourceIndex {
    fn from(index: ResourceIndex) -> Self {
        Self::new(index)
    }
}

fn owned(records: Vec<&ResourceRecord>) -> Vec<ResourceRecord> {
    records.into_iter().cloned().collect()
}
