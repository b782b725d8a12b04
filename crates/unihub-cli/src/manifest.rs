//! Manifest loading.
//!
//! The manifest is a JSON snapshot of what the upload service knows about:
//! the accepted resource types, every stored resource, the relationships
//! between them, and a download log that is replayed on load.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use unihub_core::{IndexConfig, ResourceIndex, ResourceRecord, ResourceTypeCatalog};

/// On-disk manifest format.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Overrides the default resource-type catalog when present
    pub resource_types: Option<Vec<String>>,
    pub resources: Vec<ResourceRecord>,
    /// Pairs of related identifiers
    pub relationships: Vec<(String, String)>,
    /// One identifier per recorded download
    pub downloads: Vec<String>,
}

impl Manifest {
    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    fn config(&self) -> IndexConfig {
        match &self.resource_types {
            Some(types) => IndexConfig::with_catalog(ResourceTypeCatalog::from_types(types)),
            None => IndexConfig::default(),
        }
    }

    /// Builds an index from the manifest.
    ///
    /// Resources are added first, then relationships, then downloads are
    /// replayed in order. The first rejected entry aborts the load.
    pub fn into_index(self) -> Result<ResourceIndex> {
        let config = self.config();
        let mut index = ResourceIndex::from_records(config, self.resources)
            .context("Failed to index manifest resources")?;

        for (a, b) in &self.relationships {
            index
                .connect_resources(a, b)
                .with_context(|| format!("Invalid relationship {a} <-> {b}"))?;
        }
        for id in &self.downloads {
            index
                .increment_download(id)
                .with_context(|| format!("Invalid download entry {id}"))?;
        }

        info!(
            "Loaded manifest: {} resources, {} relationships, {} downloads replayed",
            index.len(),
            self.relationships.len(),
            self.downloads.len()
        );
        Ok(index)
    }
}

/// Loads `path` and builds the index it describes.
pub fn load_index(path: &Path) -> Result<ResourceIndex> {
    info!("Opening manifest: {}", path.display());
    Manifest::load(path)?.into_index()
}
