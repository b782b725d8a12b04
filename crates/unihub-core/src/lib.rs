//! # UniHub Core
//!
//! In-memory resource index for uploaded course material.
//!
//! A single [`ResourceIndex`](index::ResourceIndex) owns several
//! cooperating structures and keeps them consistent as resources are added
//! and downloaded:
//!
//! - an ordered store for directory-style enumeration by identifier
//! - a prefix trie for display-name autocompletion
//! - a key-updatable popularity ranking by download count
//! - an inverted index for exact keyword lookup
//! - an undirected relationship graph between resources
//! - tag and uploader lookup maps
//!
//! ## Modules
//!
//! - [`index`] - The facade and every structure it coordinates
//! - [`config`] - Resource-type catalog and engine constants
//! - [`error`] - Error taxonomy shared by every operation

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod index;

pub use config::{IndexConfig, ResourceTypeCatalog};
pub use error::IndexError;
pub use index::{
    IndexStats, ResourceId, ResourceIndex, ResourceRecord, SharedResourceIndex, UploadedFile,
};
