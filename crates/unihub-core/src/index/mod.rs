//! Multi-structure resource index.
//!
//! # Architecture
//!
//! - `types`: Core types (ResourceId, ResourceRecord, UploadedFile, IndexStats)
//! - `engine`: ResourceIndex facade coordinating every structure below
//! - `shared`: Thread-safe handle around the facade
//! - `primary`: Identifier → record map, the only owner of record content
//! - `ordered`: B-tree of identifiers for ordered and directory listing
//! - `prefix`: Character trie over display names for autocompletion
//! - `popularity`: Key-updatable download-count ranking
//! - `inverted`: Token → identifiers map for keyword lookup
//! - `relations`: Undirected graph of related resources
//! - `attributes`: Exact-match tag and uploader maps
//!
//! # Usage
//!
//! ```
//! use unihub_core::index::{ResourceIndex, ResourceRecord};
//!
//! let mut index = ResourceIndex::new();
//! index.add_resource(ResourceRecord::new("res/MTH101/CTs/ct1.pdf", "CT 1").with_type("CTs"))?;
//! index.add_resource(ResourceRecord::new("res/MTH101/CTs/ct2.pdf", "CT 2").with_type("CTs"))?;
//! index.connect_resources("res/MTH101/CTs/ct1.pdf", "res/MTH101/CTs/ct2.pdf")?;
//!
//! assert_eq!(index.related_resources("res/MTH101/CTs/ct2.pdf").len(), 1);
//! assert_eq!(index.autocomplete("CT").len(), 2);
//! # Ok::<(), unihub_core::IndexError>(())
//! ```
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `add_resource` | `O(log n + name + tokens)` |
//! | `get_resource` | `O(1)` expected |
//! | `autocomplete` | `O(prefix + matches)` |
//! | `top_popular(k)` | `O(k)` |
//! | `increment_download` | `O(log n)` |
//! | `search_by_keyword` | `O(1)` expected + result size |
//! | `related_resources` | `O(degree)` |

pub mod types;

mod engine;
mod shared;

// Internal structures - exposed for benchmarking but hidden from docs
#[doc(hidden)]
pub mod attributes;
#[doc(hidden)]
pub mod inverted;
#[doc(hidden)]
pub mod ordered;
#[doc(hidden)]
pub mod popularity;
#[doc(hidden)]
pub mod prefix;
#[doc(hidden)]
pub mod primary;
#[doc(hidden)]
pub mod relations;

pub use engine::ResourceIndex;
pub use inverted::tokenize;
pub use shared::SharedResourceIndex;
pub use types::{get_current_timestamp, IndexStats, ResourceId, ResourceRecord, UploadedFile};
