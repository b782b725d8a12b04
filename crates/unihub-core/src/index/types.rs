use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Returns the current Unix timestamp (seconds since UNIX_EPOCH).
///
/// If the system time is before UNIX_EPOCH, returns 0 instead of panicking.
pub fn get_current_timestamp() -> u64 {
    instant::SystemTime::now()
        .duration_since(instant::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Unique resource identifier, typically the stored file path.
///
/// Backed by `Arc<str>` so every structure that records an identifier shares
/// one allocation. Ordering, hashing and equality are those of the
/// underlying string, and `ResourceId: Borrow<str>` lets every map keyed by
/// identifier be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(Arc<str>);

impl ResourceId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl PartialEq<str> for ResourceId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ResourceId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Result of a successful upload, as reported by the storage layer.
///
/// The index never touches the filesystem; it only receives this pair once
/// the file has been copied into place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Destination path of the stored copy
    pub stored_path: String,
    /// Size of the stored file in bytes
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(stored_path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            stored_path: stored_path.into(),
            size_bytes,
        }
    }

    /// Final path component of the stored path.
    ///
    /// Accepts both `/` and `\` separators. Returns the whole path when it
    /// has no separator.
    pub fn file_name(&self) -> &str {
        let trimmed = self.stored_path.trim_end_matches(['/', '\\']);
        trimmed
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(trimmed)
    }
}

/// Metadata for one uploaded resource.
///
/// Once a record is handed to the index, only `download_count` and `rating`
/// can change, and only through the index's own operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Unique identifier (stored path)
    pub id: ResourceId,
    /// Human-readable title
    pub display_name: String,
    /// Entry from the resource-type catalog
    #[serde(default)]
    pub resource_type: String,
    /// Subject code
    #[serde(default)]
    pub subject: String,
    /// Uploading user
    #[serde(default)]
    pub uploader: String,
    #[serde(default)]
    pub size_bytes: u64,
    /// Unix timestamp of the upload
    #[serde(default = "get_current_timestamp")]
    pub upload_time: u64,
    #[serde(default)]
    pub download_count: u64,
    /// 0.0 to 5.0
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ResourceRecord {
    /// Creates a record with empty attributes, zero counters and the current
    /// time as upload time.
    pub fn new(id: impl Into<ResourceId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            resource_type: String::new(),
            subject: String::new(),
            uploader: String::new(),
            size_bytes: 0,
            upload_time: get_current_timestamp(),
            download_count: 0,
            rating: 0.0,
            tags: Vec::new(),
        }
    }

    /// Creates a record for a freshly stored file.
    ///
    /// The identifier is the stored path and the display name is the stored
    /// file name. The resource type is left empty, so set it with
    /// [`with_type`](Self::with_type) before indexing unless the index is
    /// configured to accept any type.
    pub fn from_upload(upload: UploadedFile) -> Self {
        let display_name = upload.file_name().to_string();
        let size_bytes = upload.size_bytes;
        Self::new(upload.stored_path, display_name).with_size(size_bytes)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_uploader(mut self, uploader: impl Into<String>) -> Self {
        self.uploader = uploader.into();
        self
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    pub fn with_upload_time(mut self, upload_time: u64) -> Self {
        self.upload_time = upload_time;
        self
    }

    pub fn with_download_count(mut self, download_count: u64) -> Self {
        self.download_count = download_count;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Entry counts for every structure owned by the index.
///
/// After any sequence of successful facade calls, `resources`,
/// `ordered_entries`, `ranked_entries` and `graph_nodes` are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Records in the primary store
    pub resources: usize,
    /// Identifiers in the ordered store
    pub ordered_entries: usize,
    /// Distinct display names in the prefix trie
    pub distinct_names: usize,
    /// Identifiers ranked by the popularity index
    pub ranked_entries: usize,
    /// Distinct tokens in the inverted index
    pub tokens: usize,
    /// Nodes in the relationship graph
    pub graph_nodes: usize,
    /// Undirected edges in the relationship graph
    pub relationships: usize,
    /// Distinct tags
    pub tags: usize,
    /// Distinct uploaders
    pub uploaders: usize,
}
