//! Resource index facade.
//!
//! [`ResourceIndex`] owns the primary store and every secondary structure,
//! and is the only way to change any of them. Each mutation runs in two
//! phases:
//!
//! 1. **Validate**: every check that can fail runs before anything is
//!    touched, so a rejected call leaves all structures exactly as they were.
//! 2. **Apply**: the record is moved into the primary store and its derived
//!    keys are registered with each secondary structure. None of these steps
//!    can fail.
//!
//! Queries ask a secondary structure for identifiers and resolve them
//! through the primary store. An identifier that does not resolve means the
//! structures have drifted apart; it is logged at `error` level and
//! reported as [`IndexError::InvariantViolation`] instead of being skipped.
//!
//! # Example
//!
//! ```
//! use unihub_core::{ResourceIndex, ResourceRecord};
//!
//! let mut index = ResourceIndex::new();
//! index.add_resource(
//!     ResourceRecord::new("res/CSE201/Notes/ds.pdf", "Data Structures Notes")
//!         .with_type("Notes")
//!         .with_subject("CSE201")
//!         .with_download_count(3),
//! )?;
//!
//! assert_eq!(index.autocomplete("Data"), vec!["Data Structures Notes"]);
//! assert_eq!(index.search_by_keyword("structures")?.len(), 1);
//!
//! index.increment_download("res/CSE201/Notes/ds.pdf")?;
//! assert_eq!(index.top_popular(1)?[0].download_count, 4);
//! # Ok::<(), unihub_core::IndexError>(())
//! ```

mod consistency;


use super::attributes::AttributeIndex;
use super::inverted::InvertedIndex;
use super::ordered::OrderedStore;
use super::popularity::PopularityIndex;
use super::prefix::PrefixIndex;
use super::primary::PrimaryStore;
use super::relations::RelationshipGraph;
use super::types::{ResourceId, ResourceRecord};
use crate::config::{
    IndexConfig, ResourceTypeCatalog, DEFAULT_POPULAR_COUNT, MAX_RATING, MIN_RATING,
};
use crate::error::IndexError;
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

/// Structure names reported in [`IndexError::InvariantViolation`].
pub(crate) mod structure {
    pub const ORDERED: &str = "ordered store";
    pub const NAMES: &str = "prefix index";
    pub const POPULARITY: &str = "popularity index";
    pub const KEYWORDS: &str = "inverted index";
    pub const RELATIONS: &str = "relationship graph";
    pub const TAGS: &str = "tag index";
    pub const UPLOADERS: &str = "uploader index";
}

/// Multi-structure resource index.
///
/// # Thread Safety
///
/// Queries take `&self` and mutations take `&mut self`, so the borrow
/// checker already keeps readers and writers apart within one thread. To
/// share an index between threads use
/// [`SharedResourceIndex`](crate::index::SharedResourceIndex).
#[derive(Debug)]
pub struct ResourceIndex {
    /// Single owner of record content
    pub(crate) primary: PrimaryStore,
    /// Identifiers in ascending order
    pub(crate) ordered: OrderedStore,
    /// Display-name trie
    pub(crate) names: PrefixIndex,
    /// Download-count ranking
    pub(crate) popularity: PopularityIndex,
    /// Token → identifiers
    pub(crate) keywords: InvertedIndex,
    /// Related-resource edges
    pub(crate) relations: RelationshipGraph,
    /// Tag → identifiers
    pub(crate) tags: AttributeIndex,
    /// Uploader → identifiers
    pub(crate) uploaders: AttributeIndex,
    pub(crate) config: IndexConfig,
}

impl ResourceIndex {
    /// Creates an empty index that accepts the default resource types.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Creates an empty index with an explicit configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            primary: PrimaryStore::new(),
            ordered: OrderedStore::new(),
            names: PrefixIndex::new(),
            popularity: PopularityIndex::new(),
            keywords: InvertedIndex::new(),
            relations: RelationshipGraph::new(),
            tags: AttributeIndex::new(),
            uploaders: AttributeIndex::new(),
            config,
        }
    }

    /// Builds an index from a batch of records.
    ///
    /// Stops at the first record that [`add_resource`](Self::add_resource)
    /// rejects and returns that error.
    pub fn from_records<I>(config: IndexConfig, records: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = ResourceRecord>,
    {
        let start = instant::Instant::now();
        let mut index = Self::with_config(config);
        for record in records {
            index.add_resource(record)?;
        }
        info!(
            "Built resource index: {} resources in {:?}",
            index.len(),
            start.elapsed()
        );
        Ok(index)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Accepted resource types, or `None` when any type is accepted.
    pub fn catalog(&self) -> Option<&ResourceTypeCatalog> {
        self.config.resource_types.as_deref()
    }

    /// Number of indexed resources.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a resource to every structure.
    ///
    /// # Errors
    /// - [`IndexError::DuplicateIdentifier`] if the identifier is already indexed
    /// - [`IndexError::InvalidRecord`] if the identifier or display name is
    ///   blank, the resource type is not in the catalog, or the rating is out
    ///   of range
    ///
    /// On error no structure is modified.
    #[instrument(skip_all, fields(id = %record.id))]
    pub fn add_resource(&mut self, record: ResourceRecord) -> Result<(), IndexError> {
        if self.primary.contains(record.id.as_str()) {
            warn!("Rejected duplicate resource");
            return Err(IndexError::DuplicateIdentifier(record.id));
        }
        self.validate(&record)?;

        let Self {
            primary,
            ordered,
            names,
            popularity,
            keywords,
            relations,
            tags,
            uploaders,
            ..
        } = self;

        let record = primary.insert(record)?;
        ordered.insert(record.id.clone());
        names.insert(&record.display_name);
        popularity.record_or_update(&record.id, record.download_count);
        keywords.index(record);
        relations.add_node(&record.id);
        for tag in record.tags.iter().filter(|tag| !tag.is_empty()) {
            tags.add(tag, &record.id);
        }
        if !record.uploader.is_empty() {
            uploaders.add(&record.uploader, &record.id);
        }

        debug!(
            "Indexed resource ({} tags, {} downloads)",
            record.tags.len(),
            record.download_count
        );
        Ok(())
    }

    /// Records one download of `id` and returns the new count.
    ///
    /// The popularity ranking is re-keyed in place, so the resource keeps a
    /// single ranking entry however often it is downloaded.
    #[instrument(skip(self))]
    pub fn increment_download(&mut self, id: &str) -> Result<u64, IndexError> {
        let record = self.primary.get(id)?;
        let count = record.download_count.saturating_add(1);
        let id = record.id.clone();

        self.primary.update_download_count(id.as_str(), count)?;
        self.popularity.record_or_update(&id, count);

        debug!(count, "Recorded download");
        Ok(count)
    }

    /// Marks two resources as related.
    ///
    /// Connecting an already-connected pair, or a resource to itself, is a
    /// no-op.
    ///
    /// # Errors
    /// [`IndexError::NotFound`] if either identifier is not indexed.
    #[instrument(skip(self))]
    pub fn connect_resources(&mut self, a: &str, b: &str) -> Result<(), IndexError> {
        let a = self.primary.get(a)?.id.clone();
        let b = self.primary.get(b)?.id.clone();

        if self.relations.connect(&a, &b) {
            debug!("Connected resources");
        }
        Ok(())
    }

    /// Replaces the rating of `id`.
    ///
    /// # Errors
    /// - [`IndexError::InvalidRecord`] if `rating` is outside 0.0–5.0
    /// - [`IndexError::NotFound`] if `id` is not indexed
    pub fn set_rating(&mut self, id: &str, rating: f64) -> Result<(), IndexError> {
        check_rating(rating)?;
        self.primary.update_rating(id, rating)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_resource(&self, id: &str) -> Result<&ResourceRecord, IndexError> {
        self.primary.get(id)
    }

    /// Distinct display names starting with `prefix` (case-sensitive), in
    /// code-point order.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.names.with_prefix(prefix)
    }

    /// Up to `k` resources, most downloaded first; equal counts keep
    /// insertion order.
    pub fn top_popular(&self, k: usize) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::POPULARITY, self.popularity.top_k(k))
    }

    /// [`top_popular`](Self::top_popular) with
    /// [`DEFAULT_POPULAR_COUNT`](crate::config::DEFAULT_POPULAR_COUNT).
    pub fn top_popular_default(&self) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.top_popular(DEFAULT_POPULAR_COUNT)
    }

    /// Resources whose name, subject, type or tags contain `keyword` as a
    /// whole token (case-insensitive). Each resource appears once.
    pub fn search_by_keyword(&self, keyword: &str) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::KEYWORDS, self.keywords.search(keyword))
    }

    /// Resources carrying exactly `tag`.
    pub fn resources_by_tag(&self, tag: &str) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::TAGS, self.tags.get(tag))
    }

    /// Resources uploaded by exactly `uploader`.
    pub fn resources_by_uploader(
        &self,
        uploader: &str,
    ) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::UPLOADERS, self.uploaders.get(uploader))
    }

    /// Identifiers directly related to `id`, in ascending order. Empty when
    /// `id` is unknown or unrelated.
    pub fn related_resources(&self, id: &str) -> Vec<ResourceId> {
        self.relations.neighbors_of(id)
    }

    /// Lazily walks identifiers in ascending order.
    pub fn ids_in_order(&self) -> impl Iterator<Item = &ResourceId> + '_ {
        self.ordered.all_in_order()
    }

    /// Every resource in ascending identifier order.
    pub fn resources_in_order(&self) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::ORDERED, self.ordered.all_in_order())
    }

    /// Resources whose identifier starts with `path_prefix`, in ascending
    /// order. With identifiers laid out as `<root>/<subject>/<type>/<file>`
    /// this lists one directory, e.g. `"res/CSE201/Notes/"`.
    pub fn resources_under(&self, path_prefix: &str) -> Result<Vec<&ResourceRecord>, IndexError> {
        self.resolve(structure::ORDERED, self.ordered.with_prefix(path_prefix))
    }

    /// Resources whose identifier or display name contains `fragment`
    /// (case-sensitive), in ascending identifier order.
    pub fn find_by_name_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<&ResourceRecord>, IndexError> {
        let mut matches = Vec::new();
        for id in self.ordered.all_in_order() {
            let record = self.resolve_one(structure::ORDERED, id)?;
            if id.as_str().contains(fragment) || record.display_name.contains(fragment) {
                matches.push(record);
            }
        }
        Ok(matches)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn validate(&self, record: &ResourceRecord) -> Result<(), IndexError> {
        if record.id.as_str().trim().is_empty() {
            return Err(IndexError::InvalidRecord(
                "identifier must not be blank".to_string(),
            ));
        }
        if record.display_name.trim().is_empty() {
            return Err(IndexError::InvalidRecord(format!(
                "display name of '{}' must not be blank",
                record.id
            )));
        }
        if !self.config.accepts_type(&record.resource_type) {
            return Err(IndexError::InvalidRecord(format!(
                "unknown resource type '{}' for '{}'",
                record.resource_type, record.id
            )));
        }
        check_rating(record.rating)
    }

    /// Resolves identifiers into records, skipping repeats.
    fn resolve<'a, I>(
        &'a self,
        structure: &'static str,
        ids: I,
    ) -> Result<Vec<&'a ResourceRecord>, IndexError>
    where
        I: IntoIterator<Item = &'a ResourceId>,
    {
        let mut seen: HashSet<&'a ResourceId> = HashSet::new();
        ids.into_iter()
            .filter(|&id| seen.insert(id))
            .map(|id| self.resolve_one(structure, id))
            .collect()
    }

    fn resolve_one<'a>(
        &'a self,
        structure: &'static str,
        id: &ResourceId,
    ) -> Result<&'a ResourceRecord, IndexError> {
        self.primary.lookup(id.as_str()).ok_or_else(|| {
            error!(
                structure,
                id = %id,
                "Secondary structure references a resource missing from the primary store"
            );
            IndexError::InvariantViolation {
                structure,
                id: id.clone(),
            }
        })
    }
}

impl Default for ResourceIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn check_rating(rating: f64) -> Result<(), IndexError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(IndexError::InvalidRecord(format!(
            "rating {} is outside {}..={}",
            rating, MIN_RATING, MAX_RATING
        )))
    }
}
