//! Engine configuration.
//!
//! Constants shared by the engine, the CLI and the benchmarks, plus the
//! resource-type catalog. The catalog is immutable once loaded and is handed
//! to the index through [`IndexConfig`] rather than living in global state.
//!
//! # Usage
//!
//! ```
//! use unihub_core::config::{IndexConfig, ResourceTypeCatalog, DEFAULT_POPULAR_COUNT};
//!
//! let catalog = ResourceTypeCatalog::default();
//! assert!(catalog.contains("Notes"));
//!
//! let config = IndexConfig::with_catalog(catalog);
//! assert!(config.accepts_type("PPTs"));
//! assert_eq!(DEFAULT_POPULAR_COUNT, 10);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of resources returned by a popularity query when the caller does
/// not ask for a specific count.
pub const DEFAULT_POPULAR_COUNT: usize = 10;

/// Lowest allowed rating.
pub const MIN_RATING: f64 = 0.0;

/// Highest allowed rating.
pub const MAX_RATING: f64 = 5.0;

/// Resource types accepted out of the box.
///
/// Order matters: menus list types in this order.
pub const DEFAULT_RESOURCE_TYPES: [&str; 8] = [
    "Notes",
    "Assignments",
    "PPTs",
    "EndSemPapers",
    "CTs",
    "MidSemPapers",
    "YouTubeLinks",
    "ReferenceBooks",
];

/// Fixed list of resource types a record may declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ResourceTypeCatalog {
    types: Vec<String>,
}

impl ResourceTypeCatalog {
    /// Builds a catalog from an explicit list, dropping blank and repeated
    /// entries while keeping first-seen order.
    pub fn from_types<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for ty in types {
            let ty = ty.into();
            let ty = ty.trim();
            if !ty.is_empty() && !unique.iter().any(|t| t == ty) {
                unique.push(ty.to_string());
            }
        }
        Self { types: unique }
    }

    /// Returns `true` if `resource_type` is in the catalog (exact match).
    pub fn contains(&self, resource_type: &str) -> bool {
        self.types.iter().any(|t| t == resource_type)
    }

    /// Iterates catalog entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<Vec<String>> for ResourceTypeCatalog {
    fn from(types: Vec<String>) -> Self {
        Self::from_types(types)
    }
}

impl From<ResourceTypeCatalog> for Vec<String> {
    fn from(catalog: ResourceTypeCatalog) -> Self {
        catalog.types
    }
}

impl Default for ResourceTypeCatalog {
    fn default() -> Self {
        Self::from_types(DEFAULT_RESOURCE_TYPES)
    }
}

/// Configuration handed to [`ResourceIndex`](crate::index::ResourceIndex)
/// at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Accepted resource types. `None` disables type validation.
    pub resource_types: Option<Arc<ResourceTypeCatalog>>,
}

impl IndexConfig {
    /// Validates resource types against `catalog`.
    pub fn with_catalog(catalog: ResourceTypeCatalog) -> Self {
        Self {
            resource_types: Some(Arc::new(catalog)),
        }
    }

    /// Accepts any resource type.
    pub fn permissive() -> Self {
        Self {
            resource_types: None,
        }
    }

    /// Returns `true` if a record with `resource_type` may be indexed.
    pub fn accepts_type(&self, resource_type: &str) -> bool {
        self.resource_types
            .as_ref()
            .map_or(true, |catalog| catalog.contains(resource_type))
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::with_catalog(ResourceTypeCatalog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_matches_constant() {
        let catalog = ResourceTypeCatalog::default();
        assert_eq!(catalog.len(), DEFAULT_RESOURCE_TYPES.len());
        assert_eq!(
            catalog.iter().collect::<Vec<_>>(),
            DEFAULT_RESOURCE_TYPES.to_vec()
        );
    }

    #[test]
    fn test_catalog_is_case_sensitive() {
        let catalog = ResourceTypeCatalog::default();
        assert!(catalog.contains("Notes"));
        assert!(!catalog.contains("notes"));
        assert!(!catalog.contains("Slides"));
    }

    #[test]
    fn test_from_types_drops_blank_and_repeated() {
        let catalog = ResourceTypeCatalog::from_types(["Notes", " ", "Labs", "Notes", " Labs "]);
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["Notes", "Labs"]);
    }

    #[test]
    fn test_permissive_accepts_anything() {
        let config = IndexConfig::permissive();
        assert!(config.accepts_type("Anything"));

        let strict = IndexConfig::default();
        assert!(strict.accepts_type("CTs"));
        assert!(!strict.accepts_type("Anything"));
    }

    #[test]
    fn test_config_deserializes_type_list() {
        let config: IndexConfig =
            serde_json::from_str(r#"{"resource_types": ["Notes", "Labs"]}"#).unwrap();
        assert!(config.accepts_type("Labs"));
        assert!(!config.accepts_type("PPTs"));

        let config: IndexConfig =
            serde_json::from_str(r#"{"resource_types": ["Labs", "Labs", ""]}"#).unwrap();
        assert_eq!(config.resource_types.unwrap().len(), 1);

        let config: IndexConfig = serde_json::from_str("{}").unwrap();
        assert!(config.accepts_type("PPTs"));
    }

    #[test]
    fn test_rating_bounds_reasonable() {
        let (min, max) = (MIN_RATING, MAX_RATING);
        assert!(min < max);
        assert_eq!(max, 5.0);
    }
}
