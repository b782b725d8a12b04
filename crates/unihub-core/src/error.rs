//! Error types for unihub-core.
//!
//! Every facade operation returns [`IndexError`]. Caller mistakes
//! (`DuplicateIdentifier`, `NotFound`, `InvalidRecord`) are ordinary
//! failures. `InvariantViolation` and `LockPoisoned` mean the index itself is
//! broken and must be surfaced as internal errors.

use crate::index::ResourceId;
use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// A resource with this identifier is already indexed
    #[error("Resource already exists: {0}")]
    DuplicateIdentifier(ResourceId),
    /// No resource with this identifier is indexed
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),
    /// A structure disagrees with the primary store about a resource, e.g. it
    /// yielded an identifier the primary store does not hold
    #[error("Index invariant violated: {structure} is out of sync for '{id}'")]
    InvariantViolation {
        /// Name of the structure that disagrees with the primary store
        structure: &'static str,
        /// The affected identifier
        id: ResourceId,
    },
    /// Record failed validation before insertion or update
    #[error("Invalid resource record: {0}")]
    InvalidRecord(String),
    /// A thread panicked while holding the shared index lock
    #[error("Index lock poisoned")]
    LockPoisoned,
}

impl IndexError {
    /// Returns `true` for errors that indicate a bug in the index rather
    /// than a bad request from the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            IndexError::InvariantViolation { .. } | IndexError::LockPoisoned
        )
    }
}
