//! Structure statistics and the cross-structure consistency audit.

use super::{structure, ResourceIndex};
use crate::error::IndexError;
use crate::index::inverted::tokenize;
use crate::index::types::{IndexStats, ResourceId, ResourceRecord};
use tracing::{debug, error};

impl ResourceIndex {
    /// Entry counts for every owned structure.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            resources: self.primary.len(),
            ordered_entries: self.ordered.len(),
            distinct_names: self.names.len(),
            ranked_entries: self.popularity.len(),
            tokens: self.keywords.token_count(),
            graph_nodes: self.relations.node_count(),
            relationships: self.relations.edge_count(),
            tags: self.tags.len(),
            uploaders: self.uploaders.len(),
        }
    }

    /// Checks that every structure agrees with the primary store.
    ///
    /// Each record must be reachable from every structure that derives keys
    /// from it, and every identifier held by a secondary structure must
    /// resolve to a record. This walks every structure in full; it is meant
    /// for tests and diagnostics, not for the request path.
    ///
    /// # Errors
    /// [`IndexError::InvariantViolation`] naming the first structure found
    /// out of sync.
    pub fn verify_consistency(&self) -> Result<(), IndexError> {
        for record in self.primary.iter() {
            self.verify_record(record)?;
        }

        self.verify_resolvable(structure::ORDERED, self.ordered.all_in_order())?;
        self.verify_resolvable(structure::POPULARITY, self.popularity.top_k(usize::MAX))?;
        self.verify_resolvable(
            structure::KEYWORDS,
            self.keywords.postings().flat_map(|(_, ids)| ids),
        )?;
        self.verify_resolvable(structure::RELATIONS, self.relations.nodes())?;
        self.verify_resolvable(structure::TAGS, self.tags.iter().flat_map(|(_, ids)| ids))?;
        self.verify_resolvable(
            structure::UPLOADERS,
            self.uploaders.iter().flat_map(|(_, ids)| ids),
        )?;

        debug!(resources = self.primary.len(), "Consistency check passed");
        Ok(())
    }

    /// Checks that `record` is present in every structure it feeds.
    fn verify_record(&self, record: &ResourceRecord) -> Result<(), IndexError> {
        let id = &record.id;
        let violation = |structure: &'static str| {
            error!(structure, id = %id, "Resource missing from secondary structure");
            IndexError::InvariantViolation {
                structure,
                id: id.clone(),
            }
        };

        if !self.ordered.contains(id.as_str()) {
            return Err(violation(structure::ORDERED));
        }
        if !self.names.contains(&record.display_name) {
            return Err(violation(structure::NAMES));
        }
        if self.popularity.count_of(id.as_str()) != Some(record.download_count) {
            return Err(violation(structure::POPULARITY));
        }
        if !self.relations.contains(id.as_str()) {
            return Err(violation(structure::RELATIONS));
        }

        let text_fields = [
            record.display_name.as_str(),
            record.subject.as_str(),
            record.resource_type.as_str(),
        ];
        let tag_tokens = record.tags.iter().map(|tag| tag.to_lowercase());
        let mut tokens = text_fields.into_iter().flat_map(tokenize).chain(tag_tokens);
        if tokens.any(|token| !token.is_empty() && !self.keywords.search(&token).contains(id)) {
            return Err(violation(structure::KEYWORDS));
        }

        if record
            .tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .any(|tag| !self.tags.get(tag).contains(id))
        {
            return Err(violation(structure::TAGS));
        }
        if !record.uploader.is_empty() && !self.uploaders.get(&record.uploader).contains(id) {
            return Err(violation(structure::UPLOADERS));
        }

        Ok(())
    }

    fn verify_resolvable<'a, I>(&'a self, structure: &'static str, ids: I) -> Result<(), IndexError>
    where
        I: IntoIterator<Item = &'a ResourceId>,
    {
        ids.into_iter()
            .try_for_each(|id| self.resolve_one(structure, id).map(|_| ()))
    }
}
