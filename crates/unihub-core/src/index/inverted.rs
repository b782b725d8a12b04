//! Inverted index for exact keyword lookup.
//!
//! A record's display name, subject and resource type are split on
//! whitespace; each word is lowercased and stripped of ASCII punctuation.
//! Each tag is lowercased and indexed whole, spaces included.
//!
//! Lookup is single-token and exact: `"struct"` does not find
//! `"structures"`, and `"data structures"` finds nothing because no token
//! contains a space. Splitting multi-word queries is left to callers.
//!
//! # Posting lists
//!
//! Posting lists keep first-indexed order and hold each identifier at most
//! once. A record's tokens are all appended in a single pass, so a repeat of
//! the same identifier can only ever be the list's last element. Checking
//! the tail is enough to deduplicate at write time.

use super::types::{ResourceId, ResourceRecord};
use std::collections::HashMap;
use tracing::instrument;

/// Splits free text into normalised search tokens.
///
/// Whitespace-separated words are lowercased and stripped of ASCII
/// punctuation; words that end up empty are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(normalize_word)
}

fn normalize_word(word: &str) -> Option<String> {
    let token: String = word
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect();
    (!token.is_empty()).then_some(token)
}

/// Token → identifiers map.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<ResourceId>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` under every token derived from its text fields and tags.
    #[instrument(skip_all, fields(id = %record.id))]
    pub fn index(&mut self, record: &ResourceRecord) {
        let text_fields = [
            record.display_name.as_str(),
            record.subject.as_str(),
            record.resource_type.as_str(),
        ];
        for token in text_fields.into_iter().flat_map(tokenize) {
            self.post(token, &record.id);
        }

        for tag in &record.tags {
            let token = tag.to_lowercase();
            if !token.is_empty() {
                self.post(token, &record.id);
            }
        }
    }

    /// Identifiers whose text contains `keyword` as a whole token
    /// (case-insensitive).
    pub fn search(&self, keyword: &str) -> &[ResourceId] {
        self.postings
            .get(keyword.to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates every (token, posting list) pair in arbitrary order.
    pub fn postings(&self) -> impl Iterator<Item = (&str, &[ResourceId])> {
        self.postings
            .iter()
            .map(|(token, ids)| (token.as_str(), ids.as_slice()))
    }

    /// Number of distinct tokens.
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    fn post(&mut self, token: String, id: &ResourceId) {
        let ids = self.postings.entry(token).or_default();
        if ids.last() != Some(id) {
            ids.push(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> ResourceRecord {
        ResourceRecord::new(id, name)
            .with_subject("CSE")
            .with_type("Notes")
    }

    #[test]
    fn test_tokenize_strips_and_lowercases() {
        let tokens: Vec<_> = tokenize("Data-Structures, (Part 2): Trees!").collect();
        assert_eq!(tokens, vec!["datastructures", "part", "2", "trees"]);
    }

    #[test]
    fn test_tokenize_drops_punctuation_only_words() {
        let tokens: Vec<_> = tokenize("Notes -- & ...  Slides").collect();
        assert_eq!(tokens, vec!["notes", "slides"]);
        assert_eq!(tokenize("   ").count(), 0);
    }

    #[test]
    fn test_search_matches_all_text_fields() {
        let mut index = InvertedIndex::new();
        index.index(&record("a.pdf", "Data Structures Notes"));

        for keyword in ["data", "structures", "notes", "cse", "CSE", "Structures"] {
            assert_eq!(index.search(keyword), &[ResourceId::from("a.pdf")], "{keyword}");
        }
    }

    #[test]
    fn test_exact_token_only() {
        let mut index = InvertedIndex::new();
        index.index(&record("a.pdf", "Data Structures Notes"));

        assert!(index.search("struct").is_empty());
        assert!(index.search("data structures").is_empty());
        assert!(index.search("").is_empty());
    }

    #[test]
    fn test_keyword_punctuation_is_not_stripped() {
        let mut index = InvertedIndex::new();
        index.index(&record("a.pdf", "Graphs!"));
        assert_eq!(index.search("graphs").len(), 1);
        assert!(index.search("graphs!").is_empty());
    }

    #[test]
    fn test_repeated_token_posts_once() {
        let mut index = InvertedIndex::new();
        let rec = record("a.pdf", "Notes notes NOTES").with_tags(["Notes", "notes"]);
        index.index(&rec);

        // "notes" appears in the name, the type and both tags
        assert_eq!(index.search("notes"), &[ResourceId::from("a.pdf")]);
    }

    #[test]
    fn test_tags_are_whole_tokens() {
        let mut index = InvertedIndex::new();
        index.index(&record("a.pdf", "Intro").with_tags(["Dynamic Programming", "DP!", ""]));

        assert_eq!(index.search("dynamic programming").len(), 1);
        assert!(index.search("dynamic").is_empty());
        assert_eq!(index.search("dp!").len(), 1);
        assert!(index.search("dp").is_empty());
    }

    #[test]
    fn test_posting_order_follows_indexing_order() {
        let mut index = InvertedIndex::new();
        index.index(&record("z.pdf", "Trees"));
        index.index(&record("a.pdf", "Trees"));
        index.index(&record("m.pdf", "Trees"));

        let ids: Vec<_> = index.search("trees").iter().map(ResourceId::as_str).collect();
        assert_eq!(ids, vec!["z.pdf", "a.pdf", "m.pdf"]);
    }

    #[test]
    fn test_token_count() {
        let mut index = InvertedIndex::new();
        assert!(index.is_empty());
        index.index(&ResourceRecord::new("a", "one two").with_tags(["three"]));
        assert_eq!(index.token_count(), 3);
    }
}
