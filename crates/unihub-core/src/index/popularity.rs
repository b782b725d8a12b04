//! Download-count ranking with in-place key updates.
//!
//! Entries live in an ordered set keyed by `(Reverse(count), seq, id)`, where
//! `seq` is the order in which the identifier was first registered. A
//! position map from identifier to its current `(count, seq)` lets an update
//! remove the old key before inserting the new one, so every identifier has
//! exactly one entry no matter how often its count changes.
//!
//! Ranking is descending by count; equal counts keep first-registration
//! order.

use super::types::ResourceId;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

type RankKey = (Reverse<u64>, u64, ResourceId);

#[derive(Debug, Clone, Copy)]
struct Position {
    count: u64,
    seq: u64,
}

/// Ranking of identifiers by download count.
#[derive(Debug, Default)]
pub struct PopularityIndex {
    ranking: BTreeSet<RankKey>,
    positions: HashMap<ResourceId, Position>,
    next_seq: u64,
}

impl PopularityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` with `count`, or moves an existing entry to `count`.
    pub fn record_or_update(&mut self, id: &ResourceId, count: u64) {
        match self.positions.get_mut(id.as_str()) {
            Some(position) => {
                if position.count == count {
                    return;
                }
                let stale = (Reverse(position.count), position.seq, id.clone());
                self.ranking.remove(&stale);
                position.count = count;
                self.ranking.insert((Reverse(count), position.seq, id.clone()));
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.positions.insert(id.clone(), Position { count, seq });
                self.ranking.insert((Reverse(count), seq, id.clone()));
            }
        }
    }

    /// Up to `k` identifiers, most downloaded first.
    pub fn top_k(&self, k: usize) -> impl Iterator<Item = &ResourceId> + '_ {
        self.ranking.iter().take(k).map(|(_, _, id)| id)
    }

    /// Current ranked count for `id`.
    pub fn count_of(&self, id: &str) -> Option<u64> {
        self.positions.get(id).map(|position| position.count)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(index: &PopularityIndex, k: usize) -> Vec<&str> {
        index.top_k(k).map(ResourceId::as_str).collect()
    }

    fn id(s: &str) -> ResourceId {
        ResourceId::from(s)
    }

    #[test]
    fn test_descending_by_count() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("a"), 5);
        index.record_or_update(&id("b"), 20);
        index.record_or_update(&id("c"), 1);

        assert_eq!(top(&index, 3), vec!["b", "a", "c"]);
        assert_eq!(top(&index, 2), vec!["b", "a"]);
    }

    #[test]
    fn test_k_larger_than_len() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("a"), 1);
        assert_eq!(top(&index, 10), vec!["a"]);
        assert!(top(&index, 0).is_empty());
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("z"), 3);
        index.record_or_update(&id("a"), 3);
        index.record_or_update(&id("m"), 3);
        assert_eq!(top(&index, 3), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_update_moves_entry_without_duplicating() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("a"), 5);
        index.record_or_update(&id("b"), 20);
        index.record_or_update(&id("c"), 1);

        for count in 2..=10 {
            index.record_or_update(&id("c"), count);
        }

        assert_eq!(top(&index, 2), vec!["b", "c"]);
        assert_eq!(top(&index, 10), vec!["b", "c", "a"]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.count_of("c"), Some(10));
    }

    #[test]
    fn test_update_keeps_original_seq_for_ties() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("first"), 1);
        index.record_or_update(&id("second"), 2);

        // Raising "first" to match "second" puts it ahead on the tie
        index.record_or_update(&id("first"), 2);
        assert_eq!(top(&index, 2), vec!["first", "second"]);
    }

    #[test]
    fn test_same_count_update_is_noop() {
        let mut index = PopularityIndex::new();
        index.record_or_update(&id("a"), 4);
        index.record_or_update(&id("a"), 4);
        assert_eq!(index.len(), 1);
        assert_eq!(top(&index, 5), vec!["a"]);
    }

    #[test]
    fn test_unknown_id() {
        let index = PopularityIndex::new();
        assert_eq!(index.count_of("nope"), None);
        assert!(!index.contains("nope"));
        assert!(index.is_empty());
    }
}
