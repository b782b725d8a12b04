//! Prefix trie for display-name autocompletion.
//!
//! Nodes live in a single arena and refer to their children by index, so the
//! trie has no parent pointers and no shared ownership. Each edge is one
//! `char`; children are kept in a `BTreeMap` so a depth-first walk yields
//! names in code-point order.
//!
//! Matching is exact: `"algo"` does not complete `"Algorithms"`.
//!
//! Inserting the same name twice bumps a counter on its terminal node;
//! [`PrefixIndex::with_prefix`] still returns the name once.

use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    /// Complete name ending at this node
    terminal: Option<String>,
    /// Number of insertions of `terminal`
    occurrences: usize,
}

/// Character trie over display names.
#[derive(Debug)]
pub struct PrefixIndex {
    nodes: Vec<TrieNode>,
    distinct_names: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            distinct_names: 0,
        }
    }

    /// Records `name` along its character path.
    pub fn insert(&mut self, name: &str) {
        let mut current = ROOT;
        for ch in name.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, next);
                    next
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.terminal.is_none() {
            node.terminal = Some(name.to_string());
            self.distinct_names += 1;
        }
        node.occurrences += 1;
    }

    /// Returns every distinct name starting with `prefix`, in code-point
    /// order. An empty prefix returns every name.
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if let Some(name) = &node.terminal {
                names.push(name.clone());
            }
            // Reverse so the smallest child is popped first
            stack.extend(node.children.values().rev().copied());
        }
        names
    }

    /// Returns `true` if `name` was inserted as a complete name.
    pub fn contains(&self, name: &str) -> bool {
        self.find_node(name)
            .is_some_and(|index| self.nodes[index].terminal.is_some())
    }

    /// Number of times `name` was inserted.
    pub fn occurrences(&self, name: &str) -> usize {
        self.find_node(name)
            .map_or(0, |index| self.nodes[index].occurrences)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.distinct_names
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_names == 0
    }

    fn find_node(&self, path: &str) -> Option<usize> {
        path.chars().try_fold(ROOT, |current, ch| {
            self.nodes[current].children.get(&ch).copied()
        })
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}
