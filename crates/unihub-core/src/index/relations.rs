//! Undirected "related resources" graph.
//!
//! Node weights are identifiers; a side map from identifier to
//! [`NodeIndex`] gives constant-time endpoint lookup. Edges carry no weight
//! and are deduplicated, so connecting the same pair twice leaves a single
//! edge. Self-edges are ignored.

use super::types::ResourceId;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Symmetric adjacency between resource identifiers.
#[derive(Debug, Default)]
pub struct RelationshipGraph {
    graph: UnGraph<ResourceId, ()>,
    id_to_node: HashMap<ResourceId, NodeIndex>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as a node if it is not one yet.
    pub fn add_node(&mut self, id: &ResourceId) -> NodeIndex {
        if let Some(&node) = self.id_to_node.get(id.as_str()) {
            return node;
        }
        let node = self.graph.add_node(id.clone());
        self.id_to_node.insert(id.clone(), node);
        node
    }

    /// Connects `a` and `b`, registering either endpoint if new.
    ///
    /// Returns `true` if a new edge was created.
    pub fn connect(&mut self, a: &ResourceId, b: &ResourceId) -> bool {
        if a == b {
            return false;
        }
        let a = self.add_node(a);
        let b = self.add_node(b);
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    /// Identifiers directly connected to `id`, in ascending order.
    ///
    /// Empty when `id` is unknown or has no edges.
    pub fn neighbors_of(&self, id: &str) -> Vec<ResourceId> {
        let Some(&node) = self.id_to_node.get(id) else {
            return Vec::new();
        };
        let mut neighbors: Vec<ResourceId> = self
            .graph
            .neighbors(node)
            .map(|neighbor| self.graph[neighbor].clone())
            .collect();
        neighbors.sort();
        neighbors
    }

    /// Returns `true` if an edge joins `a` and `b`.
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        match (self.id_to_node.get(a), self.id_to_node.get(b)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Every registered node, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &ResourceId> {
        self.graph
            .node_indices()
            .map(move |node| &self.graph[node])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
