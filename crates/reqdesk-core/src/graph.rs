// Rust guideline compliant 2026-10-14

//! Relationship graph between service requests.
//!
//! Two requests are related when they share a category, a location, a
//! status, or were submitted within a day of each other. Each shared trait
//! adds to a similarity score and the edge weight is its inverse, so the
//! lightest edges join the most closely related requests. That inversion is
//! what makes the minimum spanning tree the strongest relationship backbone.

use crate::models::{Record, RecordId};
use chrono::Duration;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{Bfs, Dfs, EdgeRef};
use rayon::prelude::*;
use std::collections::HashMap;

/// Score for a matching category.
pub const CATEGORY_SCORE: f64 = 1.0;
/// Score for a matching location (case-insensitive).
pub const LOCATION_SCORE: f64 = 0.5;
/// Score for a matching status.
pub const STATUS_SCORE: f64 = 0.3;
/// Score for submissions less than [`PROXIMITY_WINDOW_HOURS`] apart.
pub const PROXIMITY_SCORE: f64 = 0.2;
/// Width of the submission-time proximity window.
pub const PROXIMITY_WINDOW_HOURS: i64 = 24;

/// Computes the similarity score of two records.
///
/// # Returns
///
/// A score between 0.0 (nothing in common) and 2.0.
#[must_use]
pub fn similarity(a: &Record, b: &Record) -> f64 {
    let mut score = 0.0;
    if a.category == b.category {
        score += CATEGORY_SCORE;
    }
    if a.location.to_lowercase() == b.location.to_lowercase() {
        score += LOCATION_SCORE;
    }
    if a.status == b.status {
        score += STATUS_SCORE;
    }
    let gap = if a.submitted_at >= b.submitted_at {
        a.submitted_at - b.submitted_at
    } else {
        b.submitted_at - a.submitted_at
    };
    if gap < Duration::hours(PROXIMITY_WINDOW_HOURS) {
        score += PROXIMITY_SCORE;
    }
    score
}

/// Returns the edge weight between two records, or `None` if they share nothing.
#[must_use]
pub fn edge_weight(a: &Record, b: &Record) -> Option<f64> {
    let score = similarity(a, b);
    (score > 0.0).then(|| 1.0 / score)
}

/// An undirected weighted edge between two records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    /// One endpoint.
    pub from: RecordId,
    /// The other endpoint.
    pub to: RecordId,
    /// Inverse similarity.
    pub weight: f64,
}

/// Weighted undirected graph over record ids.
///
/// Nodes and edges live in a petgraph arena and are addressed by index.
/// Traversals keep their visited set local to the call, so concurrent
/// readers never interfere.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    graph: UnGraph<RecordId, f64>,
    id_to_node: HashMap<RecordId, NodeIndex>,
}

impl RelationshipGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the full graph from a record list.
    ///
    /// Every pair is scored (O(n²)); scoring runs in parallel for large
    /// inputs. Edges are added in `(i, j)` order regardless, so the result
    /// does not depend on thread scheduling.
    pub fn from_records<R>(records: &[R]) -> Self
    where
        R: AsRef<Record> + Sync,
    {
        const PARALLEL_THRESHOLD: usize = 256;

        let mut graph = Self::new();
        for record in records {
            graph.add_node(record.as_ref().id);
        }

        let score_row = |i: usize| -> Vec<(usize, f64)> {
            let a = records[i].as_ref();
            records[i + 1..]
                .iter()
                .enumerate()
                .filter_map(|(offset, b)| edge_weight(a, b.as_ref()).map(|w| (i + 1 + offset, w)))
                .collect()
        };

        let rows: Vec<Vec<(usize, f64)>> = if records.len() >= PARALLEL_THRESHOLD {
            (0..records.len()).into_par_iter().map(score_row).collect()
        } else {
            (0..records.len()).map(score_row).collect()
        };

        for (i, row) in rows.into_iter().enumerate() {
            for (j, weight) in row {
                graph.add_edge(records[i].as_ref().id, records[j].as_ref().id, weight);
            }
        }

        graph
    }

    /// Adds a node for `id` unless one already exists.
    pub fn add_node(&mut self, id: RecordId) {
        if !self.id_to_node.contains_key(&id) {
            let node = self.graph.add_node(id);
            self.id_to_node.insert(id, node);
        }
    }

    /// Adds an undirected edge.
    ///
    /// # Returns
    ///
    /// `false` if either endpoint is not a node of the graph.
    pub fn add_edge(&mut self, from: RecordId, to: RecordId, weight: f64) -> bool {
        match (self.id_to_node.get(&from), self.id_to_node.get(&to)) {
            (Some(&a), Some(&b)) => {
                self.graph.add_edge(a, b, weight);
                true
            }
            _ => false,
        }
    }

    /// Adds `record` as a node and links it to every related record in `others`.
    ///
    /// This is the O(n) step run on every insertion.
    ///
    /// # Returns
    ///
    /// The number of edges added.
    pub fn connect<'a, I>(&mut self, record: &Record, others: I) -> usize
    where
        I: IntoIterator<Item = &'a Record>,
    {
        self.add_node(record.id);
        let mut added = 0;
        for other in others {
            if other.id == record.id {
                continue;
            }
            if let Some(weight) = edge_weight(record, other) {
                if self.add_edge(record.id, other.id, weight) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Returns true if `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.id_to_node.contains_key(&id)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns every node id in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.graph.node_indices().map(move |node| self.graph[node])
    }

    /// Returns the neighbors of `id` with their edge weights, lightest first.
    ///
    /// Unknown ids yield an empty list.
    #[must_use]
    pub fn neighbors_by_weight(&self, id: RecordId) -> Vec<(RecordId, f64)> {
        let Some(&node) = self.id_to_node.get(&id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<(RecordId, f64)> = self
            .graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other], *edge.weight())
            })
            .collect();
        neighbors.sort_by(|a, b| a.1.total_cmp(&b.1));
        neighbors
    }

    /// Breadth-first traversal from `start`.
    ///
    /// # Returns
    ///
    /// Ids in visit order, starting with `start`; empty if `start` is unknown.
    #[must_use]
    pub fn breadth_first_search(&self, start: RecordId) -> Vec<RecordId> {
        let Some(&start) = self.id_to_node.get(&start) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut visited = Vec::new();
        while let Some(node) = bfs.next(&self.graph) {
            visited.push(self.graph[node]);
        }
        visited
    }

    /// Depth-first (preorder) traversal from `start`.
    ///
    /// # Returns
    ///
    /// Ids in visit order, starting with `start`; empty if `start` is unknown.
    #[must_use]
    pub fn depth_first_search(&self, start: RecordId) -> Vec<RecordId> {
        let Some(&start) = self.id_to_node.get(&start) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start);
        let mut visited = Vec::new();
        while let Some(node) = dfs.next(&self.graph) {
            visited.push(self.graph[node]);
        }
        visited
    }

    /// Returns every edge, in insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<WeightedEdge> {
        self.graph
            .edge_references()
            .map(|edge| WeightedEdge {
                from: self.graph[edge.source()],
                to: self.graph[edge.target()],
                weight: *edge.weight(),
            })
            .collect()
    }

    /// Computes a minimum spanning tree with Kruskal's algorithm.
    ///
    /// Edges are taken lightest first (ties keep insertion order) and kept
    /// when they join two different components of a union-find forest with
    /// path compression and union by rank. The scan stops once
    /// `node_count - 1` edges are kept. A disconnected graph yields a
    /// minimum spanning forest.
    #[must_use]
    pub fn minimum_spanning_tree(&self) -> Vec<WeightedEdge> {
        let node_count = self.graph.node_count();
        if node_count < 2 {
            return Vec::new();
        }

        let mut sorted: Vec<_> = self.graph.edge_references().collect();
        sorted.sort_by(|a, b| a.weight().total_cmp(b.weight()));

        let mut components = UnionFind::<usize>::new(node_count);
        let mut tree = Vec::with_capacity(node_count - 1);

        for edge in sorted {
            if components.union(edge.source().index(), edge.target().index()) {
                tree.push(WeightedEdge {
                    from: self.graph[edge.source()],
                    to: self.graph[edge.target()],
                    weight: *edge.weight(),
                });
                if tree.len() == node_count - 1 {
                    break;
                }
            }
        }

        tree
    }
}
