// Rust guideline compliant 2026-10-14

//! Cross-check of the reference trees against the canonical index.

use crate::index::{AvlTree, OrderedIndex, PlainTree, RedBlackTree, SubmissionIndex};
use crate::models::{Record, RecordId};
use serde::Serialize;
use std::sync::Arc;

/// Result of checking one reference tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    /// Tree name.
    pub name: &'static str,
    /// Number of records held.
    pub len: usize,
    /// Nodes on the longest root-to-leaf path.
    pub height: usize,
    /// True if the in-order traversal matches the canonical index.
    pub matches_canonical: bool,
    /// Broken structural invariant, if any.
    pub violation: Option<String>,
}

impl TreeReport {
    /// Returns true if the tree matches and has no violation.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.matches_canonical && self.violation.is_none()
    }
}

/// Integrity report over every ordered index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexAudit {
    /// Records in the canonical list.
    pub records: usize,
    /// Records in the canonical ordered index.
    pub canonical_len: usize,
    /// Nodes in the relationship graph.
    pub graph_nodes: usize,
    /// Edges in the relationship graph.
    pub graph_edges: usize,
    /// Records in the persistent heap.
    pub heap_len: usize,
    /// Unbalanced tree report.
    pub plain: TreeReport,
    /// AVL tree report.
    pub avl: TreeReport,
    /// Red-black tree report.
    pub red_black: TreeReport,
    /// Black height of the red-black tree, when its invariants hold.
    pub black_height: Option<usize>,
}

impl IndexAudit {
    /// Returns true if every index holds the canonical records and every tree is sound.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.canonical_len == self.records
            && self.graph_nodes == self.records
            && self.heap_len == self.records
            && self.plain.is_ok()
            && self.avl.is_ok()
            && self.red_black.is_ok()
    }
}

/// Sizes of the store-maintained structures, captured under the read lock.
pub(crate) struct LiveCounts {
    pub records: usize,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub heap_len: usize,
}

/// Builds the reference trees from `records` and compares them to `canonical`.
pub(crate) fn run(records: &[Arc<Record>], canonical: &SubmissionIndex, live: LiveCounts) -> IndexAudit {
    let expected: Vec<RecordId> = canonical.in_order().iter().map(|r| r.id).collect();

    let mut plain = PlainTree::new();
    let mut avl = AvlTree::new();
    let mut red_black = RedBlackTree::new();
    for record in records {
        plain.insert(Arc::clone(record));
        avl.insert(Arc::clone(record));
        red_black.insert(Arc::clone(record));
    }

    let matches = |index: &dyn OrderedIndex| -> bool {
        index.in_order().iter().map(|r| r.id).eq(expected.iter().copied())
    };

    let rb_check = red_black.verify();
    let audit = IndexAudit {
        records: live.records,
        canonical_len: canonical.len(),
        graph_nodes: live.graph_nodes,
        graph_edges: live.graph_edges,
        heap_len: live.heap_len,
        plain: TreeReport {
            name: "plain",
            len: plain.len(),
            height: plain.height(),
            matches_canonical: matches(&plain),
            violation: None,
        },
        avl: TreeReport {
            name: "avl",
            len: avl.len(),
            height: avl.height(),
            matches_canonical: matches(&avl),
            violation: avl.verify().err().map(|v| v.to_string()),
        },
        red_black: TreeReport {
            name: "red_black",
            len: red_black.len(),
            height: red_black.height(),
            matches_canonical: matches(&red_black),
            violation: rb_check.as_ref().err().map(ToString::to_string),
        },
        black_height: rb_check.ok(),
    };

    if !audit.is_consistent() {
        tracing::warn!(?audit, "Index audit found inconsistencies");
    }
    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_audit_of_ascending_records() {
        let t0 = Utc::now();
        let records: Vec<Arc<Record>> = (0..64)
            .map(|i| Arc::new(Record::at(t0 + Duration::minutes(i), "A", "Roads", "")))
            .collect();
        let canonical: SubmissionIndex = records.iter().cloned().collect();
        let audit = run(
            &records,
            &canonical,
            LiveCounts {
                records: 64,
                graph_nodes: 64,
                graph_edges: 0,
                heap_len: 64,
            },
        );

        assert!(audit.is_consistent());
        assert_eq!(audit.plain.height, 64);
        assert!(audit.avl.height < 10);
        assert!(audit.black_height.is_some());
    }

    #[test]
    fn test_audit_flags_count_mismatch() {
        let records = vec![Arc::new(Record::new("A", "Roads", ""))];
        let canonical: SubmissionIndex = records.iter().cloned().collect();
        let audit = run(
            &records,
            &canonical,
            LiveCounts {
                records: 1,
                graph_nodes: 0,
                graph_edges: 0,
                heap_len: 1,
            },
        );
        assert!(!audit.is_consistent());
    }
}
