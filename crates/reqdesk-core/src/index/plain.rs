// Rust guideline compliant 2026-10-14

//! Unbalanced binary search tree.

use super::{in_order_slots, subtree_height, OrderedIndex};
use crate::models::{Record, RecordId, SubmissionKey};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Node {
    key: SubmissionKey,
    record: Arc<Record>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree without rebalancing.
///
/// Requests normally arrive in increasing `submitted_at` order, which turns
/// this tree into a right-leaning chain: height equals the record count and
/// insert and lookup cost O(n). That is expected behavior, not a defect.
#[derive(Debug, Clone, Default)]
pub struct PlainTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    ids: HashSet<RecordId>,
}

impl PlainTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        subtree_height(self.root, |slot| self.children(slot))
    }

    fn children(&self, slot: usize) -> (Option<usize>, Option<usize>) {
        (self.nodes[slot].left, self.nodes[slot].right)
    }

    fn alloc(&mut self, key: SubmissionKey, record: Arc<Record>) -> usize {
        self.nodes.push(Node {
            key,
            record,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }
}

impl OrderedIndex for PlainTree {
    fn insert(&mut self, record: Arc<Record>) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        let key = record.submission_key();
        let Some(mut current) = self.root else {
            let slot = self.alloc(key, record);
            self.root = Some(slot);
            return true;
        };

        loop {
            match key.cmp(&self.nodes[current].key) {
                Ordering::Less => match self.nodes[current].left {
                    Some(next) => current = next,
                    None => {
                        let slot = self.alloc(key, record);
                        self.nodes[current].left = Some(slot);
                        return true;
                    }
                },
                Ordering::Greater => match self.nodes[current].right {
                    Some(next) => current = next,
                    None => {
                        let slot = self.alloc(key, record);
                        self.nodes[current].right = Some(slot);
                        return true;
                    }
                },
                Ordering::Equal => return false,
            }
        }
    }

    fn search(&self, id: RecordId) -> Option<Arc<Record>> {
        // The tree is keyed by submission time first, so a bare id needs a full walk.
        in_order_slots(self.root, |slot| self.children(slot))
            .into_iter()
            .find(|&slot| self.nodes[slot].key.id == id)
            .map(|slot| Arc::clone(&self.nodes[slot].record))
    }

    fn get(&self, key: &SubmissionKey) -> Option<Arc<Record>> {
        let mut current = self.root;
        while let Some(slot) = current {
            let node = &self.nodes[slot];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(Arc::clone(&node.record)),
            };
        }
        None
    }

    fn in_order(&self) -> Vec<Arc<Record>> {
        in_order_slots(self.root, |slot| self.children(slot))
            .into_iter()
            .map(|slot| Arc::clone(&self.nodes[slot].record))
            .collect()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
