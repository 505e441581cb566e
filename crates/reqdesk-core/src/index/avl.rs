// Rust guideline compliant 2026-10-14

//! Height-balanced (AVL) binary search tree.

use super::{check_ascending, in_order_slots, InvariantViolation, OrderedIndex};
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
    height: i32,
}

/// AVL tree keyed by submission order.
///
/// After each insertion heights are recomputed on the way back up, and any
/// node whose balance factor (left height minus right height) leaves
/// `-1..=1` is fixed with a single or double rotation. Height stays within
/// `1.44 * log2(n + 2)`.
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    ids: HashSet<RecordId>,
}

impl AvlTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the height of the tree (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        // Heights are never negative.
        self.height_of(self.root) as usize
    }

    /// Verifies ordering, cached heights and balance factors.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let slots = in_order_slots(self.root, |slot| self.children(slot));
        check_ascending(slots.iter().map(|&slot| &self.nodes[slot].key))?;
        self.verify_subtree(self.root).map(|_| ())
    }

    fn verify_subtree(&self, node: Option<usize>) -> Result<i32, InvariantViolation> {
        let Some(slot) = node else {
            return Ok(0);
        };
        let left = self.verify_subtree(self.nodes[slot].left)?;
        let right = self.verify_subtree(self.nodes[slot].right)?;
        let actual = left.max(right) + 1;
        let stored = self.nodes[slot].height;
        if stored != actual {
            return Err(InvariantViolation::HeightMismatch { stored, actual });
        }
        let balance = left - right;
        if !(-1..=1).contains(&balance) {
            return Err(InvariantViolation::Unbalanced { balance });
        }
        Ok(actual)
    }

    fn children(&self, slot: usize) -> (Option<usize>, Option<usize>) {
        (self.nodes[slot].left, self.nodes[slot].right)
    }

    fn height_of(&self, node: Option<usize>) -> i32 {
        node.map_or(0, |slot| self.nodes[slot].height)
    }

    fn balance_of(&self, slot: usize) -> i32 {
        self.height_of(self.nodes[slot].left) - self.height_of(self.nodes[slot].right)
    }

    fn refresh_height(&mut self, slot: usize) {
        let height = self
            .height_of(self.nodes[slot].left)
            .max(self.height_of(self.nodes[slot].right))
            + 1;
        self.nodes[slot].height = height;
    }

    fn rotate_right(&mut self, y: usize) -> usize {
        let Some(x) = self.nodes[y].left else {
            return y;
        };
        let t2 = self.nodes[x].right;
        self.nodes[x].right = Some(y);
        self.nodes[y].left = t2;
        self.refresh_height(y);
        self.refresh_height(x);
        x
    }

    fn rotate_left(&mut self, x: usize) -> usize {
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        let t2 = self.nodes[y].left;
        self.nodes[y].left = Some(x);
        self.nodes[x].right = t2;
        self.refresh_height(x);
        self.refresh_height(y);
        y
    }

    /// Inserts below `node` and returns the slot of the new subtree root.
    fn insert_below(
        &mut self,
        node: Option<usize>,
        key: SubmissionKey,
        record: &Arc<Record>,
        inserted: &mut bool,
    ) -> usize {
        let Some(slot) = node else {
            *inserted = true;
            self.nodes.push(Node {
                key,
                record: Arc::clone(record),
                left: None,
                right: None,
                height: 1,
            });
            return self.nodes.len() - 1;
        };

        match key.cmp(&self.nodes[slot].key) {
            Ordering::Less => {
                let child = self.insert_below(self.nodes[slot].left, key, record, inserted);
                self.nodes[slot].left = Some(child);
            }
            Ordering::Greater => {
                let child = self.insert_below(self.nodes[slot].right, key, record, inserted);
                self.nodes[slot].right = Some(child);
            }
            Ordering::Equal => return slot,
        }

        self.refresh_height(slot);
        let balance = self.balance_of(slot);

        if balance > 1 {
            if let Some(left) = self.nodes[slot].left {
                // Left-right: straighten the left child first.
                if key > self.nodes[left].key {
                    let pivot = self.rotate_left(left);
                    self.nodes[slot].left = Some(pivot);
                }
                return self.rotate_right(slot);
            }
        }

        if balance < -1 {
            if let Some(right) = self.nodes[slot].right {
                // Right-left: straighten the right child first.
                if key < self.nodes[right].key {
                    let pivot = self.rotate_right(right);
                    self.nodes[slot].right = Some(pivot);
                }
                return self.rotate_left(slot);
            }
        }

        slot
    }
}

impl OrderedIndex for AvlTree {
    fn insert(&mut self, record: Arc<Record>) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        let key = record.submission_key();
        let mut inserted = false;
        let root = self.insert_below(self.root, key, &record, &mut inserted);
        self.root = Some(root);
        inserted
    }

    fn search(&self, id: RecordId) -> Option<Arc<Record>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn records_at(hours: &[i64]) -> Vec<Arc<Record>> {
        let t0 = Utc::now();
        hours
            .iter()
            .map(|&h| Arc::new(Record::at(t0 + Duration::hours(h), "Main St", "Roads", "")))
            .collect()
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for record in records_at(&(0..1000).collect::<Vec<_>>()) {
            tree.insert(record);
        }
        assert_eq!(tree.len(), 1000);
        assert!(tree.height() <= 15, "height {} too large", tree.height());
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn test_all_four_rotation_cases() {
        // LL, RR, LR and RL patterns on three nodes each end up with height 2.
        for pattern in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
            let mut tree = AvlTree::new();
            for record in records_at(&pattern) {
                tree.insert(record);
            }
            assert_eq!(tree.height(), 2, "pattern {:?}", pattern);
            assert_eq!(tree.verify(), Ok(()));
        }
    }

    #[test]
    fn test_in_order_is_sorted_after_rotations() {
        let records = records_at(&[5, 9, 1, 7, 3, 8, 2, 6, 4, 0]);
        let mut tree = AvlTree::new();
        for record in &records {
            tree.insert(Arc::clone(record));
        }
        let keys: Vec<SubmissionKey> = tree.in_order().iter().map(|r| r.submission_key()).collect();
        let mut expected: Vec<SubmissionKey> = records.iter().map(|r| r.submission_key()).collect();
        expected.sort();
        assert_eq!(keys, expected);
    }
}
