// Rust guideline compliant 2026-10-14

//! Red-black binary search tree (insertion only).

use super::{check_ascending, in_order_slots, subtree_height, InvariantViolation, OrderedIndex};
use crate::models::{Record, RecordId, SubmissionKey};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node.
    Red,
    /// Black node.
    Black,
}

#[derive(Debug, Clone)]
struct Node {
    key: SubmissionKey,
    record: Arc<Record>,
    color: Color,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

/// Red-black tree keyed by submission order.
///
/// New nodes are inserted red and the classic insertion fixup restores the
/// invariants: recolor when the uncle is red, rotate and recolor when it is
/// black. Deletion is not supported.
#[derive(Debug, Clone, Default)]
pub struct RedBlackTree {
    nodes: Vec<Node>,
    root: Option<usize>,
    ids: HashSet<RecordId>,
}

impl RedBlackTree {
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

    /// Returns the color of the root, if any.
    #[must_use]
    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|slot| self.nodes[slot].color)
    }

    /// Verifies ordering and the red-black invariants.
    ///
    /// # Returns
    ///
    /// The black height (black nodes on every root-to-leaf path, not
    /// counting the empty leaves).
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn verify(&self) -> Result<usize, InvariantViolation> {
        let slots = in_order_slots(self.root, |slot| self.children(slot));
        check_ascending(slots.iter().map(|&slot| &self.nodes[slot].key))?;
        if self.root_color() == Some(Color::Red) {
            return Err(InvariantViolation::RedRoot);
        }
        self.black_height(self.root)
    }

    fn black_height(&self, node: Option<usize>) -> Result<usize, InvariantViolation> {
        let Some(slot) = node else {
            return Ok(0);
        };
        let current = &self.nodes[slot];
        if current.color == Color::Red
            && (self.is_red(current.left) || self.is_red(current.right))
        {
            return Err(InvariantViolation::RedChildOfRed);
        }
        let left = self.black_height(current.left)?;
        let right = self.black_height(current.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }
        Ok(left + usize::from(current.color == Color::Black))
    }

    fn children(&self, slot: usize) -> (Option<usize>, Option<usize>) {
        (self.nodes[slot].left, self.nodes[slot].right)
    }

    fn is_red(&self, node: Option<usize>) -> bool {
        node.is_some_and(|slot| self.nodes[slot].color == Color::Red)
    }

    /// Points whatever referenced `old` (parent link or root) at `new`.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let Some(y) = self.nodes[x].right else {
            return;
        };
        let inner = self.nodes[y].left;
        self.nodes[x].right = inner;
        if let Some(child) = inner {
            self.nodes[child].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: usize) {
        let Some(y) = self.nodes[x].left else {
            return;
        };
        let inner = self.nodes[y].right;
        self.nodes[x].left = inner;
        if let Some(child) = inner {
            self.nodes[child].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn fix_insert(&mut self, mut node: usize) {
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].color == Color::Black {
                break;
            }
            // A red parent is never the root once fixup has run, but the
            // loop still terminates if it is: the root is blackened below.
            let Some(grandparent) = self.nodes[parent].parent else {
                break;
            };

            if self.nodes[grandparent].left == Some(parent) {
                let uncle = self.nodes[grandparent].right;
                if let Some(uncle) = uncle.filter(|&u| self.nodes[u].color == Color::Red) {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if self.nodes[parent].right == Some(node) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    if let Some(parent) = self.nodes[node].parent {
                        self.nodes[parent].color = Color::Black;
                        if let Some(grandparent) = self.nodes[parent].parent {
                            self.nodes[grandparent].color = Color::Red;
                            self.rotate_right(grandparent);
                        }
                    }
                }
            } else {
                let uncle = self.nodes[grandparent].left;
                if let Some(uncle) = uncle.filter(|&u| self.nodes[u].color == Color::Red) {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    node = grandparent;
                } else {
                    if self.nodes[parent].left == Some(node) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    if let Some(parent) = self.nodes[node].parent {
                        self.nodes[parent].color = Color::Black;
                        if let Some(grandparent) = self.nodes[parent].parent {
                            self.nodes[grandparent].color = Color::Red;
                            self.rotate_left(grandparent);
                        }
                    }
                }
            }
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }
}

impl OrderedIndex for RedBlackTree {
    fn insert(&mut self, record: Arc<Record>) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        let key = record.submission_key();
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;

        while let Some(slot) = current {
            parent = Some(slot);
            match key.cmp(&self.nodes[slot].key) {
                Ordering::Less => {
                    went_left = true;
                    current = self.nodes[slot].left;
                }
                Ordering::Greater => {
                    went_left = false;
                    current = self.nodes[slot].right;
                }
                Ordering::Equal => return false,
            }
        }

        self.nodes.push(Node {
            key,
            record,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        });
        let slot = self.nodes.len() - 1;

        match parent {
            None => self.root = Some(slot),
            Some(p) if went_left => self.nodes[p].left = Some(slot),
            Some(p) => self.nodes[p].right = Some(slot),
        }

        self.fix_insert(slot);
        true
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
