// Rust guideline compliant 2026-10-14

//! Ordered indices over records, sorted by submission time.
//!
//! Every index orders records by [`SubmissionKey`]: `submitted_at`
//! ascending, ties broken by `id`. The store answers its queries from the
//! canonical [`SubmissionIndex`], a thin wrapper over `BTreeMap`. The three
//! hand-built trees ([`PlainTree`], [`AvlTree`], [`RedBlackTree`]) implement
//! the same [`OrderedIndex`] contract and serve as reference oracles: the
//! audit rebuilds them from the canonical list and cross-checks the results.
//!
//! The trees are arenas. Nodes live in a `Vec` and refer to each other by
//! slot index, so parent and child links never form ownership cycles.

mod avl;
mod canonical;
mod plain;
mod red_black;

pub use avl::AvlTree;
pub use canonical::SubmissionIndex;
pub use plain::PlainTree;
pub use red_black::{Color, RedBlackTree};

use crate::models::{Record, RecordId, SubmissionKey};
use std::sync::Arc;
use thiserror::Error;

/// Shared contract of the submission-ordered indices.
pub trait OrderedIndex {
    /// Inserts a record at its submission-order position.
    ///
    /// # Returns
    ///
    /// `false` if a record with the same id was already present, whatever
    /// its submission time, in which case the index is unchanged.
    fn insert(&mut self, record: Arc<Record>) -> bool;

    /// Finds a record by identifier.
    fn search(&self, id: RecordId) -> Option<Arc<Record>>;

    /// Finds a record by its full submission key.
    fn get(&self, key: &SubmissionKey) -> Option<Arc<Record>>;

    /// Returns every record in ascending submission order.
    fn in_order(&self) -> Vec<Arc<Record>>;

    /// Returns the number of records in the index.
    fn len(&self) -> usize;

    /// Returns true if the index holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A broken structural invariant found while verifying a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// In-order traversal is not strictly ascending.
    #[error("keys out of order at position {position}")]
    OutOfOrder {
        /// Position in the in-order sequence of the first offending key.
        position: usize,
    },

    /// A cached AVL height disagrees with the recomputed one.
    #[error("stored height {stored} differs from actual height {actual}")]
    HeightMismatch {
        /// Height cached in the node.
        stored: i32,
        /// Height recomputed from the children.
        actual: i32,
    },

    /// An AVL node's balance factor lies outside `-1..=1`.
    #[error("balance factor {balance} out of range")]
    Unbalanced {
        /// Left height minus right height.
        balance: i32,
    },

    /// The red-black root is red.
    #[error("root is red")]
    RedRoot,

    /// A red node has a red child.
    #[error("red node has a red child")]
    RedChildOfRed,

    /// Two root-to-leaf paths cross a different number of black nodes.
    #[error("black height {left} on the left differs from {right} on the right")]
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
}

/// Returns arena slots in in-order sequence.
///
/// Iterative, so a degenerate chain of any length cannot overflow the stack.
pub(crate) fn in_order_slots<F>(root: Option<usize>, children: F) -> Vec<usize>
where
    F: Fn(usize) -> (Option<usize>, Option<usize>),
{
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut current = root;

    loop {
        while let Some(slot) = current {
            stack.push(slot);
            current = children(slot).0;
        }
        let Some(slot) = stack.pop() else {
            break;
        };
        out.push(slot);
        current = children(slot).1;
    }

    out
}

/// Returns the number of nodes on the longest root-to-leaf path.
pub(crate) fn subtree_height<F>(root: Option<usize>, children: F) -> usize
where
    F: Fn(usize) -> (Option<usize>, Option<usize>),
{
    let mut deepest = 0;
    let mut stack: Vec<(usize, usize)> = root.map(|slot| (slot, 1)).into_iter().collect();

    while let Some((slot, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        let (left, right) = children(slot);
        stack.extend(left.map(|l| (l, depth + 1)));
        stack.extend(right.map(|r| (r, depth + 1)));
    }

    deepest
}

/// Checks that a key sequence is strictly ascending.
pub(crate) fn check_ascending<'a, I>(keys: I) -> Result<(), InvariantViolation>
where
    I: IntoIterator<Item = &'a SubmissionKey>,
{
    let mut previous: Option<&SubmissionKey> = None;
    for (position, key) in keys.into_iter().enumerate() {
        if previous.is_some_and(|prev| prev >= key) {
            return Err(InvariantViolation::OutOfOrder { position });
        }
        previous = Some(key);
    }
    Ok(())
}
