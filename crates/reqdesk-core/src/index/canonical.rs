// Rust guideline compliant 2026-10-14

//! Canonical ordered index backed by the standard library B-tree.

use super::OrderedIndex;
use crate::models::{Record, RecordId, SubmissionKey};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Submission-ordered index used by the store for its queries.
///
/// A side map from id to key makes `search` O(log n) instead of the full
/// walk the oracle trees need. A duplicate id is rejected even when its
/// timestamp differs, so the index never holds two versions of a record.
#[derive(Debug, Clone, Default)]
pub struct SubmissionIndex {
    entries: BTreeMap<SubmissionKey, Arc<Record>>,
    keys: HashMap<RecordId, SubmissionKey>,
}

impl SubmissionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates records in ascending submission order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> + '_ {
        self.entries.values()
    }
}

impl OrderedIndex for SubmissionIndex {
    fn insert(&mut self, record: Arc<Record>) -> bool {
        if self.keys.contains_key(&record.id) {
            return false;
        }
        let key = record.submission_key();
        self.keys.insert(record.id, key);
        self.entries.insert(key, record);
        true
    }

    fn search(&self, id: RecordId) -> Option<Arc<Record>> {
        self.keys
            .get(&id)
            .and_then(|key| self.entries.get(key))
            .cloned()
    }

    fn get(&self, key: &SubmissionKey) -> Option<Arc<Record>> {
        self.entries.get(key).cloned()
    }

    fn in_order(&self) -> Vec<Arc<Record>> {
        self.entries.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<Arc<Record>> for SubmissionIndex {
    fn from_iter<I: IntoIterator<Item = Arc<Record>>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
