// Rust guideline compliant 2026-10-14

//! The multi-index service request store.
//!
//! [`Store`] owns the canonical record list and keeps every index derived
//! from it in step: the submission-ordered index, a min-priority heap, the
//! relationship graph, and lookup maps by id and tracking code. All of that
//! state sits behind one reader-writer lock. Writers hold the write lock
//! until the snapshot is saved; readers share the read lock and so never
//! see indices half rebuilt.

use crate::audit::{self, IndexAudit, LiveCounts};
use crate::graph::{RelationshipGraph, WeightedEdge};
use crate::heap::{HeapOrder, PriorityHeap};
use crate::index::{OrderedIndex, SubmissionIndex};
use crate::migrate::migrate_issues;
use crate::models::{Record, RecordId, RecordUpdate, Status};
use crate::storage::SnapshotStore;
use crate::tracking::{code_key, TrackingCodeGenerator};
use crate::{Config, Result};
use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<Arc<Record>>,
    index: SubmissionIndex,
    heap: PriorityHeap,
    graph: RelationshipGraph,
    by_id: HashMap<RecordId, Arc<Record>>,
    by_code: HashMap<String, RecordId>,
}

impl StoreState {
    /// Rebuilds every derived structure from the canonical list.
    fn from_records(records: Vec<Arc<Record>>) -> Self {
        let graph = RelationshipGraph::from_records(&records);
        let index: SubmissionIndex = records.iter().cloned().collect();
        let heap = PriorityHeap::from_records(HeapOrder::Min, records.iter().cloned());
        let by_id = records.iter().map(|r| (r.id, Arc::clone(r))).collect();
        let by_code = records
            .iter()
            .map(|r| (code_key(&r.tracking_code), r.id))
            .collect();

        tracing::debug!(
            records = records.len(),
            edges = graph.edge_count(),
            "Rebuilt indices"
        );

        Self {
            records,
            index,
            heap,
            graph,
            by_id,
            by_code,
        }
    }

    /// Appends one record and updates each structure incrementally.
    fn push(&mut self, record: Arc<Record>) {
        self.graph
            .connect(&record, self.records.iter().map(Arc::as_ref));
        self.index.insert(Arc::clone(&record));
        self.heap.insert(Arc::clone(&record));
        self.by_code
            .insert(code_key(&record.tracking_code), record.id);
        self.by_id.insert(record.id, Arc::clone(&record));
        self.records.push(record);
    }

    fn code_taken(&self, code: &str) -> bool {
        self.by_code.contains_key(&code_key(code))
    }
}

/// In-memory service request store backed by a snapshot.
///
/// # Examples
///
/// ```
/// use reqdesk_core::{Config, MemoryStorage, Record, Store};
///
/// let store = Store::open(MemoryStorage::new(), &Config::default());
/// let stored = store.insert(Record::new("Main St", "Roads", "Pothole")).unwrap();
/// assert!(stored.tracking_code.starts_with("REQ-"));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct Store<S: SnapshotStore> {
    storage: S,
    generator: TrackingCodeGenerator,
    state: RwLock<StoreState>,
}

impl<S: SnapshotStore> Store<S> {
    /// Opens a store over `storage`.
    ///
    /// Loads the snapshot if one exists. Otherwise legacy issues are
    /// migrated and saved straight away. Load failures are logged and
    /// degrade to migration, then to an empty store, so opening never fails.
    /// Records repeating an earlier id are dropped; records with a missing
    /// or duplicate tracking code get a fresh one.
    pub fn open(storage: S, config: &Config) -> Self {
        let generator = TrackingCodeGenerator::from_config(config);

        let loaded = match storage.load() {
            Ok(Some(records)) => {
                tracing::debug!(count = records.len(), "Loaded snapshot");
                records
            }
            Ok(None) => Self::migrate_legacy(&storage, &generator),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load snapshot; falling back to legacy data");
                Self::migrate_legacy(&storage, &generator)
            }
        };

        let records = Self::normalize(loaded, &generator);
        Self {
            storage,
            generator,
            state: RwLock::new(StoreState::from_records(records)),
        }
    }

    fn migrate_legacy(storage: &S, generator: &TrackingCodeGenerator) -> Vec<Record> {
        let issues = match storage.load_legacy() {
            Ok(issues) => issues,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load legacy issues");
                Vec::new()
            }
        };
        if issues.is_empty() {
            return Vec::new();
        }

        let records = migrate_issues(issues, generator, Utc::now(), &mut rand::thread_rng());
        tracing::info!(count = records.len(), "Migrated legacy issues");

        let shared: Vec<Arc<Record>> = records.iter().cloned().map(Arc::new).collect();
        if let Err(e) = storage.save(&shared) {
            tracing::warn!(error = %e, "Failed to save migrated records");
        }
        records
    }

    fn normalize(loaded: Vec<Record>, generator: &TrackingCodeGenerator) -> Vec<Arc<Record>> {
        let year = Utc::now().year();
        let mut rng = rand::thread_rng();
        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        let mut records = Vec::with_capacity(loaded.len());

        for mut record in loaded {
            if !ids.insert(record.id) {
                tracing::warn!(id = %record.id, "Dropping record with duplicate id");
                continue;
            }
            let key = code_key(&record.tracking_code);
            if key.is_empty() || codes.contains(&key) {
                record.tracking_code = generator.generate(year, &mut rng, |c| codes.contains(&code_key(c)));
                tracing::warn!(id = %record.id, code = %record.tracking_code, "Assigned tracking code");
            }
            codes.insert(code_key(&record.tracking_code));
            records.push(Arc::new(record));
        }

        records
    }

    /// Returns the snapshot collaborator.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the tracking code generator.
    pub fn generator(&self) -> &TrackingCodeGenerator {
        &self.generator
    }

    /// Adds a record and persists the canonical list.
    ///
    /// A missing tracking code is generated, as is one that collides
    /// (case-insensitively) with an existing code. A record whose id is
    /// already stored is ignored and the stored record returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved. The record stays
    /// in memory in that case.
    pub fn insert(&self, record: Record) -> Result<Arc<Record>> {
        let mut state = self.state.write();

        if let Some(existing) = state.by_id.get(&record.id) {
            tracing::debug!(id = %record.id, "Record already stored");
            return Ok(Arc::clone(existing));
        }

        let mut record = record;
        let code = record.tracking_code.trim();
        if code.is_empty() || state.code_taken(code) {
            if !code.is_empty() {
                tracing::warn!(code = %code, "Tracking code already in use; generating another");
            }
            let year = Utc::now().year();
            record.tracking_code =
                self.generator
                    .generate(year, &mut rand::thread_rng(), |c| state.code_taken(c));
        }

        let record = Arc::new(record);
        state.push(Arc::clone(&record));
        tracing::debug!(id = %record.id, code = %record.tracking_code, "Inserted record");

        self.storage.save(&state.records)?;
        Ok(record)
    }

    /// Applies `update` to the record it names and rebuilds every index.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved. The update stays
    /// applied in memory in that case.
    pub fn update(&self, update: RecordUpdate) -> Result<Option<Arc<Record>>> {
        let mut state = self.state.write();

        let Some(position) = state.records.iter().position(|r| r.id == update.id) else {
            return Ok(None);
        };

        let mut record = Record::clone(&state.records[position]);
        record.apply(&update, Utc::now());
        let record = Arc::new(record);

        let mut records = std::mem::take(&mut state.records);
        records[position] = Arc::clone(&record);
        *state = StoreState::from_records(records);
        tracing::debug!(id = %record.id, status = %record.status, "Updated record");

        self.storage.save(&state.records)?;
        Ok(Some(record))
    }

    /// Looks up a record by id.
    pub fn get_by_id(&self, id: RecordId) -> Option<Arc<Record>> {
        self.state.read().by_id.get(&id).cloned()
    }

    /// Looks up a record by tracking code, ignoring case.
    pub fn get_by_tracking_code(&self, code: &str) -> Option<Arc<Record>> {
        let state = self.state.read();
        state
            .by_code
            .get(&code_key(code))
            .and_then(|id| state.by_id.get(id))
            .cloned()
    }

    /// Looks up a record through the ordered index.
    pub fn search_index(&self, id: RecordId) -> Option<Arc<Record>> {
        self.state.read().index.search(id)
    }

    /// Returns every record, oldest submission first.
    pub fn list_sorted_by_submission(&self) -> Vec<Arc<Record>> {
        self.state.read().index.in_order()
    }

    /// Returns every record in canonical (insertion) order.
    pub fn all(&self) -> Vec<Arc<Record>> {
        self.state.read().records.clone()
    }

    /// Returns the records with `status`, newest submission first.
    pub fn by_status(&self, status: Status) -> Vec<Arc<Record>> {
        let state = self.state.read();
        let mut matches: Vec<Arc<Record>> = state
            .graph
            .node_ids()
            .filter_map(|id| state.by_id.get(&id))
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matches
    }

    /// Returns records in `category` (ignoring case) reachable in the graph.
    ///
    /// Walks breadth-first from the first canonical record of the category
    /// and keeps the records of that category. Records of the same category
    /// outside that connected component are not returned.
    pub fn by_category(&self, category: &str) -> Vec<Arc<Record>> {
        let wanted = category.to_lowercase();
        let state = self.state.read();

        let Some(start) = state
            .records
            .iter()
            .find(|r| r.category.to_lowercase() == wanted)
        else {
            return Vec::new();
        };

        state
            .graph
            .breadth_first_search(start.id)
            .into_iter()
            .filter_map(|id| state.by_id.get(&id))
            .filter(|r| r.category.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Filters every record by category (ignoring case) and status.
    ///
    /// A full scan: unlike [`Store::by_category`] it finds records outside
    /// the first record's connected component. Either filter may be absent.
    /// Results are newest submission first.
    pub fn search(&self, category: Option<&str>, status: Option<Status>) -> Vec<Arc<Record>> {
        let wanted = category.map(str::to_lowercase);
        let state = self.state.read();
        let mut matches: Vec<Arc<Record>> = state
            .records
            .iter()
            .filter(|r| wanted.as_ref().map_or(true, |c| r.category.to_lowercase() == *c))
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        matches
    }

    /// Returns the distinct categories in the order they were first filed.
    ///
    /// Categories differing only by case are listed separately.
    pub fn categories(&self) -> Vec<String> {
        let state = self.state.read();
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for record in &state.records {
            if seen.insert(record.category.as_str()) {
                categories.push(record.category.clone());
            }
        }
        categories
    }

    /// Returns up to `k` records, most urgent first.
    ///
    /// Ties on priority go to the earlier submission. Extraction runs on a
    /// throwaway heap; the persistent one is left intact.
    pub fn top_priority(&self, k: usize) -> Vec<Arc<Record>> {
        let state = self.state.read();
        let mut heap = PriorityHeap::from_records(HeapOrder::Min, state.records.iter().cloned());
        drop(state);
        std::iter::from_fn(|| heap.extract_min()).take(k).collect()
    }

    /// Returns the most urgent record without removing it.
    pub fn most_urgent(&self) -> Option<Arc<Record>> {
        self.state.read().heap.peek().cloned()
    }

    /// Returns up to `k` records related to `id`, most similar first.
    ///
    /// Unknown ids yield an empty list.
    pub fn related_to(&self, id: RecordId, k: usize) -> Vec<Arc<Record>> {
        let state = self.state.read();
        state
            .graph
            .neighbors_by_weight(id)
            .into_iter()
            .take(k)
            .filter_map(|(neighbor, _)| state.by_id.get(&neighbor).cloned())
            .collect()
    }

    /// Returns the edges of the minimum spanning tree (or forest).
    pub fn minimum_spanning_tree(&self) -> Vec<WeightedEdge> {
        self.state.read().graph.minimum_spanning_tree()
    }

    /// Returns the records touched by the minimum spanning tree.
    ///
    /// Each record appears once, in the order its first edge was taken.
    /// Isolated records are not included.
    pub fn minimum_spanning_tree_records(&self) -> Vec<Arc<Record>> {
        let state = self.state.read();
        let mut seen = HashSet::new();
        state
            .graph
            .minimum_spanning_tree()
            .into_iter()
            .flat_map(|edge| [edge.from, edge.to])
            .filter(|id| seen.insert(*id))
            .filter_map(|id| state.by_id.get(&id).cloned())
            .collect()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Rebuilds the reference trees and cross-checks every index.
    pub fn audit(&self) -> IndexAudit {
        let state = self.state.read();
        audit::run(
            &state.records,
            &state.index,
            LiveCounts {
                records: state.records.len(),
                graph_nodes: state.graph.node_count(),
                graph_edges: state.graph.edge_count(),
                heap_len: state.heap.len(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegacyIssue, Priority};
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn store() -> Store<MemoryStorage> {
        Store::open(MemoryStorage::new(), &Config::default())
    }

    #[test]
    fn test_insert_assigns_code_and_saves() {
        let store = store();
        let stored = store.insert(Record::new("Main St", "Roads", "Pothole")).unwrap();
        assert!(stored.tracking_code.starts_with("REQ-"));
        assert_eq!(store.storage().save_count(), 1);
        assert_eq!(
            store.get_by_tracking_code(&stored.tracking_code.to_lowercase()).map(|r| r.id),
            Some(stored.id)
        );
    }

    #[test]
    fn test_duplicate_id_is_ignored() {
        let store = store();
        let record = Record::new("Main St", "Roads", "Pothole");
        let first = store.insert(record.clone()).unwrap();
        let second = store.insert(record).unwrap();
        assert_eq!(first.tracking_code, second.tracking_code);
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_colliding_code_is_replaced() {
        let store = store();
        let mut a = Record::new("Main St", "Roads", "");
        a.tracking_code = "REQ-2026-123456".to_string();
        let mut b = Record::new("Elm St", "Water", "");
        b.tracking_code = "req-2026-123456".to_string();

        store.insert(a).unwrap();
        let b = store.insert(b).unwrap();
        assert_ne!(code_key(&b.tracking_code), "req-2026-123456");
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let store = store();
        store.storage().set_failing(true);
        assert!(store.insert(Record::new("Main St", "Roads", "")).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let store = store();
        let record = Record::new("Main St", "Roads", "");
        assert!(store.update(RecordUpdate::from_record(&record)).unwrap().is_none());
    }

    #[test]
    fn test_open_migrates_legacy_when_no_snapshot() {
        let issue = LegacyIssue {
            id: RecordId::new(),
            submitted_at: Utc::now() - Duration::days(20),
            location: "Main St".to_string(),
            category: "Water".to_string(),
            description: "Burst pipe".to_string(),
            attachments: Vec::new(),
        };
        let store = Store::open(MemoryStorage::with_legacy(vec![issue.clone()]), &Config::default());

        let migrated = store.get_by_id(issue.id).unwrap();
        assert_eq!(migrated.status, Status::InProgress);
        assert_eq!(migrated.priority, Priority::HIGHEST);
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_open_survives_load_failure() {
        let storage = MemoryStorage::new();
        storage.set_failing(true);
        let store = Store::open(storage, &Config::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_drops_duplicate_ids_and_fills_codes() {
        let record = Record::new("Main St", "Roads", "");
        let store = Store::open(
            MemoryStorage::with_records(vec![record.clone(), record.clone()]),
            &Config::default(),
        );
        assert_eq!(store.len(), 1);
        assert!(!store.get_by_id(record.id).unwrap().tracking_code.is_empty());
        assert!(store.audit().is_consistent());
    }
}
