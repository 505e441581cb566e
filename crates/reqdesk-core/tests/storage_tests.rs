// Rust guideline compliant 2026-10-14

//! Unit tests for the storage module.
//!
//! These tests validate specific examples, edge cases, and error conditions.

use chrono::{Duration, Utc};
use reqdesk_core::{
    Config, JsonlStorage, LegacyIssue, Record, RecordId, SnapshotStore, Status, Store,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a JSONL storage in a temp dir.
fn setup() -> (TempDir, JsonlStorage) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = JsonlStorage::new(temp_dir.path().join("requests.jsonl"))
        .expect("Failed to create storage")
        .with_legacy(temp_dir.path().join("issues.jsonl"))
        .expect("Failed to set legacy path");
    (temp_dir, storage)
}

#[test]
fn test_empty_file_handling() {
    let (_temp_dir, storage) = setup();
    assert!(storage.load().expect("Failed to load").is_none());
    assert!(storage.load_all().expect("Failed to load").is_empty());
}

#[test]
fn test_round_trip_through_store() {
    let (_temp_dir, storage) = setup();
    let path = storage.path().to_path_buf();

    let store = Store::open(storage, &Config::default());
    let mut record = Record::new("Main St", "Roads", "Pothole near the school");
    record.attachments = vec!["uploads/pothole.jpg".to_string()];
    let stored = store.insert(record).expect("Failed to insert");
    drop(store);

    let reopened = Store::open(JsonlStorage::new(path).unwrap(), &Config::default());
    let loaded = reopened.get_by_id(stored.id).expect("record persisted");
    assert_eq!(*loaded, *stored);
}

#[test]
fn test_malformed_json_recovery() {
    let (_temp_dir, storage) = setup();
    let good = Record::new("Main St", "Roads", "ok");
    let content = format!(
        "{}\n{{not json}}\n\n{{\"id\":\"bad\",\"submitted_at\":\"2026-01-01T00:00:00Z\"}}\n",
        serde_json::to_string(&good).unwrap()
    );
    fs::write(storage.path(), content).expect("Failed to write test file");

    let records = storage.load_all().expect("Failed to load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, good.id);
}

#[test]
fn test_out_of_range_priority_line_is_skipped() {
    let (_temp_dir, storage) = setup();
    let good = Record::new("Main St", "Roads", "ok");
    let mut bad = serde_json::to_value(Record::new("Elm St", "Water", "")).unwrap();
    bad["priority"] = serde_json::json!(9);
    let content = format!("{}\n{}\n", serde_json::to_string(&good).unwrap(), bad);
    fs::write(storage.path(), content).unwrap();

    assert_eq!(storage.load_all().unwrap().len(), 1);
}

#[test]
fn test_save_overwrites() {
    let (_temp_dir, storage) = setup();
    let first: Vec<Arc<Record>> = (0..3).map(|_| Arc::new(Record::new("A", "B", ""))).collect();
    storage.save(&first).unwrap();
    storage.save(&first[..1]).unwrap();

    let loaded = storage.load().unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, first[0].id);
}

#[test]
fn test_lock_contention_is_reported() {
    use fs2::FileExt;

    let (_temp_dir, storage) = setup();
    let lock_file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(storage.path().with_extension("lock"))
        .unwrap();
    lock_file.lock_exclusive().unwrap();

    let result = storage.save(&[Arc::new(Record::new("A", "B", ""))]);
    assert!(matches!(result, Err(reqdesk_core::Error::Lock(_))));

    lock_file.unlock().unwrap();
    storage.save(&[]).unwrap();
}

#[test]
fn test_legacy_migration_on_first_open() {
    let (_temp_dir, storage) = setup();
    let issues = [
        LegacyIssue {
            id: RecordId::new(),
            submitted_at: Utc::now() - Duration::days(40),
            location: "Main St".to_string(),
            category: "Sanitation".to_string(),
            description: "Bins not collected".to_string(),
            attachments: Vec::new(),
        },
        LegacyIssue {
            id: RecordId::new(),
            submitted_at: Utc::now() - Duration::days(9),
            location: "Elm St".to_string(),
            category: "Lighting".to_string(),
            description: "Whole block is dark".to_string(),
            attachments: Vec::new(),
        },
    ];
    let legacy: String = issues
        .iter()
        .map(|i| serde_json::to_string(i).unwrap() + "\n")
        .collect();
    fs::write(storage.legacy_path().unwrap(), legacy).unwrap();
    let path = storage.path().to_path_buf();

    let store = Store::open(storage, &Config::default());
    assert_eq!(store.len(), 2);
    assert!(path.exists(), "migrated records are saved immediately");

    let sanitation = store.get_by_id(issues[0].id).unwrap();
    assert_eq!(sanitation.status, Status::Resolved);
    assert_eq!(sanitation.priority.get(), 4);
    let lighting = store.get_by_id(issues[1].id).unwrap();
    assert_eq!(lighting.status, Status::UnderReview);
    assert_eq!(lighting.priority.get(), 3);
    assert_ne!(sanitation.tracking_code, lighting.tracking_code);
}

#[test]
fn test_existing_snapshot_skips_legacy() {
    let (_temp_dir, storage) = setup();
    storage.save(&[]).unwrap();
    let issue = LegacyIssue {
        id: RecordId::new(),
        submitted_at: Utc::now(),
        location: String::new(),
        category: String::new(),
        description: String::new(),
        attachments: Vec::new(),
    };
    fs::write(storage.legacy_path().unwrap(), serde_json::to_string(&issue).unwrap()).unwrap();

    let store = Store::open(storage, &Config::default());
    assert!(store.is_empty());
}
