// Rust guideline compliant 2026-10-14

//! End-to-end integration tests for Reqdesk workflows.

use reqdesk_app::{Changes, ListOptions, Submission};
use reqdesk_cli::output::{BackboneEdge, Finding};
use reqdesk_cli::{commands, OutputFormatter};
use reqdesk_core::{IndexAudit, JsonlStorage, Record, Status};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct CaptureFormatter {
    captured: Mutex<Vec<Record>>,
    edges: Mutex<Vec<BackboneEdge>>,
}

impl CaptureFormatter {
    fn new() -> Self {
        Self {
            captured: Mutex::new(Vec::new()),
            edges: Mutex::new(Vec::new()),
        }
    }

    fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.captured.lock().expect("capture lock"))
    }
}

impl OutputFormatter for CaptureFormatter {
    fn format_record(&self, record: &Record) -> String {
        self.captured
            .lock()
            .expect("capture lock")
            .push(record.clone());
        "ok".to_string()
    }

    fn format_list(&self, records: &[Arc<Record>]) -> String {
        self.captured
            .lock()
            .expect("capture lock")
            .extend(records.iter().map(|r| (**r).clone()));
        "ok".to_string()
    }

    fn format_categories(&self, categories: &[String]) -> String {
        categories.join(",")
    }

    fn format_backbone(&self, edges: &[BackboneEdge]) -> String {
        self.edges
            .lock()
            .expect("capture lock")
            .extend_from_slice(edges);
        "ok".to_string()
    }

    fn format_report(&self, _findings: &[Finding], _audit: &IndexAudit) -> String {
        "ok".to_string()
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        error.to_string()
    }
}

fn submit(root: &Path, formatter: &CaptureFormatter, location: &str, category: &str, priority: u8) -> Record {
    commands::submit::execute(
        Some(root),
        Submission {
            location: location.to_string(),
            category: category.to_string(),
            description: format!("{} problem", category),
            priority: Some(priority),
            attachments: vec![],
        },
        formatter,
    )
    .expect("Submit failed");
    formatter.take().pop().expect("Submitted record")
}

#[test]
fn test_full_workflow_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    let formatter = CaptureFormatter::new();

    commands::init::execute(Some(root), &formatter).expect("Init failed");
    assert!(root.join(".reqdesk/config.toml").exists());

    let pothole = submit(root, &formatter, "Main St", "Roads", 3);
    let crack = submit(root, &formatter, "Main St", "Roads", 1);
    let leak = submit(root, &formatter, "Elm St", "Water", 2);
    assert!(pothole.tracking_code.starts_with("REQ-"));

    commands::top::execute(Some(root), Some(2), &formatter).expect("Top failed");
    let top: Vec<_> = formatter.take().into_iter().map(|r| r.id).collect();
    assert_eq!(top, vec![crack.id, leak.id]);

    commands::related::execute(Some(root), &pothole.tracking_code, None, &formatter)
        .expect("Related failed");
    let related = formatter.take();
    assert_eq!(related[0].id, crack.id);

    commands::update::execute(
        Some(root),
        &pothole.tracking_code.to_lowercase(),
        Changes {
            status: Some("in-progress".to_string()),
            assigned_to: Some("crew-4".to_string()),
            ..Changes::default()
        },
        &formatter,
    )
    .expect("Update failed");
    let updated = formatter.take().pop().expect("Updated record");
    assert_eq!(updated.status, Status::InProgress);
    assert_eq!(updated.tracking_code, pothole.tracking_code);
    assert!(updated.updated_at.is_some());

    commands::list::execute(
        Some(root),
        &ListOptions {
            status: Some("in_progress".to_string()),
            ..ListOptions::default()
        },
        &formatter,
    )
    .expect("List failed");
    let in_progress = formatter.take();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].assigned_to.as_deref(), Some("crew-4"));

    commands::backbone::execute(Some(root), &formatter).expect("Backbone failed");
    let edges = formatter.edges.lock().expect("capture lock").clone();
    assert!(!edges.is_empty());
    assert!(edges
        .iter()
        .all(|e| e.from.starts_with("REQ-") && e.to.starts_with("REQ-")));

    let storage = JsonlStorage::new(root.join(".reqdesk/requests.jsonl")).expect("storage");
    let saved = storage.load_all().expect("Failed to load requests");
    assert_eq!(saved.len(), 3);
    let saved_pothole = saved
        .iter()
        .find(|r| r.id == pothole.id)
        .expect("Saved pothole");
    assert_eq!(saved_pothole.status, Status::InProgress);
}

#[test]
fn test_commands_require_initialized_workspace() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let formatter = CaptureFormatter::new();

    let error = commands::show::execute(Some(temp_dir.path()), "REQ-2026-000001", &formatter)
        .expect_err("Show should fail");
    assert!(error.to_string().contains("rqd init"));
}

#[test]
fn test_show_unknown_request_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let formatter = CaptureFormatter::new();
    commands::init::execute(Some(temp_dir.path()), &formatter).expect("Init failed");

    let error = commands::show::execute(Some(temp_dir.path()), "REQ-2026-999999", &formatter)
        .expect_err("Show should fail");
    assert!(error.to_string().contains("REQ-2026-999999"));
}

#[test]
fn test_update_without_changes_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let formatter = CaptureFormatter::new();
    commands::init::execute(Some(temp_dir.path()), &formatter).expect("Init failed");
    let record = submit(temp_dir.path(), &formatter, "Main St", "Roads", 2);

    let result = commands::update::execute(
        Some(temp_dir.path()),
        &record.tracking_code,
        Changes::default(),
        &formatter,
    );
    assert!(result.is_err());
}

#[test]
fn test_doctor_fix_repairs_snapshot() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    let formatter = CaptureFormatter::new();
    commands::init::execute(Some(root), &formatter).expect("Init failed");
    let record = submit(root, &formatter, "Main St", "Roads", 2);

    let path = root.join(".reqdesk/requests.jsonl");
    let line = serde_json::to_string(&record).expect("serialize");
    std::fs::write(&path, format!("{}\n{{broken\n{}\n", line, line)).expect("write");

    assert!(commands::doctor::execute(Some(root), false, &formatter).is_err());
    commands::doctor::execute(Some(root), true, &formatter).expect("Doctor fix failed");
    commands::doctor::execute(Some(root), false, &formatter).expect("Snapshot still broken");

    let saved = JsonlStorage::new(path).expect("storage").load_all().expect("load");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, record.id);
}

#[test]
fn test_legacy_issues_are_migrated_on_first_open() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    let formatter = CaptureFormatter::new();
    commands::init::execute(Some(root), &formatter).expect("Init failed");

    let legacy = r#"{"id":"7f1e1f6a-3c1b-4c1e-9a55-2b7f0f0a1b2c","submitted_at":"2026-01-01T00:00:00Z","location":"Main St","category":"Roads","description":"Dangerous pothole"}"#;
    std::fs::write(root.join(".reqdesk/issues.jsonl"), format!("{}\n", legacy)).expect("write");

    commands::list::execute(Some(root), &ListOptions::default(), &formatter).expect("List failed");
    let listed = formatter.take();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].tracking_code.starts_with("REQ-"));
    assert_eq!(listed[0].priority.get(), 2);
    assert!(root.join(".reqdesk/requests.jsonl").exists());
}
