// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd doctor` command.
//!
//! Validates the snapshot line by line, then audits the in-memory indices
//! built from it.

use crate::output::{Finding, Severity};
use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::WorkspaceContext;
use reqdesk_core::{code_key, IndexAudit, Record};
use std::collections::HashMap;
use std::path::Path;

/// Executes the doctor command.
///
/// With `fix`, the snapshot is rewritten from the normalized store, which
/// drops unreadable lines and duplicate ids and gives every record a
/// unique tracking code.
///
/// # Errors
///
/// Returns an error if:
/// - The workspace is not initialized
/// - The snapshot cannot be read or rewritten
/// - Errors were found and `fix` was not requested
pub fn execute(root: Option<&Path>, fix: bool, formatter: &dyn OutputFormatter) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;

    let mut findings = if workspace.requests_path().exists() {
        let content = std::fs::read_to_string(workspace.requests_path())?;
        scan_snapshot(&content)
    } else {
        vec![Finding {
            severity: Severity::Info,
            message: "No snapshot yet; it is created on the first submission".to_string(),
        }]
    };

    let store = workspace.open_store(&config)?;
    let audit = store.audit();
    findings.extend(audit_findings(&audit));

    let has_errors = findings.iter().any(|f| f.severity == Severity::Error);
    let needs_repair = findings.iter().any(|f| f.severity != Severity::Info);
    if fix && needs_repair {
        let records = store.all();
        store.storage().save_all(&records)?;
        tracing::info!(records = records.len(), "snapshot rewritten");
        findings.push(Finding {
            severity: Severity::Info,
            message: format!("Rewrote snapshot with {} requests", records.len()),
        });
    }

    println!("{}", formatter.format_report(&findings, &audit));

    if has_errors && !fix {
        anyhow::bail!("Doctor found errors; run 'rqd doctor --fix' to repair the snapshot");
    }
    Ok(())
}

/// Checks every snapshot line for readability and uniqueness.
pub fn scan_snapshot(content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut ids = HashMap::new();
    let mut codes = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let record = match serde_json::from_str::<Record>(line) {
            Ok(record) => record,
            Err(err) => {
                findings.push(Finding {
                    severity: Severity::Error,
                    message: format!("Line {}: Invalid record ({})", line_no, err),
                });
                continue;
            }
        };

        if let Some(first) = ids.insert(record.id, line_no) {
            findings.push(Finding {
                severity: Severity::Error,
                message: format!(
                    "Line {}: Duplicate id {} (first seen on line {})",
                    line_no, record.id, first
                ),
            });
        }

        let key = code_key(&record.tracking_code);
        if key.is_empty() {
            findings.push(Finding {
                severity: Severity::Warning,
                message: format!("Line {}: Missing tracking code", line_no),
            });
        } else if let Some(first) = codes.insert(key, line_no) {
            findings.push(Finding {
                severity: Severity::Error,
                message: format!(
                    "Line {}: Duplicate tracking code {} (first seen on line {})",
                    line_no, record.tracking_code, first
                ),
            });
        }
    }

    findings
}

fn audit_findings(audit: &IndexAudit) -> Vec<Finding> {
    let mut findings = Vec::new();
    for tree in [&audit.plain, &audit.avl, &audit.red_black] {
        if let Some(violation) = &tree.violation {
            findings.push(Finding {
                severity: Severity::Error,
                message: format!("{} index: {}", tree.name, violation),
            });
        } else if !tree.matches_canonical {
            findings.push(Finding {
                severity: Severity::Error,
                message: format!("{} index disagrees with the canonical order", tree.name),
            });
        }
    }
    if audit.graph_nodes != audit.records || audit.heap_len != audit.records {
        findings.push(Finding {
            severity: Severity::Error,
            message: format!(
                "Index sizes differ: {} records, {} graph nodes, {} heap entries",
                audit.records, audit.graph_nodes, audit.heap_len
            ),
        });
    }
    findings
}
