// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd submit` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{Submission, WorkspaceContext};
use std::path::Path;

/// Files a new service request and prints it with its tracking code.
///
/// # Errors
///
/// Returns an error if:
/// - The workspace is not initialized
/// - The input is invalid
/// - The snapshot cannot be written
pub fn execute(
    root: Option<&Path>,
    submission: Submission,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let record = submission.into_record(&config)?;
    let stored = store.insert(record)?;
    tracing::info!(code = %stored.tracking_code, "request submitted");

    println!("{}", formatter.format_record(&stored));
    Ok(())
}
