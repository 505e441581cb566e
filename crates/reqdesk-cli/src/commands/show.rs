// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd show` command.
//!
//! Looks a request up by tracking code or record id.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{resolve_record, WorkspaceContext};
use std::path::Path;

/// Shows the details of one request.
///
/// # Errors
///
/// Returns an error if:
/// - The workspace is not initialized
/// - No request matches `key`
pub fn execute(root: Option<&Path>, key: &str, formatter: &dyn OutputFormatter) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let record = resolve_record(&store, key)?;
    println!("{}", formatter.format_record(&record));
    Ok(())
}
