// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd list` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{list_records, ListOptions, WorkspaceContext};
use std::path::Path;

/// Lists requests, optionally filtered by status or category.
///
/// # Errors
///
/// Returns an error if the workspace is missing or the filters are invalid.
pub fn execute(
    root: Option<&Path>,
    options: &ListOptions,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let records = list_records(&store, options)?;
    println!("{}", formatter.format_list(&records));
    Ok(())
}
