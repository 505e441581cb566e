// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd top` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::WorkspaceContext;
use std::path::Path;

/// Lists the most urgent requests, most urgent first.
///
/// `limit` defaults to the configured `top_limit`.
///
/// # Errors
///
/// Returns an error if the workspace is missing.
pub fn execute(
    root: Option<&Path>,
    limit: Option<usize>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let records = store.top_priority(limit.unwrap_or(config.top_limit));
    println!("{}", formatter.format_list(&records));
    Ok(())
}
