// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd related` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{resolve_record, WorkspaceContext};
use std::path::Path;

/// Lists the requests most similar to the given one, closest first.
///
/// # Errors
///
/// Returns an error if the workspace is missing or the request does not exist.
pub fn execute(
    root: Option<&Path>,
    key: &str,
    limit: Option<usize>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let record = resolve_record(&store, key)?;
    let related = store.related_to(record.id, limit.unwrap_or(config.related_limit));
    println!("{}", formatter.format_list(&related));
    Ok(())
}
