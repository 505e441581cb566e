// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd update` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{resolve_record, AppError, Changes, WorkspaceContext};
use std::path::Path;

/// Updates the mutable fields of an existing request.
///
/// # Errors
///
/// Returns an error if:
/// - No change was requested
/// - The request does not exist
/// - A new value does not parse
/// - The snapshot cannot be written
pub fn execute(
    root: Option<&Path>,
    key: &str,
    changes: Changes,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    if changes.is_empty() {
        return Err(AppError::InvalidInput(
            "Nothing to update; pass at least one of --status, --priority, --notes, --assign, --eta"
                .to_string(),
        )
        .into());
    }

    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    let current = resolve_record(&store, key)?;
    let update = changes.to_update(&current)?;
    let updated = store
        .update(update)?
        .ok_or_else(|| AppError::NotFound(key.to_string()))?;

    println!("{}", formatter.format_record(&updated));
    Ok(())
}
