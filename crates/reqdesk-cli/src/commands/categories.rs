// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd categories` command.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::{list_categories, WorkspaceContext};
use std::path::Path;

/// Prints every distinct category in the order it was first filed.
///
/// # Errors
///
/// Returns an error if the workspace is missing.
pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let workspace = WorkspaceContext::discover(root)?;
    let config = workspace.load_config()?;
    let store = workspace.open_store(&config)?;

    println!("{}", formatter.format_categories(&list_categories(&store)));
    Ok(())
}
