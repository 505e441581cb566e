// Rust guideline compliant 2026-10-14

//! Implementation of the `rqd init` command.
//!
//! Creates the `.reqdesk` data directory with a default configuration.

use crate::OutputFormatter;
use anyhow::Result;
use reqdesk_app::WorkspaceContext;
use std::path::Path;

/// Initializes a Reqdesk workspace under `root` (or the current directory).
///
/// Running it twice is harmless: an existing configuration is left alone.
///
/// # Errors
///
/// Returns an error if the directory or configuration cannot be written.
pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let already = WorkspaceContext::discover(root).is_ok();

    let workspace = WorkspaceContext::init(root)?;
    let message = if already {
        format!("Reqdesk already initialized at {}", workspace.data_dir().display())
    } else {
        format!("Initialized Reqdesk in {}", workspace.data_dir().display())
    };
    println!("{}", formatter.format_message(&message));
    Ok(())
}
