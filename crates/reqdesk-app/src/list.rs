// Rust guideline compliant 2026-10-14

//! Listing and filtering helpers for service requests.

use crate::error::{AppError, Result};
use crate::parse::parse_status;
use reqdesk_core::{Record, SnapshotStore, Store};
use std::sync::Arc;

/// List options for filtering requests.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Filter by status name.
    pub status: Option<String>,
    /// Filter by category (case-insensitive).
    pub category: Option<String>,
    /// Walk the relationship graph for the category instead of scanning.
    pub related: bool,
}

/// Lists requests according to `options`.
///
/// With no filter, every request is listed oldest first. Status and
/// category filters scan every request and list matches newest first; both
/// may be combined. With `related`, the category filter returns only the
/// requests connected in the relationship graph to the first one filed.
///
/// # Errors
///
/// Returns an error if:
/// - `related` is set without a category, or together with a status
/// - The status does not parse
pub fn list_records<S: SnapshotStore>(
    store: &Store<S>,
    options: &ListOptions,
) -> Result<Vec<Arc<Record>>> {
    if options.related {
        return match (&options.category, &options.status) {
            (Some(category), None) => Ok(store.by_category(category)),
            (None, _) => Err(AppError::InvalidInput(
                "--related needs a --category".to_string(),
            )),
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "--related cannot be combined with --status".to_string(),
            )),
        };
    }

    let status = options.status.as_deref().map(parse_status).transpose()?;
    match (options.category.as_deref(), status) {
        (None, None) => Ok(store.list_sorted_by_submission()),
        (category, status) => Ok(store.search(category, status)),
    }
}

/// Returns the distinct categories filed so far.
pub fn list_categories<S: SnapshotStore>(store: &Store<S>) -> Vec<String> {
    store.categories()
}
