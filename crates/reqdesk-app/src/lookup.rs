// Rust guideline compliant 2026-10-14

//! Resolution of user-supplied keys to stored records.

use crate::error::{AppError, Result};
use reqdesk_core::{Record, RecordId, SnapshotStore, Store};
use std::sync::Arc;

/// Resolves a tracking code (any case) or a full record id to a record.
///
/// Tracking codes are tried first.
///
/// # Errors
///
/// Returns an error if no record matches.
pub fn resolve_record<S: SnapshotStore>(store: &Store<S>, key: &str) -> Result<Arc<Record>> {
    if let Some(record) = store.get_by_tracking_code(key) {
        return Ok(record);
    }
    key.parse::<RecordId>()
        .ok()
        .and_then(|id| store.get_by_id(id))
        .ok_or_else(|| AppError::NotFound(key.trim().to_string()))
}
