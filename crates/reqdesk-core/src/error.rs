// Rust guideline compliant 2026-10-14

//! Error types for the Reqdesk core library.

use thiserror::Error;

/// Result type alias for Reqdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Reqdesk operations.
///
/// Lookups of unknown records are not errors; they return `None` or an
/// empty collection. These variants cover I/O, data validation and
/// configuration failures.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid record data.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Snapshot lock could not be acquired.
    #[error("Lock error: {0}")]
    Lock(String),
}
