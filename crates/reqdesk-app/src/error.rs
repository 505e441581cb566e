// Rust guideline compliant 2026-10-14

//! Error handling for Reqdesk application services.

use reqdesk_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested record was not found.
    NotFound,
    /// Record data failed validation.
    ValidationError,
    /// IO failure while reading or writing workspace data.
    IoError,
    /// The snapshot is locked by another process.
    LockError,
    /// The configuration is invalid.
    ConfigError,
    /// The workspace has not been initialized.
    WorkspaceNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
    /// JSON serialization or parsing failed.
    JsonError,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Workspace is missing or not initialized.
    #[error("Reqdesk workspace not initialized at {path}. Run 'rqd init' first.")]
    WorkspaceNotInitialized {
        /// Path where `.reqdesk` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record matches the given tracking code or id.
    #[error("No request matches '{0}'")]
    NotFound(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::WorkspaceNotInitialized { .. } => ErrorCode::WorkspaceNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::InvalidRecord(_) => ErrorCode::ValidationError,
                CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
                CoreError::Lock(_) => ErrorCode::LockError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::WorkspaceNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::NotFound(key) => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        }
    }
}
