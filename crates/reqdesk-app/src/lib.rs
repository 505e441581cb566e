// Rust guideline compliant 2026-10-14

//! Shared application services for Reqdesk.
//!
//! This crate provides reusable, non-CLI-specific helpers for workspace
//! discovery, record lookup, input parsing, listing, and standardized
//! response envelopes.

pub mod error;
pub mod list;
pub mod lookup;
pub mod parse;
pub mod response;
pub mod submit;
pub mod workspace;

pub use error::{AppError, ErrorCode, Result};
pub use list::{list_categories, list_records, ListOptions};
pub use lookup::resolve_record;
pub use parse::{parse_date, parse_priority, parse_status};
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use submit::{Changes, Submission};
pub use workspace::WorkspaceContext;
