// Rust guideline compliant 2026-10-14

//! Parsing helpers for command-line input.

use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqdesk_core::{Priority, Status};

/// Parses a status string into a `Status` value.
///
/// Accepts the snake_case wire names, with `-` or spaces in place of `_`
/// and in any case.
///
/// # Errors
///
/// Returns an error if the status is invalid.
pub fn parse_status(value: &str) -> Result<Status> {
    let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
    Status::ALL
        .into_iter()
        .find(|status| status.as_str() == normalized)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid status: {}", value)))
}

/// Parses a priority from 1 (most urgent) to 5.
///
/// # Errors
///
/// Returns an error if the value is out of range.
pub fn parse_priority(value: u8) -> Result<Priority> {
    Priority::new(value).map_err(|_| {
        AppError::InvalidInput(format!("Priority must be between 1 and 5, got {}", value))
    })
}

/// Parses a date as RFC 3339 or as a plain `YYYY-MM-DD` (midnight UTC).
///
/// # Errors
///
/// Returns an error if neither format matches.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Invalid date '{}': expected YYYY-MM-DD or RFC 3339",
                value
            ))
        })
}
