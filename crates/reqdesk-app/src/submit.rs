// Rust guideline compliant 2026-10-14

//! Building new requests and updates from caller input.

use crate::error::{AppError, Result};
use crate::parse::{parse_date, parse_priority, parse_status};
use reqdesk_core::{Config, Record, RecordUpdate};

/// Input for a new service request.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Where the problem is.
    pub location: String,
    /// Kind of problem, such as "Roads".
    pub category: String,
    /// What is wrong.
    pub description: String,
    /// Priority 1-5; the configured default when absent.
    pub priority: Option<u8>,
    /// Attachment references.
    pub attachments: Vec<String>,
}

impl Submission {
    /// Validates the input and builds a record submitted now.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Location or category is blank
    /// - The priority is out of range
    pub fn into_record(self, config: &Config) -> Result<Record> {
        let location = required("location", self.location)?;
        let category = required("category", self.category)?;
        let priority = match self.priority {
            Some(value) => parse_priority(value)?,
            None => config.new_request_priority()?,
        };

        let mut record = Record::new(location, category, self.description.trim());
        record.priority = priority;
        record.attachments = self
            .attachments
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Ok(record)
    }
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Changes requested for an existing record; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    /// New status name.
    pub status: Option<String>,
    /// New priority.
    pub priority: Option<u8>,
    /// New status notes; an empty string clears them.
    pub notes: Option<String>,
    /// New assignee; an empty string clears it.
    pub assigned_to: Option<String>,
    /// New estimated completion date; an empty string clears it.
    pub eta: Option<String>,
}

impl Changes {
    /// Returns true if no change was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
            && self.assigned_to.is_none()
            && self.eta.is_none()
    }

    /// Builds a full update for `record` with these changes applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a status, priority or date does not parse.
    pub fn to_update(&self, record: &Record) -> Result<RecordUpdate> {
        let mut update = RecordUpdate::from_record(record);
        if let Some(status) = &self.status {
            update.status = parse_status(status)?;
        }
        if let Some(priority) = self.priority {
            update.priority = parse_priority(priority)?;
        }
        if let Some(notes) = &self.notes {
            update.status_notes = non_empty(notes);
        }
        if let Some(assignee) = &self.assigned_to {
            update.assigned_to = non_empty(assignee);
        }
        if let Some(eta) = &self.eta {
            update.estimated_completion = match non_empty(eta) {
                Some(value) => Some(parse_date(&value)?),
                None => None,
            };
        }
        Ok(update)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
