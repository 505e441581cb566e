// Rust guideline compliant 2026-10-14

//! Core data models for Reqdesk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Process-unique opaque identifier of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| crate::Error::InvalidRecord(format!("Invalid record id '{}': {}", s, e)))
    }
}

/// Lifecycle status of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Request has been received and not yet looked at.
    #[default]
    Submitted,
    /// Request is being triaged.
    UnderReview,
    /// Work on the request has started.
    InProgress,
    /// Work is paused.
    OnHold,
    /// The underlying problem has been fixed.
    Resolved,
    /// Request is closed.
    Closed,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 6] = [
        Status::Submitted,
        Status::UnderReview,
        Status::InProgress,
        Status::OnHold,
        Status::Resolved,
        Status::Closed,
    ];

    /// Returns the snake_case wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::UnderReview => "under_review",
            Status::InProgress => "in_progress",
            Status::OnHold => "on_hold",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a request: 1 is the most urgent, 5 the least.
///
/// Out-of-range values are rejected on construction and on deserialization,
/// so every `Priority` in memory satisfies `1 <= p <= 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Most urgent priority.
    pub const HIGHEST: Priority = Priority(1);
    /// Least urgent priority, used when none is given.
    pub const LOWEST: Priority = Priority(5);

    /// Creates a priority from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside `1..=5`.
    pub fn new(value: u8) -> crate::Result<Self> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(crate::Error::InvalidRecord(format!(
                "Priority must be 1-5, got {}",
                value
            )))
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl TryFrom<u8> for Priority {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordering key of the submission-time indices.
///
/// Sorts by `submitted_at` ascending, ties broken by `id` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionKey {
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Record identifier.
    pub id: RecordId,
}

/// A service request tracked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Internal identifier, immutable.
    pub id: RecordId,
    /// Human-facing code such as `REQ-2026-123456`; empty until the store assigns one.
    #[serde(default)]
    pub tracking_code: String,
    /// Submission time, immutable.
    pub submitted_at: DateTime<Utc>,
    /// Time of the last mutation.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Free-text location.
    #[serde(default)]
    pub location: String,
    /// Free-text category such as "Roads" or "Sanitation".
    #[serde(default)]
    pub category: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Current status.
    #[serde(default)]
    pub status: Status,
    /// Optional note explaining the current status.
    #[serde(default)]
    pub status_notes: Option<String>,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Opaque attachment references.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Estimated completion date.
    #[serde(default)]
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl Record {
    /// Creates a new record submitted now, with default status and priority.
    ///
    /// The tracking code is left empty for the store to assign.
    pub fn new(
        location: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), location, category, description)
    }

    /// Creates a new record with an explicit submission time.
    pub fn at(
        submitted_at: DateTime<Utc>,
        location: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            tracking_code: String::new(),
            submitted_at,
            updated_at: None,
            location: location.into(),
            category: category.into(),
            description: description.into(),
            status: Status::default(),
            status_notes: None,
            priority: Priority::default(),
            attachments: Vec::new(),
            assigned_to: None,
            estimated_completion: None,
        }
    }

    /// Returns the submission-order key of this record.
    #[must_use]
    pub fn submission_key(&self) -> SubmissionKey {
        SubmissionKey {
            submitted_at: self.submitted_at,
            id: self.id,
        }
    }

    /// Copies the mutable fields of `update` onto this record and stamps `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply(&mut self, update: &RecordUpdate, now: DateTime<Utc>) {
        self.status = update.status;
        self.status_notes = update.status_notes.clone();
        self.priority = update.priority;
        self.assigned_to = update.assigned_to.clone();
        self.estimated_completion = update.estimated_completion;
        self.updated_at = Some(match self.updated_at {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// New values for the mutable fields of an existing record.
///
/// Every field is copied: `None` clears the corresponding optional field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    /// Identifier of the record to update.
    pub id: RecordId,
    /// New status.
    pub status: Status,
    /// New status notes.
    #[serde(default)]
    pub status_notes: Option<String>,
    /// New priority.
    pub priority: Priority,
    /// New assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// New estimated completion date.
    #[serde(default)]
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl RecordUpdate {
    /// Starts an update that keeps every mutable field of `record` as is.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id,
            status: record.status,
            status_notes: record.status_notes.clone(),
            priority: record.priority,
            assigned_to: record.assigned_to.clone(),
            estimated_completion: record.estimated_completion,
        }
    }
}

/// Issue report in the format used before service requests existed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyIssue {
    /// Identifier, carried over to the migrated record.
    pub id: RecordId,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Free-text location.
    #[serde(default)]
    pub location: String,
    /// Free-text category.
    #[serde(default)]
    pub category: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Attachment references.
    #[serde(default)]
    pub attachments: Vec<String>,
}
