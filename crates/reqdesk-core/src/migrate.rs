// Rust guideline compliant 2026-10-14

//! Migration of legacy issue reports into service requests.

use crate::models::{LegacyIssue, Priority, Record, Status};
use crate::tracking::{code_key, TrackingCodeGenerator};
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use std::collections::HashSet;

/// Derives an initial status from the age of a legacy issue.
///
/// Older than 30 days is treated as resolved, older than 14 as in
/// progress, older than 7 as under review; anything newer is submitted.
#[must_use]
pub fn initial_status(issue: &LegacyIssue, now: DateTime<Utc>) -> Status {
    let age_days = (now - issue.submitted_at).num_seconds() as f64 / 86_400.0;
    if age_days > 30.0 {
        Status::Resolved
    } else if age_days > 14.0 {
        Status::InProgress
    } else if age_days > 7.0 {
        Status::UnderReview
    } else {
        Status::Submitted
    }
}

/// Derives a priority from keywords in the category and description.
#[must_use]
pub fn initial_priority(issue: &LegacyIssue) -> Priority {
    let category = issue.category.to_lowercase();
    let description = issue.description.to_lowercase();

    let value = if category.contains("water")
        || category.contains("utilities")
        || description.contains("emergency")
        || description.contains("urgent")
    {
        1
    } else if category.contains("roads")
        || category.contains("potholes")
        || description.contains("dangerous")
        || description.contains("hazard")
    {
        2
    } else if (category.contains("lighting") && description.contains("dark"))
        || description.contains("unsafe")
    {
        3
    } else if category.contains("sanitation") {
        4
    } else {
        5
    };

    Priority::new(value).unwrap_or_default()
}

/// Converts legacy issues into records with fresh, mutually unique tracking codes.
///
/// The issue id and submission time carry over; `updated_at` is set to the
/// submission time.
pub fn migrate_issues<R>(
    issues: Vec<LegacyIssue>,
    generator: &TrackingCodeGenerator,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Record>
where
    R: Rng + ?Sized,
{
    let mut taken = HashSet::new();
    let mut records = Vec::with_capacity(issues.len());

    for issue in issues {
        let tracking_code = generator.generate(now.year(), rng, |code| {
            taken.contains(&code_key(code))
        });
        taken.insert(code_key(&tracking_code));

        let status = initial_status(&issue, now);
        let priority = initial_priority(&issue);
        records.push(Record {
            id: issue.id,
            tracking_code,
            submitted_at: issue.submitted_at,
            updated_at: Some(issue.submitted_at),
            location: issue.location,
            category: issue.category,
            description: issue.description,
            status,
            status_notes: None,
            priority,
            attachments: issue.attachments,
            assigned_to: None,
            estimated_completion: None,
        });
    }

    records
}
