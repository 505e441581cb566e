// Rust guideline compliant 2026-10-14

//! Output formatting module for the Reqdesk CLI.
//!
//! This module provides functionality for formatting service requests
//! as JSON envelopes or human-readable tables.

use chrono::{DateTime, Utc};
use reqdesk_app::SuccessEnvelope;
use reqdesk_core::{IndexAudit, Record};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tabled::{builder::Builder, settings::Style};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// One edge of the relationship backbone, labelled by tracking code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackboneEdge {
    /// Tracking code of one endpoint.
    pub from: String,
    /// Tracking code of the other endpoint.
    pub to: String,
    /// Inverse similarity of the two requests.
    pub weight: f64,
}

/// Severity of a doctor finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The snapshot or indices are broken.
    Error,
    /// Something looks wrong but the store copes with it.
    Warning,
    /// Informational.
    Info,
}

/// A single doctor finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// How serious the finding is.
    pub severity: Severity,
    /// What was found.
    pub message: String,
}

/// Output formatter trait.
///
/// Defines the interface for formatting command results in different output formats.
pub trait OutputFormatter {
    /// Formats a single request for display.
    fn format_record(&self, record: &Record) -> String;

    /// Formats a list of requests for display.
    fn format_list(&self, records: &[Arc<Record>]) -> String;

    /// Formats the distinct category names.
    fn format_categories(&self, categories: &[String]) -> String;

    /// Formats the edges of the relationship backbone.
    fn format_backbone(&self, edges: &[BackboneEdge]) -> String;

    /// Formats a doctor report.
    fn format_report(&self, findings: &[Finding], audit: &IndexAudit) -> String;

    /// Formats a confirmation message.
    fn format_message(&self, message: &str) -> String;

    /// Formats an error message for display.
    fn format_error(&self, error: &str) -> String;
}

/// JSON output formatter.
///
/// Wraps every result in the standard success envelope.
pub struct JsonFormatter;

fn to_json<T: Serialize>(value: T) -> String {
    serde_json::to_string_pretty(&SuccessEnvelope::new(value))
        .unwrap_or_else(|_| json!({ "status": "error", "message": "Failed to serialize output" }).to_string())
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &Record) -> String {
        to_json(record)
    }

    fn format_list(&self, records: &[Arc<Record>]) -> String {
        let requests: Vec<&Record> = records.iter().map(|r| &**r).collect();
        to_json(json!({
            "requests": requests,
            "total": records.len(),
        }))
    }

    fn format_categories(&self, categories: &[String]) -> String {
        to_json(json!({
            "categories": categories,
            "total": categories.len(),
        }))
    }

    fn format_backbone(&self, edges: &[BackboneEdge]) -> String {
        to_json(json!({
            "edges": edges,
            "total_weight": edges.iter().map(|e| e.weight).sum::<f64>(),
        }))
    }

    fn format_report(&self, findings: &[Finding], audit: &IndexAudit) -> String {
        to_json(json!({
            "findings": findings,
            "audit": audit,
            "consistent": audit.is_consistent(),
        }))
    }

    fn format_message(&self, message: &str) -> String {
        to_json(json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "status": "error", "message": error }).to_string()
    }
}

/// Table output formatter.
///
/// Formats requests as human-readable tables.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

fn date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

impl OutputFormatter for TableFormatter {
    fn format_record(&self, record: &Record) -> String {
        let mut output = String::new();

        output.push_str(&format!("Code:        {}\n", record.tracking_code));
        output.push_str(&format!("ID:          {}\n", record.id));
        output.push_str(&format!("Status:      {}\n", record.status));
        output.push_str(&format!("Priority:    {}\n", record.priority));
        output.push_str(&format!("Category:    {}\n", record.category));
        output.push_str(&format!("Location:    {}\n", record.location));
        output.push_str(&format!("Submitted:   {}\n", date(record.submitted_at)));
        if let Some(updated) = record.updated_at {
            output.push_str(&format!("Updated:     {}\n", date(updated)));
        }
        if let Some(assignee) = &record.assigned_to {
            output.push_str(&format!("Assigned to: {}\n", assignee));
        }
        if let Some(eta) = record.estimated_completion {
            output.push_str(&format!("ETA:         {}\n", eta.format("%Y-%m-%d")));
        }
        if let Some(notes) = &record.status_notes {
            output.push_str(&format!("Notes:       {}\n", notes));
        }
        if !record.description.is_empty() {
            output.push_str(&format!("Description: {}\n", record.description));
        }
        if !record.attachments.is_empty() {
            output.push_str(&format!("Attachments: {}\n", record.attachments.join(", ")));
        }

        output
    }

    fn format_list(&self, records: &[Arc<Record>]) -> String {
        if records.is_empty() {
            return "No requests found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Code", "Status", "Priority", "Category", "Location", "Submitted"]);

        for record in records {
            builder.push_record([
                record.tracking_code.clone(),
                record.status.to_string(),
                record.priority.to_string(),
                record.category.clone(),
                record.location.clone(),
                date(record.submitted_at),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_categories(&self, categories: &[String]) -> String {
        if categories.is_empty() {
            return "No categories yet.".to_string();
        }
        categories.join("\n")
    }

    fn format_backbone(&self, edges: &[BackboneEdge]) -> String {
        if edges.is_empty() {
            return "No related requests.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["From", "To", "Weight"]);
        for edge in edges {
            builder.push_record([edge.from.clone(), edge.to.clone(), format!("{:.3}", edge.weight)]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        let total: f64 = edges.iter().map(|e| e.weight).sum();
        format!("{}\nTotal weight: {:.3}", table, total)
    }

    fn format_report(&self, findings: &[Finding], audit: &IndexAudit) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Index", "Records", "Height", "Matches", "Violation"]);
        for tree in [&audit.plain, &audit.avl, &audit.red_black] {
            builder.push_record([
                tree.name.to_string(),
                tree.len.to_string(),
                tree.height.to_string(),
                tree.matches_canonical.to_string(),
                tree.violation.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());

        let mut output = format!(
            "Records: {}  Graph: {} nodes, {} edges  Heap: {}\n{}\n",
            audit.records, audit.graph_nodes, audit.graph_edges, audit.heap_len, table
        );
        if findings.is_empty() {
            output.push_str("Doctor: no issues found.");
        } else {
            output.push_str("Doctor findings:");
            for finding in findings {
                let label = match finding.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARN",
                    Severity::Info => "INFO",
                };
                output.push_str(&format!("\n[{}] {}", label, finding.message));
            }
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        if self.use_color {
            print_colored("✓ ", Color::Green);
        }
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        if self.use_color {
            print_colored("Error: ", Color::Red);
            error.to_string()
        } else {
            format!("Error: {}", error)
        }
    }
}

/// Prints a bold colored prefix to stderr.
fn print_colored(text: &str, color: Color) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{}", text);
    let _ = stderr.reset();
}

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

/// Factory function to create an appropriate formatter.
///
/// # Arguments
/// * `json` - Whether to emit JSON
/// * `use_color` - Whether to use colored output (ignored for JSON)
pub fn create_formatter(json: bool, use_color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(use_color))
    }
}
