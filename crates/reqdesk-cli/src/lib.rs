// Rust guideline compliant 2026-10-14

//! Reqdesk CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod output;

pub use output::{create_formatter, should_use_color, OutputFormatter};
