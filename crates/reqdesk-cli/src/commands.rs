// Rust guideline compliant 2026-10-14

//! Command implementations for the Reqdesk CLI.

pub mod backbone;
pub mod categories;
pub mod doctor;
pub mod init;
pub mod list;
pub mod related;
pub mod show;
pub mod submit;
pub mod top;
pub mod update;
