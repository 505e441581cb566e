// Rust guideline compliant 2026-10-14

//! Configuration management for Reqdesk.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
}

/// Configuration for Reqdesk behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Priority given to new requests when none is specified (1-5).
    #[serde(default = "default_priority")]
    pub default_priority: u8,

    /// Prefix of generated tracking codes.
    #[serde(default = "default_tracking_prefix")]
    pub tracking_prefix: String,

    /// Random tracking code candidates tried before the UUID fallback.
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,

    /// Default number of related requests returned.
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    /// Default number of requests returned by the priority listing.
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Log level for the command-line front end.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_priority() -> u8 {
    5
}

fn default_tracking_prefix() -> String {
    crate::tracking::DEFAULT_PREFIX.to_string()
}

fn default_max_code_attempts() -> u32 {
    crate::tracking::DEFAULT_MAX_ATTEMPTS
}

fn default_related_limit() -> usize {
    5
}

fn default_top_limit() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
            tracking_prefix: default_tracking_prefix(),
            max_code_attempts: default_max_code_attempts(),
            related_limit: default_related_limit(),
            top_limit: default_top_limit(),
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.reqdesk/config.toml`
    /// 3. Environment variables with `REQDESK_` prefix
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.reqdesk` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `REQDESK_DEFAULT_PRIORITY` - Default priority (1-5)
    /// - `REQDESK_TRACKING_PREFIX` - Tracking code prefix
    /// - `REQDESK_MAX_CODE_ATTEMPTS` - Tracking code retry budget
    /// - `REQDESK_RELATED_LIMIT` - Default related-request count
    /// - `REQDESK_TOP_LIMIT` - Default priority listing length
    /// - `REQDESK_OUTPUT_FORMAT` - Output format (json/table)
    /// - `REQDESK_LOG_LEVEL` - Log level
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("REQDESK_DEFAULT_PRIORITY") {
            self.default_priority = val.parse().map_err(|_| {
                Error::InvalidConfig("REQDESK_DEFAULT_PRIORITY must be a number 1-5".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("REQDESK_TRACKING_PREFIX") {
            self.tracking_prefix = val;
        }

        if let Ok(val) = std::env::var("REQDESK_MAX_CODE_ATTEMPTS") {
            self.max_code_attempts = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "REQDESK_MAX_CODE_ATTEMPTS must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("REQDESK_RELATED_LIMIT") {
            self.related_limit = val.parse().map_err(|_| {
                Error::InvalidConfig("REQDESK_RELATED_LIMIT must be a number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("REQDESK_TOP_LIMIT") {
            self.top_limit = val.parse().map_err(|_| {
                Error::InvalidConfig("REQDESK_TOP_LIMIT must be a number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("REQDESK_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                _ => {
                    return Err(Error::InvalidConfig(
                        "REQDESK_OUTPUT_FORMAT must be json or table".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("REQDESK_LOG_LEVEL") {
            self.log_level = val;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - default_priority is out of range (1-5)
    /// - tracking_prefix is empty or not ASCII alphanumeric
    /// - max_code_attempts is zero
    /// - log_level is not a known level
    fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.default_priority) {
            return Err(Error::InvalidConfig(format!(
                "default_priority must be 1-5, got {}",
                self.default_priority
            )));
        }

        if self.tracking_prefix.is_empty()
            || !self.tracking_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidConfig(format!(
                "tracking_prefix must be non-empty ASCII alphanumeric, got '{}'",
                self.tracking_prefix
            )));
        }

        if self.max_code_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_code_attempts must be greater than 0".to_string(),
            ));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(Error::InvalidConfig(format!("Invalid log_level: {}", other))),
        }
    }

    /// Returns the default priority as a validated [`Priority`](crate::Priority).
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is out of range.
    pub fn new_request_priority(&self) -> Result<crate::Priority> {
        crate::Priority::new(self.default_priority)
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the `.reqdesk` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
