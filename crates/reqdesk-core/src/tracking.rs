// Rust guideline compliant 2026-10-14

//! Tracking code generation.

use crate::Config;
use rand::Rng;
use uuid::Uuid;

/// Default tracking code prefix.
pub const DEFAULT_PREFIX: &str = "REQ";
/// Default number of random candidates tried before falling back.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Normalizes a tracking code for case-insensitive lookup.
#[must_use]
pub fn code_key(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Generates human-facing tracking codes such as `REQ-2026-482913`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCodeGenerator {
    prefix: String,
    max_attempts: u32,
}

impl Default for TrackingCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_MAX_ATTEMPTS)
    }
}

impl TrackingCodeGenerator {
    /// Creates a generator with the given prefix and retry budget.
    pub fn new(prefix: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            prefix: prefix.into(),
            max_attempts,
        }
    }

    /// Creates a generator from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tracking_prefix.clone(), config.max_code_attempts)
    }

    /// Returns the configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generates a code that `is_taken` does not report as in use.
    ///
    /// Tries up to `max_attempts` random six-digit numbers. If every
    /// candidate collides, falls back to six characters of a fresh UUID.
    /// The fallback is not checked again; its residual collision chance is
    /// accepted, so generation never fails.
    ///
    /// # Arguments
    ///
    /// * `year` - Year embedded in the code
    /// * `rng` - Source of the random numbers
    /// * `is_taken` - Uniqueness check against existing codes
    pub fn generate<R, F>(&self, year: i32, rng: &mut R, is_taken: F) -> String
    where
        R: Rng + ?Sized,
        F: Fn(&str) -> bool,
    {
        for _ in 0..self.max_attempts {
            let number: u32 = rng.gen_range(100_000..=999_999);
            let candidate = format!("{}-{}-{:06}", self.prefix, year, number);
            if !is_taken(&candidate) {
                return candidate;
            }
        }

        let suffix = Uuid::new_v4().simple().to_string().to_uppercase();
        format!("{}-{}-{}", self.prefix, year, &suffix[..6])
    }
}
