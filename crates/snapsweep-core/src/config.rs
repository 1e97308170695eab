//! Triage configuration.
//!
//! Hosts usually persist this as JSON next to their own settings and hand
//! the parsed value to the service layer.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound for the number of calendar months the enumerator scans.
pub const MAX_MONTH_BUCKETS: u32 = 120;

/// Upper bound for the recent window, in days.
pub const MAX_RECENT_DAYS: u32 = 36_500;

/// Tunables for loading and grouping the photo library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Maximum number of assets requested from the media provider.
    pub list_limit: usize,
    /// Sample size of the random category.
    pub random_sample_size: usize,
    /// Window of the "recent" category, in days.
    pub recent_days: u32,
    /// Number of calendar months (current month included) offered as categories.
    pub month_buckets: u32,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            list_limit: 10_000,
            random_sample_size: 50,
            recent_days: 7,
            month_buckets: 24,
        }
    }
}

impl TriageConfig {
    /// Parse a configuration from JSON, filling in defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns every invalid field at once.
    pub fn validate(&self) -> std::result::Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.list_limit == 0 {
            errors.push(ConfigError::ZeroListLimit);
        }
        if self.random_sample_size == 0 {
            errors.push(ConfigError::ZeroRandomSample);
        }
        if self.recent_days == 0 {
            errors.push(ConfigError::ZeroRecentDays);
        } else if self.recent_days > MAX_RECENT_DAYS {
            errors.push(ConfigError::RecentDaysOutOfRange);
        }
        if self.month_buckets == 0 || self.month_buckets > MAX_MONTH_BUCKETS {
            errors.push(ConfigError::MonthBucketsOutOfRange);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validation error for a triage configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `list_limit` is zero.
    ZeroListLimit,
    /// `random_sample_size` is zero.
    ZeroRandomSample,
    /// `recent_days` is zero.
    ZeroRecentDays,
    /// `recent_days` is larger than [`MAX_RECENT_DAYS`].
    RecentDaysOutOfRange,
    /// `month_buckets` is zero or larger than [`MAX_MONTH_BUCKETS`].
    MonthBucketsOutOfRange,
}

impl ConfigError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ZeroListLimit => "List limit must be at least 1",
            Self::ZeroRandomSample => "Random sample size must be at least 1",
            Self::ZeroRecentDays => "Recent window must be at least 1 day",
            Self::RecentDaysOutOfRange => "Recent window must be at most 36500 days",
            Self::MonthBucketsOutOfRange => "Month buckets must be 1-120",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ZeroListLimit => "list_limit",
            Self::ZeroRandomSample => "random_sample_size",
            Self::ZeroRecentDays | Self::RecentDaysOutOfRange => "recent_days",
            Self::MonthBucketsOutOfRange => "month_buckets",
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConfigError {}
