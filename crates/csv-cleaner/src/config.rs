//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The stage order is fixed; only the numeric-stage parameters are tunable.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column name the numeric stages use unless configured otherwise.
pub const DEFAULT_NUMERIC_COLUMN: &str = "numericColumn";

/// Tukey fence multiplier applied to the interquartile range.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// What the outlier stage does with rows whose numeric cell does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NonNumericPolicy {
    /// Drop the row. A non-number never satisfies the bound check.
    #[default]
    Drop,
    /// Keep the row; only parsable values are tested against the bounds.
    Keep,
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleanerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use csv_cleaner::config::{CleanerConfig, NonNumericPolicy};
///
/// let config = CleanerConfig::builder()
///     .numeric_column("price")
///     .non_numeric_policy(NonNumericPolicy::Keep)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Column normalized to [0, 1] and screened for outliers.
    /// Default: "numericColumn"
    pub numeric_column: String,

    /// Multiplier `k` for the outlier fences `Q1 - k*IQR` and `Q3 + k*IQR`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Handling of non-numeric cells in the outlier stage.
    /// Default: Drop
    pub non_numeric_policy: NonNumericPolicy,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            numeric_column: DEFAULT_NUMERIC_COLUMN.to_string(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            non_numeric_policy: NonNumericPolicy::default(),
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::CleanerError::Io(e)
                .with_context(format!("Reading config file {}", path.display()))
        })?;
        let config: CleanerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.numeric_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyNumericColumn);
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Numeric column name must not be empty")]
    EmptyNumericColumn,

    #[error("Invalid IQR multiplier: {0} (must be a finite number above 0)")]
    InvalidIqrMultiplier(f64),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    numeric_column: Option<String>,
    iqr_multiplier: Option<f64>,
    non_numeric_policy: Option<NonNumericPolicy>,
}

impl CleanerConfigBuilder {
    /// Start from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: CleanerConfig) -> Self {
        Self {
            numeric_column: Some(config.numeric_column),
            iqr_multiplier: Some(config.iqr_multiplier),
            non_numeric_policy: Some(config.non_numeric_policy),
        }
    }

    /// Set the column used by the normalization and outlier stages.
    pub fn numeric_column(mut self, column: impl Into<String>) -> Self {
        self.numeric_column = Some(column.into());
        self
    }

    /// Set the IQR fence multiplier.
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.iqr_multiplier = Some(k);
        self
    }

    /// Set how the outlier stage treats non-numeric cells.
    pub fn non_numeric_policy(mut self, policy: NonNumericPolicy) -> Self {
        self.non_numeric_policy = Some(policy);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let config = CleanerConfig {
            numeric_column: self
                .numeric_column
                .unwrap_or_else(|| DEFAULT_NUMERIC_COLUMN.to_string()),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER),
            non_numeric_policy: self.non_numeric_policy.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
