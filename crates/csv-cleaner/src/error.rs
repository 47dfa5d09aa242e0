//! Error types for the cleaning pipeline and its file adapters.
//!
//! The pipeline stages themselves never fail. Errors come from acquiring or
//! persisting a table and from building an invalid configuration.
//!
//! Errors are serializable so the CLI can emit them as JSON alongside reports.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// The main error type for the cleaner.
#[derive(Error, Debug)]
pub enum CleanerError {
    /// Source table could not be read or parsed.
    #[error("Failed to read table from '{}': {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// Cleaned table could not be persisted.
    #[error("Failed to write table to '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// No target columns were supplied.
    #[error("At least one target column is required")]
    NoTargetColumns,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleanerError>,
    },
}

impl CleanerError {
    /// Build a read error for `path`.
    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CleanerError::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CleanerError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleanerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, used in JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "READ_ERROR",
            Self::Write { .. } => "WRITE_ERROR",
            Self::NoTargetColumns => "CONFIGURATION_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleanerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleanerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaner operations.
pub type Result<T> = std::result::Result<T, CleanerError>;
