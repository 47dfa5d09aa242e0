//! Tabular Data Cleaning Library
//!
//! A small, fixed-order cleaning pipeline for delimited text tables.
//!
//! # Overview
//!
//! Five stages always run in this order:
//!
//! 1. **Missing values**: drop rows whose target columns are absent or blank
//! 2. **Duplicates**: keep the first occurrence of every distinct row
//! 3. **Text**: trim and lowercase target columns
//! 4. **Normalization**: min-max scale the numeric column to [0, 1]
//! 5. **Outliers**: drop rows outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`
//!
//! Cells stay strings throughout; the numeric column is parsed on demand.
//! Stages never fail. Only reading, writing and configuration can.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use csv_cleaner::{Pipeline, TargetColumns, load_table, save_table};
//!
//! let table = load_table("data.csv")?;
//! let targets = TargetColumns::new(["name", "city"])?;
//!
//! let result = Pipeline::builder().build()?.process(table, &targets);
//! save_table(&result.table, "data.clean.csv")?;
//!
//! println!("{} -> {} rows", result.summary.rows_before, result.summary.rows_after);
//! ```
//!
//! # Configuration
//!
//! The numeric stages read [`CleanerConfig`]:
//!
//! ```rust,ignore
//! use csv_cleaner::{CleanerConfig, NonNumericPolicy};
//!
//! let config = CleanerConfig::builder()
//!     .numeric_column("price")                    // default: "numericColumn"
//!     .iqr_multiplier(3.0)                        // default: 1.5
//!     .non_numeric_policy(NonNumericPolicy::Keep) // default: Drop
//!     .build()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{
    NumericRange, normalize_numeric, normalize_numeric_with_range, remove_duplicates,
    remove_rows_with_missing_values, standardize_text,
};
pub use config::{
    CleanerConfig, CleanerConfigBuilder, ConfigValidationError, DEFAULT_IQR_MULTIPLIER,
    DEFAULT_NUMERIC_COLUMN, NonNumericPolicy,
};
pub use error::{CleanerError, Result as CleanerResult};
pub use io::{load_table, save_table};
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, IqrBounds, OutlierRemover, Pipeline, PipelineBuilder,
    ProgressReporter, ProgressUpdate, percentile, remove_outliers,
};
pub use reporting::CleaningReport;
pub use types::{CleaningResult, CleaningSummary, Row, StageSummary, Table, TargetColumns};
pub use utils::{parse_column_list, parse_numeric};
