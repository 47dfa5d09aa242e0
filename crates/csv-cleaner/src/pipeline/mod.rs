//! Pipeline module.
//!
//! This module provides the cleaning pipeline, its outlier stage and
//! progress reporting.

mod builder;
pub mod outliers;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use outliers::{IqrBounds, OutlierRemover, percentile, remove_outliers};
pub use progress::{CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
