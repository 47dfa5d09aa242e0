//! Progress reporting for the cleaning pipeline.
//!
//! The pipeline reports the start and end of each stage through an optional
//! [`ProgressReporter`]. There is no cancellation; stages run to completion.
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_cleaner::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .process(table, &targets);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Dropping rows with blank target cells
    MissingValues,
    /// Removing repeated rows
    Duplicates,
    /// Trimming and lowercasing target text
    TextStandardization,
    /// Scaling the numeric column to [0, 1]
    NumericNormalization,
    /// Dropping rows outside the IQR fences
    OutlierRemoval,
    /// Pipeline finished
    Complete,
}

impl CleaningStage {
    /// The five working stages, in the order they run.
    pub const ORDER: [CleaningStage; 5] = [
        CleaningStage::MissingValues,
        CleaningStage::Duplicates,
        CleaningStage::TextStandardization,
        CleaningStage::NumericNormalization,
        CleaningStage::OutlierRemoval,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MissingValues => "Filtering Missing Values",
            Self::Duplicates => "Removing Duplicates",
            Self::TextStandardization => "Standardizing Text",
            Self::NumericNormalization => "Normalizing Numbers",
            Self::OutlierRemoval => "Removing Outliers",
            Self::Complete => "Complete",
        }
    }

    /// Cumulative progress at the start of this stage.
    ///
    /// Stages are weighted equally.
    pub fn base_progress(&self) -> f32 {
        match Self::ORDER.iter().position(|stage| stage == self) {
            Some(index) => index as f32 / Self::ORDER.len() as f32,
            None => 1.0,
        }
    }

    /// Share of overall progress this stage accounts for.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Complete => 0.0,
            _ => 1.0 / Self::ORDER.len() as f32,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,

    /// Rows entering the stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_in: Option<usize>,

    /// Rows leaving the stage (set once the stage has finished)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_out: Option<usize>,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: CleaningStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            rows_in: None,
            rows_out: None,
        }
    }

    /// Stage is starting with `rows_in` rows.
    pub fn started(stage: CleaningStage, rows_in: usize) -> Self {
        let mut update = Self::new(stage, 0.0, format!("{}...", stage.display_name()));
        update.rows_in = Some(rows_in);
        update
    }

    /// Stage has finished, turning `rows_in` rows into `rows_out`.
    pub fn finished(stage: CleaningStage, rows_in: usize, rows_out: usize) -> Self {
        let mut update = Self::new(
            stage,
            1.0,
            format!("{} complete ({} -> {} rows)", stage.display_name(), rows_in, rows_out),
        );
        update.rows_in = Some(rows_in);
        update.rows_out = Some(rows_out);
        update
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
            rows_in: None,
            rows_out: None,
        }
    }
}

/// Trait for receiving progress updates during cleaning.
///
/// Implementations must be `Send + Sync` so a pipeline can be shared across
/// threads.
pub trait ProgressReporter: Send + Sync {
    /// Called at stage boundaries. Should return quickly.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    /// Creates a new closure-based progress reporter wrapped in an Arc.
    pub fn arc(callback: F) -> Arc<Self> {
        Arc::new(Self::new(callback))
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
