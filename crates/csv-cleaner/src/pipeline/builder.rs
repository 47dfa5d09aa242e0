//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for running
//! the five cleaning stages in their fixed order.

use crate::cleaner::{
    normalize_numeric_with_range, remove_duplicates, remove_rows_with_missing_values,
    standardize_text,
};
use crate::config::{CleanerConfig, NonNumericPolicy};
use crate::error::Result;
use crate::pipeline::outliers::OutlierRemover;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::types::{CleaningResult, CleaningSummary, StageSummary, Table, TargetColumns};
use crate::utils::numeric_cell;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use csv_cleaner::{CleanerConfig, Pipeline, TargetColumns};
///
/// let targets = TargetColumns::new(["name", "city"])?;
/// let result = Pipeline::builder()
///     .config(CleanerConfig::builder().numeric_column("price").build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .process(table, &targets);
///
/// println!("{} rows left", result.table.len());
/// ```
pub struct Pipeline {
    config: CleanerConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Pipelines are shared between threads by callers that clean several tables.
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Run all five stages over `table`.
    ///
    /// Order is fixed: missing values, duplicates, text, normalization,
    /// outliers. No stage can fail; the result always carries a table.
    pub fn process(&self, table: Table, targets: &TargetColumns) -> CleaningResult {
        let start_time = Instant::now();
        let column = self.config.numeric_column.as_str();

        info!(
            "Cleaning {} rows (targets: {:?}, numeric column: '{}')",
            table.len(),
            targets.as_slice(),
            column
        );

        let mut summary = CleaningSummary::new();
        summary.rows_before = table.len();

        // Step 1: Missing values
        let table = self.run_stage(&mut summary, CleaningStage::MissingValues, table, |t| {
            (remove_rows_with_missing_values(t, targets), Vec::new())
        });

        // Step 2: Duplicates
        let table = self.run_stage(&mut summary, CleaningStage::Duplicates, table, |t| {
            (remove_duplicates(t), Vec::new())
        });

        // Step 3: Text standardization
        let table = self.run_stage(&mut summary, CleaningStage::TextStandardization, table, |t| {
            let note = format!("Trimmed and lowercased {} target column(s)", targets.len());
            (standardize_text(t, targets), vec![note])
        });

        // Step 4: Numeric normalization
        let mut numeric_range = None;
        let table = self.run_stage(&mut summary, CleaningStage::NumericNormalization, table, |t| {
            let (normalized, range) = normalize_numeric_with_range(t, column);
            numeric_range = range;
            let note = match range {
                None => format!("No numeric values in '{}'; left unchanged", column),
                Some(r) if r.is_degenerate() => {
                    format!("All values in '{}' equal {}; left unchanged", column, r.min)
                }
                Some(r) => format!("Scaled '{}' from [{}, {}] to [0, 1]", column, r.min, r.max),
            };
            (normalized, vec![note])
        });
        summary.numeric_range = numeric_range;

        // Step 5: Outlier removal
        let remover = OutlierRemover::from_config(&self.config);
        let mut outlier_bounds = None;
        let mut non_numeric = 0usize;
        let table = self.run_stage(&mut summary, CleaningStage::OutlierRemoval, table, |t| {
            non_numeric = t
                .rows()
                .iter()
                .filter(|row| numeric_cell(row, column).is_none())
                .count();
            let (filtered, bounds) = remover.apply(t, column);
            outlier_bounds = bounds;
            let note = match bounds {
                None => format!("No numeric values in '{}'; left unchanged", column),
                Some(b) => format!(
                    "Kept '{}' within [{}, {}] (Q1={}, Q3={}, IQR={})",
                    column, b.lower, b.upper, b.q1, b.q3, b.iqr
                ),
            };
            (filtered, vec![note])
        });
        summary.outlier_bounds = outlier_bounds;

        if summary.numeric_range.is_none() {
            let message = format!(
                "Numeric column '{}' has no numeric values; normalization and outlier removal were skipped",
                column
            );
            warn!("{}", message);
            summary.add_warning(message);
        } else if non_numeric > 0 && self.config.non_numeric_policy == NonNumericPolicy::Drop {
            let message = format!(
                "Dropped {} row(s) whose '{}' value is missing or not a number",
                non_numeric, column
            );
            warn!("{}", message);
            summary.add_warning(message);
        }

        summary.rows_after = table.len();
        summary.rows_removed = summary.rows_before.saturating_sub(summary.rows_after);
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete: {} -> {} rows in {}ms",
            summary.rows_before, summary.rows_after, summary.duration_ms
        );
        self.report_progress(ProgressUpdate::complete(format!(
            "Cleaning complete ({} -> {} rows)",
            summary.rows_before, summary.rows_after
        )));

        CleaningResult { table, summary }
    }

    /// Run one stage, recording its summary and reporting progress.
    fn run_stage<F>(
        &self,
        summary: &mut CleaningSummary,
        stage: CleaningStage,
        table: Table,
        step: F,
    ) -> Table
    where
        F: FnOnce(Table) -> (Table, Vec<String>),
    {
        let rows_before = table.len();
        self.report_progress(ProgressUpdate::started(stage, rows_before));
        debug!("{} ({} rows)", stage.display_name(), rows_before);

        let started = Instant::now();
        let (table, notes) = step(table);
        let elapsed = started.elapsed().as_micros() as u64;

        let rows_after = table.len();
        let stage_summary = notes.into_iter().fold(
            StageSummary::new(stage, rows_before, rows_after).with_duration_us(elapsed),
            |stage_summary, note| stage_summary.with_note(note),
        );
        summary.stages.push(stage_summary);

        self.report_progress(ProgressUpdate::finished(stage, rows_before, rows_after));
        table
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleanerConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleanerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback using a closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(ClosureProgressReporter::arc(callback));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
