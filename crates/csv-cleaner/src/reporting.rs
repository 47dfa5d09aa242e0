//! JSON reports for cleaning runs.
//!
//! A [`CleaningReport`] bundles the pipeline summary with where the data came
//! from and went to. It is what `--json` prints and `--emit-report` writes.

use crate::config::CleanerConfig;
use crate::error::Result;
use crate::types::{CleaningSummary, TargetColumns};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report for one cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Local time the report was built, `%Y-%m-%d %H:%M:%S`.
    pub generated_at: String,
    pub input_file: String,
    /// `None` for dry runs.
    pub output_file: Option<String>,
    pub target_columns: Vec<String>,
    pub config: CleanerConfig,
    pub summary: CleaningSummary,
}

impl CleaningReport {
    pub fn new(
        input_file: impl Into<String>,
        output_file: Option<String>,
        targets: &TargetColumns,
        config: &CleanerConfig,
        summary: &CleaningSummary,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            output_file,
            target_columns: targets.as_slice().to_vec(),
            config: config.clone(),
            summary: summary.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(self.to_json()?.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path.to_path_buf())
    }
}
