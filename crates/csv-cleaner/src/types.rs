//! Core data types: rows, tables and the target-column set.

use crate::cleaner::NumericRange;
use crate::error::{CleanerError, Result};
use crate::pipeline::{CleaningStage, IqrBounds};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One record of a table: column name to raw cell text.
///
/// Keys are kept sorted, so equality and hashing do not depend on the order
/// in which cells were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell value for `column`, if the row has that key.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Set a cell, returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(column.into(), value.into())
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Column names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in sorted column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deterministic encoding of every field, independent of insertion order.
    ///
    /// Two rows have the same key iff they are equal.
    pub fn canonical_key(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// Replace the value of `column` if present, returning whether it changed.
    pub(crate) fn replace_with(&mut self, column: &str, f: impl FnOnce(&str) -> String) -> bool {
        match self.0.get_mut(column) {
            Some(value) => {
                let updated = f(value.as_str());
                let changed = updated != *value;
                *value = updated;
                changed
            }
            None => false,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

/// An ordered sequence of rows plus the header order they were read with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table with an explicit header order.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Create a table whose header is inferred from its rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self::new(Vec::new(), rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Split into header and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header for serialization.
    ///
    /// The declared header first, then keys found only in rows, in order of
    /// first appearance.
    pub fn column_names(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let mut names = self.columns.clone();
        for row in &self.rows {
            for key in row.keys() {
                if seen.insert(key) {
                    names.push(key.to_string());
                }
            }
        }
        names
    }
}

/// Caller-supplied, non-empty set of columns for the missing-value and text
/// stages. Order of first mention is kept; repeats are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetColumns(Vec<String>);

impl TargetColumns {
    /// Fails with [`CleanerError::NoTargetColumns`] when `columns` is empty.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let columns: Vec<String> = columns
            .into_iter()
            .map(Into::into)
            .filter(|c| seen.insert(c.clone()))
            .collect();

        if columns.is_empty() {
            return Err(CleanerError::NoTargetColumns);
        }
        Ok(Self(columns))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// What one stage did to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: CleaningStage,
    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,
    /// Wall-clock time spent in the stage, in microseconds.
    pub duration_us: u64,
    /// Human-readable notes (e.g. the scaling range or the outlier fences).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl StageSummary {
    pub fn new(stage: CleaningStage, rows_before: usize, rows_after: usize) -> Self {
        Self {
            stage,
            rows_before,
            rows_after,
            rows_removed: rows_before.saturating_sub(rows_after),
            duration_us: 0,
            notes: Vec::new(),
        }
    }

    pub fn with_duration_us(mut self, duration_us: u64) -> Self {
        self.duration_us = duration_us;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,

    /// Range used by the normalizer, if any value parsed.
    pub numeric_range: Option<NumericRange>,

    /// Fences used by the outlier stage, if any value parsed.
    pub outlier_bounds: Option<IqrBounds>,

    /// One entry per stage, in execution order.
    pub stages: Vec<StageSummary>,

    /// Notable conditions, such as a numeric column that never parsed.
    pub warnings: Vec<String>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for the given stage, if it ran.
    pub fn stage(&self, stage: CleaningStage) -> Option<&StageSummary> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Output of [`crate::Pipeline::process`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningResult {
    /// The cleaned table.
    pub table: Table,
    pub summary: CleaningSummary,
}
