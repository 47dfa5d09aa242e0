//! Outlier removal module.
//!
//! Screens the numeric column with Tukey fences built from linearly
//! interpolated quartiles.

use crate::config::{CleanerConfig, DEFAULT_IQR_MULTIPLIER, NonNumericPolicy};
use crate::types::Table;
use crate::utils::{numeric_cell, numeric_values};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Percentile `p` (0-100) of ascending `sorted`, interpolating linearly
/// between neighbouring order statistics.
///
/// Returns `None` for an empty slice or a `p` outside `[0, 100]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor();
    let upper = index.ceil();
    let (lo, hi) = (lower as usize, upper as usize);

    if lo == hi {
        return sorted.get(lo).copied();
    }
    Some(sorted[lo] * (upper - index) + sorted[hi] * (index - lower))
}

/// Quartiles and the fences derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute fences `Q1 - k*IQR` and `Q3 + k*IQR` over `values` (any order).
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0)?;
        let q3 = percentile(&sorted, 75.0)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// Inclusive bound check.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Drops rows whose numeric cell falls outside the IQR fences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierRemover {
    multiplier: f64,
    policy: NonNumericPolicy,
}

impl Default for OutlierRemover {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_IQR_MULTIPLIER,
            policy: NonNumericPolicy::Drop,
        }
    }
}

impl OutlierRemover {
    pub fn new(multiplier: f64, policy: NonNumericPolicy) -> Self {
        Self { multiplier, policy }
    }

    pub fn from_config(config: &CleanerConfig) -> Self {
        Self::new(config.iqr_multiplier, config.non_numeric_policy)
    }

    /// Filter `table` on `column`, returning the fences that were applied.
    ///
    /// With no parsable values there are no fences and the table is returned
    /// unchanged. Otherwise a row survives iff its value parses and lies
    /// within the fences; rows that do not parse are kept only under
    /// [`NonNumericPolicy::Keep`].
    pub fn apply(&self, table: Table, column: &str) -> (Table, Option<IqrBounds>) {
        let Some(bounds) = IqrBounds::from_values(&numeric_values(&table, column), self.multiplier)
        else {
            debug!("No numeric values in '{}', skipping outlier removal", column);
            return (table, None);
        };

        debug!(
            "Outlier fences for '{}': Q1={}, Q3={}, IQR={}, bounds=[{}, {}]",
            column, bounds.q1, bounds.q3, bounds.iqr, bounds.lower, bounds.upper
        );

        let (columns, mut rows) = table.into_parts();
        let before = rows.len();
        rows.retain(|row| match numeric_cell(row, column) {
            Some(value) => bounds.contains(value),
            None => self.policy == NonNumericPolicy::Keep,
        });

        debug!("Removed {} rows in outlier stage", before - rows.len());
        (Table::new(columns, rows), Some(bounds))
    }
}

/// Remove outliers on `column` with the default 1.5 multiplier, dropping
/// rows whose value does not parse.
pub fn remove_outliers(table: Table, column: &str) -> Table {
    OutlierRemover::default().apply(table, column).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;
    use pretty_assertions::assert_eq;

    fn column_of(values: &[&str]) -> Table {
        Table::from_rows(
            values
                .iter()
                .map(|v| [("value", *v)].into_iter().collect::<Row>())
                .collect(),
        )
    }

    fn cells(table: &Table) -> Vec<&str> {
        table
            .rows()
            .iter()
            .map(|r| r.get("value").unwrap_or("<absent>"))
            .collect()
    }

    // ==================== percentile tests ====================

    #[test]
    fn test_percentile_exact_index() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 25.0), Some(2.0));
        assert_eq!(percentile(&sorted, 50.0), Some(3.0));
        assert_eq!(percentile(&sorted, 75.0), Some(4.0));
        assert_eq!(percentile(&sorted, 100.0), Some(5.0));
    }

    #[test]
    fn test_percentile_interpolates() {
        // idx = 0.25 * 3 = 0.75 -> 10 * 0.25 + 20 * 0.75
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 25.0), Some(17.5));
        // idx = 0.75 * 3 = 2.25 -> 30 * 0.75 + 40 * 0.25
        assert_eq!(percentile(&sorted, 75.0), Some(32.5));
    }

    #[test]
    fn test_percentile_single_and_empty() {
        assert_eq!(percentile(&[7.0], 25.0), Some(7.0));
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_percentile_out_of_range() {
        let sorted = [1.0, 2.0];
        assert_eq!(percentile(&sorted, 150.0), None);
        assert_eq!(percentile(&sorted, -1.0), None);
        assert_eq!(percentile(&sorted, f64::NAN), None);
    }

    // ==================== IqrBounds tests ====================

    #[test]
    fn test_bounds_reference_values() {
        let bounds = IqrBounds::from_values(&[5.0, 3.0, 1.0, 4.0, 2.0], 1.5).unwrap();
        assert_eq!(bounds.q1, 2.0);
        assert_eq!(bounds.q3, 4.0);
        assert_eq!(bounds.iqr, 2.0);
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.5).unwrap();
        assert!(bounds.contains(-1.0));
        assert!(bounds.contains(7.0));
        assert!(!bounds.contains(7.0001));
        assert!(!bounds.contains(f64::NAN));
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(IqrBounds::from_values(&[], 1.5), None);
    }

    // ==================== apply tests ====================

    #[test]
    fn test_all_values_within_bounds_retained() {
        let table = column_of(&["1", "2", "3", "4", "5"]);
        let expected = table.clone();

        let (filtered, bounds) = OutlierRemover::default().apply(table, "value");
        assert_eq!(filtered, expected);
        assert_eq!(bounds.map(|b| (b.lower, b.upper)), Some((-1.0, 7.0)));
    }

    #[test]
    fn test_extreme_value_removed() {
        // Q1 = 3.25, Q3 = 7.75, IQR = 4.5, bounds = [-3.5, 14.5]
        let table = column_of(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "100"]);
        let filtered = remove_outliers(table, "value");
        assert_eq!(
            cells(&filtered),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_iqr_zero_keeps_equal_values() {
        let table = column_of(&["5", "5", "5", "5", "6"]);
        // Q1 = Q3 = 5, so only 5 survives.
        assert_eq!(cells(&remove_outliers(table, "value")), vec!["5", "5", "5", "5"]);
    }

    #[test]
    fn test_non_numeric_rows_dropped_by_default() {
        let table = Table::from_rows(vec![
            [("value", "1")].into_iter().collect(),
            [("value", "oops")].into_iter().collect(),
            [("other", "2")].into_iter().collect(),
            [("value", "2")].into_iter().collect(),
        ]);

        let filtered = remove_outliers(table, "value");
        assert_eq!(cells(&filtered), vec!["1", "2"]);
    }

    #[test]
    fn test_non_numeric_rows_kept_under_keep_policy() {
        let table = Table::from_rows(vec![
            [("value", "1")].into_iter().collect(),
            [("value", "oops")].into_iter().collect(),
            [("other", "2")].into_iter().collect(),
            [("value", "2")].into_iter().collect(),
        ]);

        let remover = OutlierRemover::new(1.5, NonNumericPolicy::Keep);
        let (filtered, _) = remover.apply(table, "value");
        assert_eq!(cells(&filtered), vec!["1", "oops", "<absent>", "2"]);
    }

    #[test]
    fn test_no_numeric_values_leaves_table_unchanged() {
        let table = column_of(&["a", "b", ""]);
        let expected = table.clone();

        let (filtered, bounds) = OutlierRemover::default().apply(table, "value");
        assert_eq!(filtered, expected);
        assert_eq!(bounds, None);
    }

    #[test]
    fn test_larger_multiplier_widens_fences() {
        let values = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "20"];
        // Q3 = 7.75, IQR = 4.5: 20 is outside 1.5x (14.5) but inside 3x (21.25).
        assert_eq!(remove_outliers(column_of(&values), "value").len(), 9);

        let wide = OutlierRemover::new(3.0, NonNumericPolicy::Drop);
        assert_eq!(wide.apply(column_of(&values), "value").0.len(), 10);
    }

    #[test]
    fn test_empty_table() {
        let (filtered, bounds) = OutlierRemover::default().apply(Table::default(), "value");
        assert!(filtered.is_empty());
        assert!(bounds.is_none());
    }
}
