//! Min-max normalization of the numeric column.

use crate::types::Table;
use crate::utils::{format_numeric, numeric_cell, numeric_values};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Observed extremes of the parsable values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Range of `values`, or `None` when there are none.
    pub fn of(values: &[f64]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let range = rest.iter().fold(
            NumericRange {
                min: *first,
                max: *first,
            },
            |acc, &v| NumericRange {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        );
        Some(range)
    }

    /// Zero-width ranges cannot be scaled.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position of `value` inside the range, 0 at `min` and 1 at `max`.
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.is_finite() {
            (value - self.min) / span
        } else {
            // Halving keeps the span representable when max - min overflows.
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }
}

/// Rescale the numeric column to [0, 1]. See [`normalize_numeric_with_range`].
pub fn normalize_numeric(table: Table, column: &str) -> Table {
    normalize_numeric_with_range(table, column).0
}

/// Rescale every parsable cell of `column` to `(v - min) / (max - min)`.
///
/// Unparsable and absent cells are skipped for the statistics and left as is.
/// The table comes back unchanged when nothing parses or all values are
/// equal. The range is returned whenever at least one value parsed.
pub fn normalize_numeric_with_range(table: Table, column: &str) -> (Table, Option<NumericRange>) {
    let Some(range) = NumericRange::of(&numeric_values(&table, column)) else {
        debug!("No numeric values in '{}', skipping normalization", column);
        return (table, None);
    };

    if range.is_degenerate() {
        debug!(
            "All values in '{}' equal {}, skipping normalization",
            column, range.min
        );
        return (table, Some(range));
    }

    let (columns, mut rows) = table.into_parts();
    for row in &mut rows {
        if let Some(value) = numeric_cell(row, column) {
            row.replace_with(column, |_| format_numeric(range.scale(value)));
        }
    }

    debug!(
        "Normalized '{}' from [{}, {}] to [0, 1]",
        column, range.min, range.max
    );
    (Table::new(columns, rows), Some(range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Row;
    use crate::utils::parse_numeric;
    use pretty_assertions::assert_eq;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    fn column_of(values: &[&str]) -> Table {
        Table::from_rows(values.iter().map(|v| row(&[("n", v)])).collect())
    }

    fn cells(table: &Table) -> Vec<&str> {
        table
            .rows()
            .iter()
            .map(|r| r.get("n").unwrap_or("<absent>"))
            .collect()
    }

    #[test]
    fn test_range_of() {
        assert_eq!(NumericRange::of(&[]), None);
        assert_eq!(
            NumericRange::of(&[3.0, -1.0, 7.5]),
            Some(NumericRange { min: -1.0, max: 7.5 })
        );
    }

    #[test]
    fn test_scales_to_unit_interval() {
        let table = column_of(&["10", "20", "30", "15"]);
        let (normalized, range) = normalize_numeric_with_range(table, "n");

        assert_eq!(range, Some(NumericRange { min: 10.0, max: 30.0 }));
        assert_eq!(cells(&normalized), vec!["0", "0.5", "1", "0.25"]);
    }

    #[test]
    fn test_min_maps_to_zero_and_max_to_one() {
        let table = column_of(&["-4", "7.25", "100", "3"]);
        let normalized = normalize_numeric(table, "n");

        let values: Vec<f64> = cells(&normalized)
            .into_iter()
            .filter_map(parse_numeric)
            .collect();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(values[0], 0.0);
        assert_eq!(values[2], 1.0);
    }

    #[test]
    fn test_range_wider_than_f64_still_maps_max_to_one() {
        let table = column_of(&["-1e308", "1e308", "0"]);
        let normalized = normalize_numeric(table, "n");
        assert_eq!(cells(&normalized), vec!["0", "1", "0.5"]);
    }

    #[test]
    fn test_unparsable_cells_kept_verbatim() {
        let table = Table::from_rows(vec![
            row(&[("n", "0")]),
            row(&[("n", "n/a")]),
            row(&[("other", "9")]),
            row(&[("n", "4")]),
        ]);
        let normalized = normalize_numeric(table, "n");
        assert_eq!(cells(&normalized), vec!["0", "n/a", "<absent>", "1"]);
    }

    #[test]
    fn test_identical_values_leave_table_unchanged() {
        let table = column_of(&["5", " 5 ", "5.0", "text"]);
        let expected = table.clone();

        let (normalized, range) = normalize_numeric_with_range(table, "n");
        assert_eq!(normalized, expected);
        assert_eq!(range, Some(NumericRange { min: 5.0, max: 5.0 }));
    }

    #[test]
    fn test_no_parsable_values_leave_table_unchanged() {
        let table = column_of(&["a", "", "b"]);
        let expected = table.clone();

        let (normalized, range) = normalize_numeric_with_range(table, "n");
        assert_eq!(normalized, expected);
        assert_eq!(range, None);
    }

    #[test]
    fn test_missing_column_leaves_table_unchanged() {
        let table = Table::from_rows(vec![row(&[("name", "alice")])]);
        let expected = table.clone();
        assert_eq!(normalize_numeric(table, "numericColumn"), expected);
    }
}
