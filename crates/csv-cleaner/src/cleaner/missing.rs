//! Missing-value filter.

use crate::types::{Table, TargetColumns};
use crate::utils::has_content;
use tracing::debug;

/// Keep rows whose every target column exists and is not blank.
pub fn remove_rows_with_missing_values(table: Table, targets: &TargetColumns) -> Table {
    let (columns, rows) = table.into_parts();
    let before = rows.len();

    let kept: Vec<_> = rows
        .into_iter()
        .filter(|row| targets.iter().all(|column| has_content(row, column)))
        .collect();

    debug!(
        "Missing-value filter kept {} of {} rows",
        kept.len(),
        before
    );
    Table::new(columns, kept)
}
