//! Duplicate-row filter.

use crate::types::Table;
use std::collections::HashSet;
use tracing::debug;

/// Keep the first occurrence of every distinct row, in original order.
///
/// Rows compare on [`crate::Row::canonical_key`], their full column→value mapping;
/// key order is irrelevant.
pub fn remove_duplicates(table: Table) -> Table {
    let (columns, mut rows) = table.into_parts();
    let before = rows.len();

    let mut seen = HashSet::with_capacity(rows.len());
    rows.retain(|row| seen.insert(row.canonical_key()));

    let removed = before - rows.len();
    if removed > 0 {
        debug!("Removed {} duplicate rows", removed);
    } else {
        debug!("No duplicate rows found");
    }
    Table::new(columns, rows)
}
