//! Text standardizer.

use crate::types::{Table, TargetColumns};
use tracing::debug;

/// Trim and lowercase every non-empty target cell.
///
/// Cells outside the target set, and empty or absent target cells, are left
/// as they are.
pub fn standardize_text(table: Table, targets: &TargetColumns) -> Table {
    let (columns, mut rows) = table.into_parts();
    let mut changed = 0usize;

    for row in &mut rows {
        for column in targets.iter() {
            if row.get(column).is_some_and(|value| !value.is_empty())
                && row.replace_with(column, |value| value.trim().to_lowercase())
            {
                changed += 1;
            }
        }
    }

    debug!("Standardized {} text cells", changed);
    Table::new(columns, rows)
}
