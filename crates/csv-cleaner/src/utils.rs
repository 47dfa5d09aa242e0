//! Shared helpers for the cleaning stages and the CLI.

use crate::types::{Row, Table};

// =============================================================================
// Numeric Parsing Utilities
// =============================================================================

/// Parse the leading number of a cell as a finite `f64`.
///
/// Leading whitespace is skipped and the longest prefix that reads as a
/// decimal number is used, so `"12abc"` is 12 and `"3 kg"` is 3. Cells with
/// no leading digits, `NaN` and infinities are not numbers.
///
/// # Example
///
/// ```rust,ignore
/// use csv_cleaner::utils::parse_numeric;
///
/// assert_eq!(parse_numeric(" 42.5 "), Some(42.5));
/// assert_eq!(parse_numeric("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric("1,000"), Some(1.0));
/// assert_eq!(parse_numeric("n/a"), None);
/// ```
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let cell = cell.trim_start();
    let len = numeric_prefix_len(cell);
    if len == 0 {
        return None;
    }
    cell[..len]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Byte length of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
///
/// Returns 0 when there is no digit before the exponent.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

/// Parsed value of `column` in `row`; `None` when absent or not a number.
#[inline]
pub fn numeric_cell(row: &Row, column: &str) -> Option<f64> {
    row.get(column).and_then(parse_numeric)
}

/// Every parsable value of `column`, in row order.
pub fn numeric_values(table: &Table, column: &str) -> Vec<f64> {
    table
        .rows()
        .iter()
        .filter_map(|row| numeric_cell(row, column))
        .collect()
}

/// Render a number the way it is written back into a cell.
///
/// Shortest representation that round-trips: `0`, `1`, `0.25`. Magnitudes
/// below `1e-6` or from `1e21` up use exponent form (`1e-7`, `1e+21`).
pub fn format_numeric(value: f64) -> String {
    // -0.0 would otherwise print as "-0".
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 {
        format!("{value:e}")
    } else if magnitude >= 1e21 {
        format!("{value:e}").replacen('e', "e+", 1)
    } else {
        value.to_string()
    }
}

// =============================================================================
// String Utilities
// =============================================================================

/// Split a comma-separated column list, trimming names and dropping blanks.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(parse_column_list(" name, city ,,"), vec!["name", "city"]);
/// ```
pub fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// True when the cell exists and holds something besides whitespace.
#[inline]
pub fn has_content(row: &Row, column: &str) -> bool {
    row.get(column).is_some_and(|value| !value.trim().is_empty())
}
