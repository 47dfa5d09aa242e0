//! Row and column cleaning stages.
//!
//! This module provides the first four stages of the pipeline:
//! - Dropping rows with missing target values
//! - Removing duplicate rows
//! - Trimming and lowercasing target text
//! - Min-max scaling of the numeric column
//!
//! Every stage takes its table by value and returns a new one. None of them
//! can fail; a stage whose preconditions are not met returns its input.

mod duplicates;
mod missing;
mod numeric;
mod text;

pub use duplicates::remove_duplicates;
pub use missing::remove_rows_with_missing_values;
pub use numeric::{NumericRange, normalize_numeric, normalize_numeric_with_range};
pub use text::standardize_text;
