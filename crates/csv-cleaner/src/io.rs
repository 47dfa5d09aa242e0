//! Delimited-text adapters around the pipeline.
//!
//! Tables are read and written with polars' CSV reader and writer. Every
//! column is read as text; nothing is inferred.

use crate::error::{CleanerError, Result};
use crate::types::{Row, Table};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Read a header-first, comma-separated file into a [`Table`].
///
/// Empty and null cells become `""`. Blank lines, which come back as rows
/// with every cell empty, are skipped. A missing file or a structurally
/// broken one is reported as [`CleanerError::Read`].
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| CleanerError::read(path, e))?;
    if !metadata.is_file() {
        return Err(CleanerError::read(path, "not a regular file"));
    }
    if metadata.len() == 0 {
        debug!("{} is empty", path.display());
        return Ok(Table::default());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_missing_is_null(false),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| CleanerError::read(path, e))?;

    let table = dataframe_to_table(&df).map_err(|e| CleanerError::read(path, e))?;
    let skipped = df.height() - table.len();
    if skipped > 0 {
        debug!("Skipped {} blank line(s) in {}", skipped, path.display());
    }
    info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        df.width(),
        path.display()
    );
    Ok(table)
}

/// Write `table` as comma-separated text with a header line.
///
/// The header is [`Table::column_names`]; cells a row lacks are left empty.
pub fn save_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let columns = table.column_names();

    if columns.is_empty() {
        std::fs::write(path, "").map_err(|e| CleanerError::write(path, e))?;
        info!("Wrote empty table to {}", path.display());
        return Ok(());
    }

    let mut df = table_to_dataframe(table, &columns).map_err(|e| CleanerError::write(path, e))?;
    let mut file = File::create(path).map_err(|e| CleanerError::write(path, e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)
        .map_err(|e| CleanerError::write(path, e))?;

    info!(
        "Wrote {} rows x {} columns to {}",
        table.len(),
        columns.len(),
        path.display()
    );
    Ok(())
}

fn dataframe_to_table(df: &DataFrame) -> PolarsResult<Table> {
    let mut columns = Vec::with_capacity(df.width());
    let mut rows = vec![Row::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = column.as_materialized_series().str()?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.insert(name.clone(), value.unwrap_or(""));
        }
        columns.push(name);
    }

    rows.retain(|row| row.iter().any(|(_, value)| !value.is_empty()));
    Ok(Table::new(columns, rows))
}

fn table_to_dataframe(table: &Table, columns: &[String]) -> PolarsResult<DataFrame> {
    let series: Vec<Column> = columns
        .iter()
        .map(|name| {
            let values: Vec<Option<&str>> = table.rows().iter().map(|row| row.get(name)).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    DataFrame::new(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_reads_every_cell_as_text() {
        let file = write_csv("name,age,score\n Alice ,30,007\nBob,,1e3\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "score"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("name"), Some(" Alice "));
        assert_eq!(table.rows()[0].get("score"), Some("007"));
        assert_eq!(table.rows()[1].get("age"), Some(""));
        assert_eq!(table.rows()[1].get("score"), Some("1e3"));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let file = write_csv("name,numericColumn\nA,1\n\nB,2\n\n");
        let table = load_table(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("name"), Some("A"));
        assert_eq!(table.rows()[1].get("name"), Some("B"));
        assert_eq!(table.column_names(), vec!["name", "numericColumn"]);
    }

    #[test]
    fn test_load_quoted_fields() {
        let file = write_csv("name,note\n\"Smith, John\",\"said \"\"hi\"\"\"\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.rows()[0].get("name"), Some("Smith, John"));
        assert_eq!(table.rows()[0].get("note"), Some("said \"hi\""));
    }

    #[test]
    fn test_load_missing_file() {
        let error = load_table("definitely/not/here.csv").unwrap_err();
        assert_eq!(error.error_code(), "READ_ERROR");
        assert!(error.to_string().contains("definitely/not/here.csv"));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_table(dir.path()).unwrap_err();
        assert_eq!(error.error_code(), "READ_ERROR");
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_csv("");
        assert_eq!(load_table(file.path()).unwrap(), Table::default());
    }

    #[test]
    fn test_save_then_load_preserves_header_and_cells() {
        let table = Table::new(
            vec!["zeta".to_string(), "alpha".to_string()],
            vec![
                [("zeta", "1"), ("alpha", "x, y")].into_iter().collect(),
                [("zeta", "2"), ("alpha", "plain")].into_iter().collect(),
            ],
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        save_table(&table, &path).unwrap();
        let reloaded = load_table(&path).unwrap();

        assert_eq!(reloaded, table);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("zeta,alpha\n"));
    }

    #[test]
    fn test_save_fills_absent_keys_with_empty_cells() {
        let table = Table::from_rows(vec![
            [("a", "1"), ("b", "2")].into_iter().collect(),
            [("a", "3")].into_iter().collect(),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        save_table(&table, &path).unwrap();
        let reloaded = load_table(&path).unwrap();
        assert_eq!(reloaded.rows()[1].get("b"), Some(""));
    }

    #[test]
    fn test_save_header_only() {
        let table = Table::new(vec!["name".to_string()], Vec::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        save_table(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "name");
    }

    #[test]
    fn test_save_to_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let table = Table::from_rows(vec![[("a", "1")].into_iter().collect()]);

        let error = save_table(&table, &path).unwrap_err();
        assert_eq!(error.error_code(), "WRITE_ERROR");
    }
}
