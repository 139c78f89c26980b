use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::model::{CellValue, Table};
use crate::error::{DataError, Result};

/// Field separator of measurement files.
pub const DELIMITER: u8 = b';';
/// Quote character of measurement files.
pub const QUOTE: u8 = b'|';
/// Accepted file suffixes, matched exactly.
pub const ALLOWED_SUFFIXES: [&str; 2] = [".csv", ".CSV"];

// ---------------------------------------------------------------------------
// Path validation
// ---------------------------------------------------------------------------

/// Reject empty paths and paths without an allowed suffix. No I/O happens.
pub fn validate_path(path: &Path) -> Result<()> {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return Err(DataError::InvalidArgument(
            "missing required argument: 'file_path'".to_string(),
        ));
    }
    if !ALLOWED_SUFFIXES.iter().any(|suffix| text.ends_with(suffix)) {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        return Err(DataError::InvalidArgument(format!("Invalid file type: {ext}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a `;`-delimited, `|`-quoted file with a header row into a new table.
///
/// Rows shorter than the header are padded with [`CellValue::Null`]; longer
/// rows are rejected.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let table = parse_table(file)?;
    log::debug!(
        "Parsed {} columns x {} rows from {}",
        table.column_count(),
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse delimited content from any reader.
pub fn parse_table<R: Read>(source: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || (columns.len() == 1 && columns[0].is_empty()) {
        return Err(DataError::EmptyData("file has no header row".to_string()));
    }

    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); columns.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > columns.len() {
            return Err(DataError::RaggedRow {
                row: row_no,
                expected: columns.len(),
                found: record.len(),
            });
        }
        for (col_idx, column) in values.iter_mut().enumerate() {
            let value = record.get(col_idx).map_or(CellValue::Null, CellValue::parse);
            column.push(value);
        }
    }

    Ok(Table::from_columns(columns, values))
}

fn open_error(path: &Path, err: io::Error) -> DataError {
    if err.kind() == io::ErrorKind::NotFound {
        DataError::FileNotFound(path.to_path_buf())
    } else {
        DataError::Io(err)
    }
}

/// File size in KiB, rounded to the nearest integer.
pub fn file_size_kib(path: &Path) -> Result<u64> {
    let bytes = std::fs::metadata(path)
        .map_err(|e| open_error(path, e))?
        .len();
    Ok((bytes + 512) / 1024)
}

/// Path of the export written next to `source`.
pub fn export_path(source: &Path) -> PathBuf {
    source.with_extension("parquet")
}
