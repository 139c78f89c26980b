use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – everything the data layer can fail with
// ---------------------------------------------------------------------------

/// Errors raised by the table store, the header classifier and the
/// settings files. None of them are retried internally.
#[derive(Error, Debug)]
pub enum DataError {
    /// Empty path or an extension outside the allowed set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The file {} was not found", .0.display())]
    FileNotFound(PathBuf),

    /// The file has no parseable columns, or no table is loaded.
    #[error("No columns to parse: {0}")]
    EmptyData(String),

    /// A separator is configured but the trimmed header does not contain it.
    #[error("Header '{header}' does not contain the separator '{separator}'")]
    MalformedHeader { header: String, separator: String },

    #[error("Column '{column}' has no values to classify")]
    EmptyColumn { column: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
