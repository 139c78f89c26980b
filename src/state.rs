use std::path::{Path, PathBuf};

use crate::data::classify::{classify, ClassificationConfig, ClassificationResult};
use crate::data::model::{CellValue, ColumnRef, Table};
use crate::data::{export, loader};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// TabularDataStore
// ---------------------------------------------------------------------------

/// Owns the currently loaded measurement table.
///
/// Not synchronised: callers running loads on a worker thread must keep a
/// single writer.
#[derive(Debug, Default)]
pub struct TabularDataStore {
    /// Last accepted file path.
    path: Option<PathBuf>,

    /// Loaded table. Empty until `load` succeeds.
    table: Table,

    /// Source file size in KiB, captured at load.
    file_size_kib: Option<u64>,
}

impl TabularDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a new file path without reading it.
    ///
    /// A path different from the current one drops the loaded table; the
    /// data is only read again by [`TabularDataStore::load`].
    pub fn set_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        loader::validate_path(path)?;

        if self.path.as_deref() != Some(path) {
            log::debug!("File path changed to {}, dropping table", path.display());
            self.table = Table::default();
            self.file_size_kib = None;
            self.path = Some(path.to_path_buf());
        }
        Ok(())
    }

    /// Parse `path` into a new table and swap it in.
    ///
    /// On any failure the previous path and table are left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        loader::validate_path(path)?;

        let table = loader::read_table(path)?;
        let size = loader::file_size_kib(path)?;

        log::info!(
            "Loaded {} columns x {} rows from {} ({size} KiB)",
            table.column_count(),
            table.len(),
            path.display()
        );

        self.path = Some(path.to_path_buf());
        self.table = table;
        self.file_size_kib = Some(size);
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn is_loaded(&self) -> bool {
        !self.table.is_empty()
    }

    /// Column names of the current table; empty if nothing is loaded.
    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// All values of one column, in row order.
    pub fn column_values<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Result<&[CellValue]> {
        let column = column.into();
        self.table
            .column_values(column)
            .ok_or_else(|| DataError::UnknownColumn(column.to_string()))
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    pub fn file_size_kib(&self) -> Option<u64> {
        self.file_size_kib
    }

    /// Classify the headers of the loaded table.
    pub fn classify(&self, config: &ClassificationConfig) -> Result<ClassificationResult> {
        classify(&self.table, config)
    }

    /// Write the loaded table next to its source file as Parquet and return
    /// the written path.
    pub fn export(&self) -> Result<PathBuf> {
        let source = match (&self.path, self.is_loaded()) {
            (Some(path), true) => path,
            _ => {
                return Err(DataError::EmptyData(
                    "no table loaded to export".to_string(),
                ))
            }
        };
        let target = loader::export_path(source);
        export::write_parquet(&self.table, &target)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TabularDataStore::new();
        assert!(store.columns().is_empty());
        assert!(!store.is_loaded());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_load_reads_header_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "run.csv", "time_index;value\n10;20\n");

        let mut store = TabularDataStore::new();
        store.load(&path).unwrap();

        assert_eq!(store.columns(), ["time_index", "value"]);
        assert_eq!(
            store.column_values("time_index").unwrap(),
            [CellValue::Integer(10)]
        );
        assert_eq!(store.column_values(1usize).unwrap(), [CellValue::Integer(20)]);
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(store.file_size_kib(), Some(0));
    }

    #[test]
    fn test_unknown_column() {
        let store = TabularDataStore::new();
        assert!(matches!(
            store.column_values("speed"),
            Err(DataError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_set_path_rejects_wrong_extension_and_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "run.csv", "a;b\n1;2\n");

        let mut store = TabularDataStore::new();
        store.load(&path).unwrap();

        let err = store.set_path("data.txt").unwrap_err();
        assert!(matches!(err, DataError::InvalidArgument(_)));
        assert!(matches!(store.set_path(""), Err(DataError::InvalidArgument(_))));
        assert_eq!(store.columns(), ["a", "b"]);
    }

    #[test]
    fn test_set_path_invalidates_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "run.csv", "a;b\n1;2\n");

        let mut store = TabularDataStore::new();
        store.load(&path).unwrap();

        store.set_path(&path).unwrap();
        assert!(store.is_loaded());

        store.set_path(dir.path().join("other.csv")).unwrap();
        assert!(!store.is_loaded());
        assert!(store.columns().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.csv", "a;b\n1;2\n");
        let empty = write(&dir, "empty.csv", "");

        let mut store = TabularDataStore::new();
        store.load(&good).unwrap();

        assert!(matches!(store.load(&empty), Err(DataError::EmptyData(_))));
        assert!(matches!(
            store.load(dir.path().join("missing.csv")),
            Err(DataError::FileNotFound(_))
        ));
        assert!(matches!(
            store.load(dir.path().join("notes.txt")),
            Err(DataError::InvalidArgument(_))
        ));

        assert_eq!(store.columns(), ["a", "b"]);
        assert_eq!(store.path(), Some(good.as_path()));
    }

    #[test]
    fn test_export_without_table() {
        let store = TabularDataStore::new();
        assert!(matches!(store.export(), Err(DataError::EmptyData(_))));
    }

    #[test]
    fn test_export_writes_next_to_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "run.csv", "t;v\n0;1\n1;1\n");

        let mut store = TabularDataStore::new();
        store.load(&path).unwrap();
        let target = store.export().unwrap();

        assert_eq!(target, dir.path().join("run.parquet"));
        assert!(target.exists());
    }
}
