use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{CellValue, Table};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Parquet export
// ---------------------------------------------------------------------------

/// Write `table` to a Parquet file at `path`, one field per column in
/// header order. Empty cells become nulls.
pub fn write_parquet(table: &Table, path: &Path) -> Result<()> {
    if table.is_empty() {
        return Err(DataError::EmptyData("no table loaded to export".to_string()));
    }

    let mut fields = Vec::with_capacity(table.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.column_count());

    for (name, values) in table.iter_columns() {
        let data_type = infer_data_type(values);
        fields.push(Field::new(name, data_type.clone(), true));
        arrays.push(build_array(values, &data_type));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    log::info!(
        "Exported {} columns x {} rows to {}",
        table.column_count(),
        table.len(),
        path.display()
    );
    Ok(())
}

/// Pick the narrowest Arrow type holding every non-null value of a column.
fn infer_data_type(values: &[CellValue]) -> DataType {
    let mut all_int = true;
    let mut all_numeric = true;
    let mut all_bool = true;
    let mut any_value = false;

    for value in values {
        match value {
            CellValue::Null => continue,
            CellValue::Integer(_) => all_bool = false,
            CellValue::Float(_) => {
                all_int = false;
                all_bool = false;
            }
            CellValue::Bool(_) => {
                all_int = false;
                all_numeric = false;
            }
            CellValue::String(_) => {
                all_int = false;
                all_numeric = false;
                all_bool = false;
            }
        }
        any_value = true;
    }

    match (any_value, all_int, all_numeric, all_bool) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Boolean,
        _ => DataType::Utf8,
    }
}

fn build_array(values: &[CellValue], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Int64 => Arc::new(Int64Array::from(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            values.iter().map(CellValue::as_f64).collect::<Vec<_>>(),
        )),
        DataType::Boolean => Arc::new(BooleanArray::from(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        _ => Arc::new(StringArray::from(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Null => None,
                    other => Some(other.to_string()),
                })
                .collect::<Vec<_>>(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn sample_table() -> Table {
        Table::from_columns(
            vec!["time".into(), "speed".into(), "state".into()],
            vec![
                vec![CellValue::Integer(0), CellValue::Integer(1)],
                vec![CellValue::Integer(3), CellValue::Float(3.5)],
                vec![CellValue::String("on".into()), CellValue::Null],
            ],
        )
    }

    #[test]
    fn test_infer_data_type() {
        let table = sample_table();
        assert_eq!(infer_data_type(table.column_values(0usize).unwrap()), DataType::Int64);
        assert_eq!(infer_data_type(table.column_values(1usize).unwrap()), DataType::Float64);
        assert_eq!(infer_data_type(table.column_values(2usize).unwrap()), DataType::Utf8);
        assert_eq!(
            infer_data_type(&[CellValue::Bool(true), CellValue::Null]),
            DataType::Boolean
        );
        assert_eq!(infer_data_type(&[CellValue::Null]), DataType::Utf8);
    }

    #[test]
    fn test_write_parquet_keeps_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.parquet");
        write_parquet(&sample_table(), &path).unwrap();

        let file = File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let schema = batches[0].schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["time", "speed", "state"]);
        assert_eq!(batches[0].num_rows(), 2);
        assert!(batches[0].column(2).is_null(1));
    }

    #[test]
    fn test_write_parquet_rejects_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        assert!(matches!(
            write_parquet(&Table::default(), &path),
            Err(DataError::EmptyData(_))
        ));
        assert!(!path.exists());
    }
}
