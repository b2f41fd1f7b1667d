//! Parquet output of tables.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
    UInt32Array, UInt64Array,
};
use arrow::datatypes::{DataType as ArrowType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::{Result, TableError};
use crate::table::{Column, Table};
use crate::value::{Value, ValueKind};

impl Table {
    /// Writes the table to a Parquet file, creating missing parent directories.
    ///
    /// Column types are inferred from the values. Columns mixing several kinds of values
    /// and columns holding only nulls are written as strings.
    pub fn write_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.width() == 0 {
            return Err(TableError::NoColumns);
        }

        let batch = self.to_record_batch()?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!(
            path = %path.display(),
            rows = self.height(),
            columns = self.width(),
            "Wrote table to parquet"
        );

        Ok(())
    }

    /// Converts the table to an arrow record batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) =
            self.columns().iter().map(column_to_array).unzip();

        let schema = Arc::new(Schema::new(fields));

        Ok(RecordBatch::try_new(schema, arrays)?)
    }
}

/// Kind shared by all non-null values, `None` when the column is all nulls or mixed.
fn column_kind(column: &Column) -> Option<ValueKind> {
    let mut kinds = column.values().iter().filter_map(Value::kind);
    let first = kinds.next()?;

    kinds.all(|kind| kind == first).then_some(first)
}

fn column_to_array(column: &Column) -> (Field, ArrayRef) {
    let values = column.values();

    let (data_type, array): (ArrowType, ArrayRef) = match column_kind(column) {
        Some(ValueKind::Bool) => (
            ArrowType::Boolean,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Bool(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<BooleanArray>(),
            ),
        ),
        Some(ValueKind::UInt64) => (
            ArrowType::UInt64,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::UInt64(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<UInt64Array>(),
            ),
        ),
        Some(ValueKind::UInt32) => (
            ArrowType::UInt32,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::UInt32(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<UInt32Array>(),
            ),
        ),
        Some(ValueKind::Int64) => (
            ArrowType::Int64,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Int64(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<Int64Array>(),
            ),
        ),
        Some(ValueKind::Int32) => (
            ArrowType::Int32,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Int32(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<Int32Array>(),
            ),
        ),
        Some(ValueKind::Float64) => (
            ArrowType::Float64,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Float64(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<Float64Array>(),
            ),
        ),
        Some(ValueKind::Float32) => (
            ArrowType::Float32,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Float32(v) => Some(*v),
                        _ => None,
                    })
                    .collect::<Float32Array>(),
            ),
        ),
        Some(ValueKind::Text) | None => (
            ArrowType::Utf8,
            Arc::new(
                values
                    .iter()
                    .map(|value| match value {
                        Value::Null => None,
                        Value::Text(text) => Some(text.clone()),
                        other => Some(other.to_string()),
                    })
                    .collect::<StringArray>(),
            ),
        ),
    };

    (Field::new(column.name(), data_type, true), array)
}
