use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub type Result<T> = std::result::Result<T, TableError>;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("tables have different heights: {left} and {right}")]
    HeightMismatch { left: usize, right: usize },

    #[error("table has no columns")]
    NoColumns,

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
