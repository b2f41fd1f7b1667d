//! In-memory columnar tables holding joined query results, with Parquet output.

mod error;
pub use error::{Result, TableError};

mod join;
mod output;

mod table;
pub use table::{Column, Table};

mod value;
pub use value::{Value, ValueKind};
