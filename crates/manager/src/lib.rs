//! Event queries over a HyperSync endpoint.
//!
//! [`HyperManager`] resolves the block range of a query, builds the query from an
//! [`EventConfig`](hyperquery_types::EventConfig), collects every page of results, decodes
//! the logs and joins them with their transactions and blocks into a single
//! [`Table`](hyperquery_table::Table).

pub mod assemble;
pub use assemble::{assemble, QueryTables};

mod config;
pub use config::{ManagerConfig, DEFAULT_OUTPUT_DIR};

mod convert;
pub use convert::{convert_decoded, convert_raw};

mod decode;
pub use decode::{DecodeError, LogDecoder};

mod error;
pub use error::{ConversionError, Error, Result};

mod frames;

mod manager;
pub use manager::{BlockQueryOptions, EventQueryOptions, HyperManager};

pub mod query;

mod range;
pub use range::BlockRange;

#[cfg(test)]
mod tests;
