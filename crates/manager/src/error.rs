use hyperquery_table::TableError;
use hyperquery_types::{DataType, SignatureError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("indexer error: {0}")]
    Client(#[from] indexer_client::Error),

    #[error("table error: {0}")]
    Table(#[from] TableError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The query returned nothing to build a result from.
    #[error("No data returned for event name: {event} from blocks {from_block} to {to_block}")]
    NoData {
        event: String,
        from_block: u64,
        to_block: u64,
    },

    #[error("All queries returned empty results.")]
    AllEmpty,
}

/// A value could not be converted to the type its column is mapped to.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("cannot convert {value} in column {column} to {data_type}")]
pub struct ConversionError {
    pub column: String,
    pub value: String,
    pub data_type: DataType,
}
