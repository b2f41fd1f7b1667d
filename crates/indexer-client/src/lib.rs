mod client;
pub use client::{Client as IndexerClient, ClientConfig, Error, Result, DEFAULT_TIMEOUT_SECONDS};

mod api;
pub use api::IndexerApi;

#[cfg(feature = "mocks")]
pub use api::MockIndexerApi;

pub mod types;
pub use types::{
    BlockSelection, FieldSelection, LogSelection, Query, QueryResponse, ResponseData, Row,
    TransactionSelection,
};
