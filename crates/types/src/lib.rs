//! Types shared across the workspace: the HyperSync networks registry, the columns the
//! indexer serves, column type mappings and event descriptors.

pub mod fields;
pub use fields::{BlockField, Field, LogField, TransactionField};

pub mod mapping;
pub use mapping::{ColumnMapping, DataType, COMMON_BLOCK_MAPPING, COMMON_TRANSACTION_MAPPING};

mod event;
pub use event::{EventConfig, SignatureError};

pub mod network;
pub use network::{Network, Tier};

mod helpers;
pub use helpers::{address_to_topic, byte_to_string};
