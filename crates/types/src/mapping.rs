//! Column type mappings applied while materializing query results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::fields::{BlockField, TransactionField};

/// Target type of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Float64,
    Float32,
    UInt64,
    UInt32,
    Int64,
    Int32,
    /// Integer rendered as a decimal string, lossless for 256-bit values.
    IntStr,
}

impl DataType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataType::Float64 => "float64",
            DataType::Float32 => "float32",
            DataType::UInt64 => "uint64",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::Int32 => "int32",
            DataType::IntStr => "intstr",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DataTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "float64" | "f64" => Ok(DataType::Float64),
            "float32" | "f32" => Ok(DataType::Float32),
            "uint64" | "u64" => Ok(DataType::UInt64),
            "uint32" | "u32" => Ok(DataType::UInt32),
            "int64" | "i64" => Ok(DataType::Int64),
            "int32" | "i32" => Ok(DataType::Int32),
            "intstr" => Ok(DataType::IntStr),
            _ => Err(DataTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown data type: {0}")]
pub struct DataTypeParseError(pub String);

/// Transaction columns mapped by default for every event.
pub static COMMON_TRANSACTION_MAPPING: Lazy<BTreeMap<TransactionField, DataType>> =
    Lazy::new(|| {
        BTreeMap::from([
            (TransactionField::GasUsed, DataType::Float64),
            (TransactionField::MaxPriorityFeePerGas, DataType::Float64),
            (TransactionField::MaxFeePerGas, DataType::Float64),
            (TransactionField::EffectiveGasPrice, DataType::Float64),
            (TransactionField::Nonce, DataType::UInt64),
            (TransactionField::ChainId, DataType::UInt64),
            (TransactionField::CumulativeGasUsed, DataType::UInt64),
            (TransactionField::Value, DataType::Float64),
            (TransactionField::Gas, DataType::UInt64),
            (TransactionField::GasPrice, DataType::Float64),
        ])
    });

/// Block columns mapped by default for every event.
pub static COMMON_BLOCK_MAPPING: Lazy<BTreeMap<BlockField, DataType>> = Lazy::new(|| {
    BTreeMap::from([
        (BlockField::Timestamp, DataType::UInt64),
        (BlockField::BaseFeePerGas, DataType::Float64),
        (BlockField::GasUsed, DataType::UInt64),
        (BlockField::Nonce, DataType::UInt64),
        (BlockField::Difficulty, DataType::UInt64),
        (BlockField::Size, DataType::UInt64),
        (BlockField::GasLimit, DataType::UInt64),
        (BlockField::BlobGasUsed, DataType::UInt64),
        (BlockField::ExcessBlobGas, DataType::UInt64),
    ])
});

/// Per-column target types for decoded log, transaction and block columns.
///
/// Columns that are not mapped keep the indexer's representation: quantities stay
/// `0x`-prefixed hex strings and decoded integers become decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub decoded_log: BTreeMap<String, DataType>,
    #[serde(default)]
    pub transaction: BTreeMap<TransactionField, DataType>,
    #[serde(default)]
    pub block: BTreeMap<BlockField, DataType>,
}

impl ColumnMapping {
    /// Mapping with the common transaction and block columns, used when an event
    /// doesn't specify its own.
    pub fn common() -> Self {
        Self {
            decoded_log: BTreeMap::new(),
            transaction: COMMON_TRANSACTION_MAPPING.clone(),
            block: COMMON_BLOCK_MAPPING.clone(),
        }
    }

    /// Mapping with only the common block columns.
    pub fn blocks_only() -> Self {
        Self {
            block: COMMON_BLOCK_MAPPING.clone(),
            ..Default::default()
        }
    }

    /// Adds decoded log columns to the mapping.
    pub fn with_decoded_log<'a, I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, DataType)>,
    {
        self.decoded_log.extend(
            columns
                .into_iter()
                .map(|(name, data_type)| (name.to_string(), data_type)),
        );
        self
    }
}
