//! This module provides [`EventConfig`], the declarative description of an event to query.

use alloy_json_abi::Event;

use crate::mapping::{ColumnMapping, DataType};

/// Describes an on-chain log event and how to decode it.
///
/// The contract address, when present, is always stored in lower case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    /// Human-readable name of the event.
    name: String,
    /// Human-readable signature, e.g. `Transfer(address indexed from, address indexed to, uint256 value)`.
    signature: String,
    /// Contract emitting the event. `None` queries the event from any contract.
    contract: Option<String>,
    /// Column types applied to the query results.
    column_mapping: ColumnMapping,
}

impl EventConfig {
    /// Creates an event with the default [`ColumnMapping::common`] mapping and no contract.
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            contract: None,
            column_mapping: ColumnMapping::common(),
        }
    }

    pub fn with_contract(mut self, contract: impl AsRef<str>) -> Self {
        self.contract = Some(contract.as_ref().to_lowercase());
        self
    }

    pub fn with_column_mapping(mut self, column_mapping: ColumnMapping) -> Self {
        self.column_mapping = column_mapping;
        self
    }

    /// Adds decoded log columns to the current mapping.
    pub fn with_decoded_log<'a, I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, DataType)>,
    {
        self.column_mapping = self.column_mapping.with_decoded_log(columns);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    pub fn column_mapping(&self) -> &ColumnMapping {
        &self.column_mapping
    }

    /// Parses the signature into an ABI event.
    pub fn event(&self) -> Result<Event, SignatureError> {
        Event::parse(&self.signature).map_err(|err| SignatureError {
            signature: self.signature.clone(),
            reason: err.to_string(),
        })
    }

    /// Returns topic0 of the event: the keccak256 hash of its canonical signature,
    /// as `0x`-prefixed lower case hex.
    pub fn topic(&self) -> Result<String, SignatureError> {
        let selector = self.event()?.selector();

        Ok(format!("0x{}", hex::encode(selector)))
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("invalid event signature {signature:?}: {reason}")]
pub struct SignatureError {
    pub signature: String,
    pub reason: String,
}
