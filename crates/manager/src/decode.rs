//! Decoding of raw logs with an event signature.

use alloy_dyn_abi::{DynSolValue, EventExt};
use alloy_json_abi::Event;
use alloy_primitives::B256;
use hyperquery_types::{EventConfig, Field, LogField, SignatureError};
use indexer_client::types::Row;
use serde_json::Value as Json;

const TOPIC_FIELDS: [LogField; 4] = [
    LogField::Topic0,
    LogField::Topic1,
    LogField::Topic2,
    LogField::Topic3,
];

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid topic {0}")]
    Topic(String),

    #[error("invalid log data: {0}")]
    Data(#[from] hex::FromHexError),

    #[error("abi error: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),

    #[error("log is missing parameter {0}")]
    MissingParameter(String),
}

/// Decodes logs of one event into its parameters, in signature order.
#[derive(Debug, Clone)]
pub struct LogDecoder {
    event: Event,
    columns: Vec<String>,
}

impl LogDecoder {
    pub fn new(event: &EventConfig) -> Result<Self, SignatureError> {
        let event = event.event()?;

        let columns = event
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                if input.name.is_empty() {
                    format!("arg{i}")
                } else {
                    input.name.clone()
                }
            })
            .collect();

        Ok(Self { event, columns })
    }

    /// Names of the decoded columns. Unnamed parameters are called `arg{index}`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn decode(&self, log: &Row) -> Result<Vec<DynSolValue>, DecodeError> {
        let topics = TOPIC_FIELDS
            .iter()
            .filter_map(|field| log.get(field.as_str()).and_then(Json::as_str))
            .map(|topic| {
                topic
                    .parse::<B256>()
                    .map_err(|_| DecodeError::Topic(topic.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data = log
            .get(LogField::Data.as_str())
            .and_then(Json::as_str)
            .unwrap_or("0x");
        let data = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;

        let decoded = self.event.decode_log_parts(topics, &data, true)?;
        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();

        self.event
            .inputs
            .iter()
            .zip(&self.columns)
            .map(|(input, column)| {
                let value = if input.indexed {
                    indexed.next()
                } else {
                    body.next()
                };

                value.ok_or_else(|| DecodeError::MissingParameter(column.clone()))
            })
            .collect()
    }
}
