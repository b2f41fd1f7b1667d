//! Materialization of indexer records into tables.

use std::collections::BTreeMap;

use hyperquery_table::{Column, Table, Value};
use hyperquery_types::{BlockField, ColumnMapping, DataType, Field, LogField, TransactionField};
use indexer_client::types::Row;
use serde_json::Value as Json;

use crate::convert::{convert_decoded, convert_raw};
use crate::decode::LogDecoder;
use crate::error::Result;

/// Columns the indexer serves as plain integers. They are always materialized as
/// `UInt64` so that joins on them match across tables.
const NATIVE_LOG_COLUMNS: &[LogField] = &[
    LogField::BlockNumber,
    LogField::LogIndex,
    LogField::TransactionIndex,
];
const NATIVE_TRANSACTION_COLUMNS: &[TransactionField] = &[
    TransactionField::BlockNumber,
    TransactionField::TransactionIndex,
    TransactionField::Type,
    TransactionField::Status,
];
const NATIVE_BLOCK_COLUMNS: &[BlockField] = &[BlockField::Number];

/// Builds a table with one column per field of `F`, converting values with `mapping`.
fn records_to_table<F: Field>(
    rows: &[Row],
    mapping: &BTreeMap<F, DataType>,
    native: &[F],
) -> Result<Table> {
    let columns = F::ALL
        .iter()
        .map(|field| {
            let name = field.as_str();
            let data_type = mapping
                .get(field)
                .copied()
                .or_else(|| native.contains(field).then_some(DataType::UInt64));

            let values = rows
                .iter()
                .map(|row| convert_raw(name, row.get(name).unwrap_or(&Json::Null), data_type))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(Column::new(name, values))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::new(columns)?)
}

pub fn logs_table(rows: &[Row]) -> Result<Table> {
    records_to_table(rows, &BTreeMap::new(), NATIVE_LOG_COLUMNS)
}

pub fn transactions_table(rows: &[Row], mapping: &ColumnMapping) -> Result<Table> {
    records_to_table(rows, &mapping.transaction, NATIVE_TRANSACTION_COLUMNS)
}

pub fn blocks_table(rows: &[Row], mapping: &ColumnMapping) -> Result<Table> {
    records_to_table(rows, &mapping.block, NATIVE_BLOCK_COLUMNS)
}

/// Decodes `rows` into one column per event parameter.
///
/// Logs that fail to decode yield a row of nulls, so the table always has as many rows
/// as there are logs.
pub fn decoded_logs_table(
    decoder: &LogDecoder,
    rows: &[Row],
    mapping: &ColumnMapping,
) -> Result<Table> {
    let columns = decoder.columns();
    let mut values: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); columns.len()];
    let mut failed = 0usize;

    for row in rows {
        match decoder.decode(row) {
            Ok(decoded) => {
                for ((column, value), out) in columns.iter().zip(&decoded).zip(&mut values) {
                    let data_type = mapping.decoded_log.get(column).copied();
                    out.push(convert_decoded(column, value, data_type)?);
                }
            }
            Err(err) => {
                failed += 1;
                tracing::debug!(error = %err, "Failed to decode log");
                values.iter_mut().for_each(|out| out.push(Value::Null));
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = rows.len(), "Some logs could not be decoded");
    }

    let columns = columns
        .iter()
        .zip(values)
        .map(|(name, values)| Column::new(name.as_str(), values))
        .collect();

    Ok(Table::new(columns)?)
}
