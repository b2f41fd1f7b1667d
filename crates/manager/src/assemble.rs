//! Joins decoded logs, raw logs, transactions and blocks into a single result table.

use hyperquery_table::Table;

use crate::error::{Error, Result};

/// Block columns joined onto transactions.
pub const BLOCK_COLUMNS: &[&str] = &[
    "number",
    "extra_data",
    "timestamp",
    "base_fee_per_gas",
    "gas_used",
    "parent_beacon_block_root",
];

/// Suffix of block columns clashing with transaction columns, e.g. `gas_used_block`.
pub const BLOCK_SUFFIX: &str = "_block";

/// Columns of a result made of transactions only.
pub const TRANSACTION_SUMMARY_COLUMNS: &[&str] = &[
    "hash",
    "block_number",
    "extra_data",
    "to",
    "from",
    "nonce",
    "type",
    "block_hash",
    "timestamp",
    "base_fee_per_gas",
    "gas_used_block",
    "parent_beacon_block_root",
    "max_priority_fee_per_gas",
    "max_fee_per_gas",
    "effective_gas_price",
    "gas_used",
    "blob_versioned_hashes",
];

/// Transaction columns joined onto decoded logs.
pub const EVENT_TRANSACTION_COLUMNS: &[&str] = &[
    "hash",
    "block_number",
    "extra_data",
    "to",
    "from",
    "nonce",
    "type",
    "block_hash",
    "timestamp",
    "base_fee_per_gas",
    "gas_used_block",
    "max_priority_fee_per_gas",
    "max_fee_per_gas",
    "effective_gas_price",
    "gas_used",
    "chain_id",
];

/// Suffix of transaction columns clashing with decoded event parameters.
const EVENT_SUFFIX: &str = "_right";

/// Tables materialized from one query.
#[derive(Debug, Clone, Default)]
pub struct QueryTables {
    pub decoded_logs: Table,
    pub logs: Table,
    pub transactions: Table,
    pub blocks: Table,
}

impl QueryTables {
    pub fn is_empty(&self) -> bool {
        self.decoded_logs.is_empty()
            && self.logs.is_empty()
            && self.transactions.is_empty()
            && self.blocks.is_empty()
    }
}

/// Transactions left-joined with the block they belong to.
fn transactions_with_blocks(transactions: &Table, blocks: &Table) -> Result<Table> {
    let blocks = blocks
        .project(BLOCK_COLUMNS)
        .rename(&[("number", "block_number")])?;

    let transactions = if transactions.contains("block_number") {
        transactions.clone()
    } else {
        transactions.project(&["block_number"]).hstack(transactions.clone())?
    };

    Ok(transactions.left_join(&blocks, "block_number", BLOCK_SUFFIX)?)
}

/// Assembles the result of a query.
///
/// When there are no logs the result summarizes transactions, or is `None` without any.
/// Otherwise it is the decoded logs, joined with their transactions when `tx_data` is set.
pub fn assemble(tables: QueryTables, tx_data: bool) -> Result<Option<Table>> {
    if tables.is_empty() {
        return Err(Error::AllEmpty);
    }

    let txs_blocks = transactions_with_blocks(&tables.transactions, &tables.blocks)?;

    if tables.decoded_logs.is_empty() || tables.logs.is_empty() {
        if txs_blocks.is_empty() {
            return Ok(None);
        }

        return Ok(Some(txs_blocks.project(TRANSACTION_SUMMARY_COLUMNS)));
    }

    if !tx_data {
        return Ok(Some(tables.decoded_logs));
    }

    let hashes = tables
        .logs
        .project(&["transaction_hash"])
        .rename(&[("transaction_hash", "hash")])?;

    let result = tables.decoded_logs.hstack(hashes)?.left_join(
        &txs_blocks.project(EVENT_TRANSACTION_COLUMNS),
        "hash",
        EVENT_SUFFIX,
    )?;

    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperquery_table::{Column, Value};

    fn decoded_logs() -> Table {
        Table::new(vec![
            Column::new("sender", vec!["0xs1".into(), "0xs2".into()]),
            Column::new("amount", vec![1.5f64.into(), 2.5f64.into()]),
        ])
        .unwrap()
    }

    fn logs() -> Table {
        Table::new(vec![
            Column::new("transaction_hash", vec!["0xt1".into(), "0xt2".into()]),
            Column::new("log_index", vec![0u64.into(), 3u64.into()]),
        ])
        .unwrap()
    }

    fn transactions() -> Table {
        Table::new(vec![
            Column::new("hash", vec!["0xt1".into(), "0xt2".into()]),
            Column::new("block_number", vec![100u64.into(), 101u64.into()]),
            Column::new("from", vec!["0xf1".into(), "0xf2".into()]),
            Column::new("gas_used", vec![21000.0f64.into(), 50000.0f64.into()]),
            Column::new("chain_id", vec![1u64.into(), 1u64.into()]),
        ])
        .unwrap()
    }

    fn blocks() -> Table {
        Table::new(vec![
            Column::new("number", vec![100u64.into(), 101u64.into()]),
            Column::new("timestamp", vec![1_000u64.into(), 1_012u64.into()]),
            Column::new("gas_used", vec![9_000_000u64.into(), 8_000_000u64.into()]),
            Column::new("extra_data", vec!["0x".into(), "0x6265617665".into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_all_empty_fails() {
        let err = assemble(QueryTables::default(), true).unwrap_err();

        assert!(matches!(err, Error::AllEmpty));
        assert_eq!(err.to_string(), "All queries returned empty results.");
    }

    #[test]
    fn test_event_result_contains_joined_columns() {
        let tables = QueryTables {
            decoded_logs: decoded_logs(),
            logs: logs(),
            transactions: transactions(),
            blocks: blocks(),
        };

        let result = assemble(tables, true).unwrap().unwrap();

        let mut expected = vec!["sender", "amount"];
        expected.extend_from_slice(EVENT_TRANSACTION_COLUMNS);
        assert_eq!(result.column_names(), expected);
        assert_eq!(result.height(), 2);
        assert_eq!(result.get(1, "block_number"), Some(&Value::UInt64(101)));
        assert_eq!(result.get(1, "timestamp"), Some(&Value::UInt64(1_012)));
        assert_eq!(result.get(1, "from"), Some(&Value::from("0xf2")));
        assert_eq!(
            result.get(0, "gas_used_block"),
            Some(&Value::UInt64(9_000_000))
        );
        assert_eq!(result.get(0, "gas_used"), Some(&Value::Float64(21000.0)));
        // absent from the transactions, filled with nulls
        assert_eq!(result.get(0, "max_fee_per_gas"), Some(&Value::Null));
    }

    #[test]
    fn test_event_result_without_tx_data() {
        let tables = QueryTables {
            decoded_logs: decoded_logs(),
            logs: logs(),
            transactions: transactions(),
            blocks: blocks(),
        };

        let result = assemble(tables, false).unwrap().unwrap();

        assert_eq!(result, decoded_logs());
    }

    #[test]
    fn test_transactions_without_logs_are_summarized() {
        let tables = QueryTables {
            transactions: transactions(),
            blocks: blocks(),
            ..Default::default()
        };

        let result = assemble(tables, true).unwrap().unwrap();

        assert_eq!(result.column_names(), TRANSACTION_SUMMARY_COLUMNS);
        assert_eq!(result.height(), 2);
        assert_eq!(result.get(1, "extra_data"), Some(&Value::from("0x6265617665")));
        assert_eq!(result.get(0, "blob_versioned_hashes"), Some(&Value::Null));
    }

    #[test]
    fn test_blocks_only_yield_no_result() {
        let tables = QueryTables {
            blocks: blocks(),
            ..Default::default()
        };

        assert_eq!(assemble(tables, true).unwrap(), None);
    }
}
