//! Equi-joins of two tables on a single key column.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TableError};
use crate::table::{Column, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinKind {
    Left,
    Inner,
}

impl Table {
    /// Left join on column `on`, present in both tables.
    ///
    /// Every left row is kept, repeated once per matching right row. Unmatched rows get
    /// nulls in the right columns. Right columns whose names clash with left ones are
    /// renamed with `suffix` appended. Null keys never match.
    pub fn left_join(&self, other: &Table, on: &str, suffix: &str) -> Result<Table> {
        join(self, other, on, suffix, JoinKind::Left)
    }

    /// Inner join on column `on`, keeping only the rows that match in both tables.
    pub fn inner_join(&self, other: &Table, on: &str, suffix: &str) -> Result<Table> {
        join(self, other, on, suffix, JoinKind::Inner)
    }
}

fn join(left: &Table, right: &Table, on: &str, suffix: &str, kind: JoinKind) -> Result<Table> {
    let left_key = left
        .column(on)
        .ok_or_else(|| TableError::ColumnNotFound(on.to_string()))?;
    let right_key = right
        .column(on)
        .ok_or_else(|| TableError::ColumnNotFound(on.to_string()))?;

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (row, value) in right_key.values().iter().enumerate() {
        if let Some(key) = value.join_key() {
            index.entry(key).or_default().push(row);
        }
    }

    let mut left_rows = Vec::with_capacity(left.height());
    let mut right_rows = Vec::with_capacity(left.height());

    for (row, value) in left_key.values().iter().enumerate() {
        let matches = value.join_key().and_then(|key| index.get(&key));

        match matches {
            Some(matches) => {
                for matched in matches {
                    left_rows.push(Some(row));
                    right_rows.push(Some(*matched));
                }
            }
            None if kind == JoinKind::Left => {
                left_rows.push(Some(row));
                right_rows.push(None);
            }
            None => {}
        }
    }

    let left_names: HashSet<&str> = left.column_names().into_iter().collect();

    let mut columns: Vec<Column> = left
        .columns()
        .iter()
        .map(|column| column.take(&left_rows))
        .collect();

    for column in right.columns().iter().filter(|column| column.name() != on) {
        let taken = column.take(&right_rows);
        let name = if left_names.contains(column.name()) {
            format!("{}{}", column.name(), suffix)
        } else {
            column.name().to_string()
        };

        columns.push(Column::new(name, taken.into_values()));
    }

    tracing::trace!(
        on,
        left = left.height(),
        right = right.height(),
        joined = left_rows.len(),
        "Joined tables"
    );

    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn transactions() -> Table {
        Table::new(vec![
            Column::new(
                "hash",
                vec!["0xa".into(), "0xb".into(), "0xc".into(), Value::Null],
            ),
            Column::new(
                "block_number",
                vec![10u64.into(), 11u64.into(), 99u64.into(), 10u64.into()],
            ),
            Column::new(
                "gas_used",
                vec![1.0f64.into(), 2.0f64.into(), 3.0f64.into(), 4.0f64.into()],
            ),
        ])
        .unwrap()
    }

    fn blocks() -> Table {
        Table::new(vec![
            Column::new("block_number", vec![10u64.into(), 11u64.into()]),
            Column::new("timestamp", vec![1000u64.into(), 1012u64.into()]),
            Column::new("gas_used", vec![500u64.into(), 600u64.into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_left_join_keeps_unmatched_and_suffixes_clashes() {
        let joined = transactions()
            .left_join(&blocks(), "block_number", "_block")
            .unwrap();

        assert_eq!(
            joined.column_names(),
            vec!["hash", "block_number", "gas_used", "timestamp", "gas_used_block"]
        );
        assert_eq!(joined.height(), 4);
        assert_eq!(joined.get(1, "timestamp"), Some(&Value::UInt64(1012)));
        assert_eq!(joined.get(2, "timestamp"), Some(&Value::Null));
        assert_eq!(joined.get(0, "gas_used_block"), Some(&Value::UInt64(500)));
        assert_eq!(joined.get(0, "gas_used"), Some(&Value::Float64(1.0)));
    }

    #[test]
    fn test_left_join_one_to_many() {
        let logs = Table::new(vec![Column::new("hash", vec!["0xA".into()])]).unwrap();

        let joined = logs.left_join(&transactions(), "hash", "_tx").unwrap();
        assert_eq!(joined.height(), 1);
        assert_eq!(joined.get(0, "block_number"), Some(&Value::UInt64(10)));

        let many = blocks().left_join(&transactions(), "block_number", "_tx").unwrap();
        // block 10 matches two transactions
        assert_eq!(many.height(), 3);
    }

    #[test]
    fn test_null_keys_never_match() {
        let left = Table::new(vec![Column::new("hash", vec![Value::Null])]).unwrap();

        let joined = left.left_join(&transactions(), "hash", "_tx").unwrap();
        assert_eq!(joined.height(), 1);
        assert_eq!(joined.get(0, "block_number"), Some(&Value::Null));

        let inner = left.inner_join(&transactions(), "hash", "_tx").unwrap();
        assert!(inner.is_empty());
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let joined = transactions()
            .inner_join(&blocks(), "block_number", "_block")
            .unwrap();

        assert_eq!(joined.height(), 3);
        assert!(joined
            .column("timestamp")
            .unwrap()
            .values()
            .iter()
            .all(|value| !value.is_null()));
    }

    #[test]
    fn test_missing_key_column() {
        let err = transactions()
            .left_join(&blocks(), "hash", "_block")
            .unwrap_err();

        assert!(matches!(err, TableError::ColumnNotFound(name) if name == "hash"));
    }

    #[test]
    fn test_text_keys_do_not_match_numbers() {
        let left = Table::new(vec![Column::new(
            "block_number",
            vec!["100".into(), 101u64.into()],
        )])
        .unwrap();
        let right = Table::new(vec![
            Column::new("block_number", vec![100u64.into(), 101u64.into()]),
            Column::new("timestamp", vec![1000u64.into(), 1012u64.into()]),
        ])
        .unwrap();

        let joined = left.left_join(&right, "block_number", "_right").unwrap();
        assert_eq!(joined.get(0, "timestamp"), Some(&Value::Null));
        assert_eq!(joined.get(1, "timestamp"), Some(&Value::UInt64(1012)));

        let inner = left.inner_join(&right, "block_number", "_right").unwrap();
        assert_eq!(inner.height(), 1);
    }
}
