//! Wire types of the HyperSync JSON API.

use hyperquery_types::{BlockField, Field, LogField, TransactionField};
use serde::{Deserialize, Deserializer, Serialize};

/// A single record (block, transaction or log) as returned by the indexer, keyed by field name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Selects logs by emitting contract and topics.
///
/// Empty lists match anything. `topics[i]` lists the accepted values of topic `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Vec<String>>,
}

/// Selects transactions. An empty selection matches every transaction of the range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sighash: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hash: Vec<String>,
}

/// Selects blocks. An empty selection matches every block of the range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hash: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub miner: Vec<String>,
}

/// Fields to return for each record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    #[serde(default)]
    pub block: Vec<BlockField>,
    #[serde(default)]
    pub transaction: Vec<TransactionField>,
    #[serde(default)]
    pub log: Vec<LogField>,
}

impl FieldSelection {
    /// Selects every field of every record kind.
    pub fn all() -> Self {
        Self {
            block: BlockField::ALL.to_vec(),
            transaction: TransactionField::ALL.to_vec(),
            log: LogField::ALL.to_vec(),
        }
    }
}

/// A query over the block range `[from_block, to_block)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub from_block: u64,
    /// Exclusive upper bound. `None` queries up to the indexer's archive height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
    #[serde(default)]
    pub logs: Vec<LogSelection>,
    #[serde(default)]
    pub transactions: Vec<TransactionSelection>,
    #[serde(default)]
    pub blocks: Vec<BlockSelection>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_all_blocks: bool,
    pub field_selection: FieldSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num_blocks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num_transactions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num_logs: Option<usize>,
}

/// Records returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub blocks: Vec<Row>,
    #[serde(default)]
    pub transactions: Vec<Row>,
    #[serde(default)]
    pub logs: Vec<Row>,
}

impl ResponseData {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.transactions.is_empty() && self.logs.is_empty()
    }

    pub fn extend(&mut self, other: ResponseData) {
        self.blocks.extend(other.blocks);
        self.transactions.extend(other.transactions);
        self.logs.extend(other.logs);
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Highest block the indexer has archived.
    #[serde(default)]
    pub archive_height: Option<u64>,
    /// First block the next page should start from.
    pub next_block: u64,
    /// Server side execution time in milliseconds.
    #[serde(default)]
    pub total_execution_time: u64,
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<ResponseData>,
}

/// The indexer returns either a single batch or a list of batches.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ResponseData>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ResponseData),
        Many(Vec<ResponseData>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(data) => vec![data],
        OneOrMany::Many(data) => data,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HeightResponse {
    pub height: u64,
}

/// Expands a `topics` array of a log into the `topic0`..`topic3` columns.
pub(crate) fn flatten_topics(log: &mut Row) {
    let Some(serde_json::Value::Array(topics)) = log.remove("topics") else {
        return;
    };

    for (i, topic) in topics.into_iter().take(4).enumerate() {
        log.entry(format!("topic{i}")).or_insert(topic);
    }
}
