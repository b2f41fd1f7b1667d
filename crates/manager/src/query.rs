//! Construction of indexer queries.

use hyperquery_types::{address_to_topic, EventConfig, SignatureError};
use indexer_client::types::{
    BlockSelection, FieldSelection, LogSelection, Query, TransactionSelection,
};

use crate::range::BlockRange;

/// Builds a query over `range` selecting every log, transaction and block field.
pub fn create_query(
    range: BlockRange,
    logs: Vec<LogSelection>,
    transactions: Vec<TransactionSelection>,
    blocks: Vec<BlockSelection>,
) -> Query {
    Query {
        from_block: range.from_block,
        to_block: Some(range.to_block),
        logs,
        transactions,
        blocks,
        field_selection: FieldSelection::all(),
        ..Default::default()
    }
}

/// Builds a query for the logs of `event`.
///
/// Without a contract the query matches the event emitted by any contract. `address`
/// restricts the first indexed parameter of the event to that address.
pub fn create_event_query(
    event: &EventConfig,
    range: BlockRange,
    address: Option<&str>,
) -> Result<Query, SignatureError> {
    let mut topics = vec![vec![event.topic()?]];
    if let Some(address) = address {
        topics.push(vec![address_to_topic(&address.to_lowercase())]);
    }

    let selection = LogSelection {
        address: event.contract().map(str::to_string).into_iter().collect(),
        topics,
    };

    Ok(create_query(range, vec![selection], vec![], vec![]))
}
