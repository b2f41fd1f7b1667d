use hyperquery_table::Value;
use hyperquery_types::{address_to_topic, DataType, EventConfig};
use indexer_client::types::{QueryResponse, ResponseData};
use indexer_client::MockIndexerApi;
use once_cell::sync::Lazy;

use crate::assemble::{EVENT_TRANSACTION_COLUMNS, TRANSACTION_SUMMARY_COLUMNS};
use crate::{BlockQueryOptions, Error, EventQueryOptions, HyperManager};

static TRANSFER: Lazy<EventConfig> = Lazy::new(|| {
    EventConfig::new(
        "Transfer",
        "Transfer(address indexed from, address indexed to, uint256 value)",
    )
    .with_contract("0xdAC17F958D2ee523a2206206994597C13D831ec7")
    .with_decoded_log([("value", DataType::Float64)])
});

static TRANSFER_RESPONSE: Lazy<QueryResponse> = Lazy::new(|| {
    serde_json::from_str::<QueryResponse>(include_str!("./assets/transfer_response.json"))
        .expect("JSON was not well-formatted")
});

fn tx_hash(c: char) -> String {
    format!("0x{}", c.to_string().repeat(64))
}

fn manager(mock: MockIndexerApi) -> HyperManager<MockIndexerApi> {
    HyperManager::new(mock, "eth").with_print_time(false)
}

fn empty_response(next_block: u64) -> QueryResponse {
    QueryResponse {
        archive_height: Some(next_block),
        next_block,
        total_execution_time: 1,
        data: vec![ResponseData::default()],
    }
}

fn range(from_block: u64, to_block: u64) -> EventQueryOptions {
    EventQueryOptions {
        from_block: Some(from_block),
        to_block: Some(to_block),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_event_query_joins_transactions_and_blocks() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get_height().never();
    mock.expect_get()
        .withf(|query| {
            query.from_block == 100
                && query.to_block == Some(102)
                && query.logs[0].address == ["0xdac17f958d2ee523a2206206994597c13d831ec7"]
                && query.logs[0].topics == [vec![TRANSFER.topic().unwrap()]]
        })
        .times(1)
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let table = manager(mock)
        .execute_event_query(&TRANSFER, range(100, 102))
        .await
        .unwrap();

    let expected: Vec<String> = ["from", "to", "value"]
        .into_iter()
        .map(str::to_string)
        .chain(EVENT_TRANSACTION_COLUMNS.iter().map(|name| match *name {
            "from" | "to" => format!("{name}_right"),
            other => other.to_string(),
        }))
        .collect();

    assert_eq!(table.column_names(), expected);
    assert_eq!(table.height(), 2);

    assert_eq!(table.get(0, "value"), Some(&Value::Float64(1000.0)));
    assert_eq!(table.get(1, "value"), Some(&Value::Float64(2000.0)));
    assert_eq!(
        table.get(1, "from"),
        Some(&Value::Text(format!("0x{}", "33".repeat(20))))
    );
    assert_eq!(table.get(0, "hash"), Some(&Value::Text(tx_hash('a'))));
    assert_eq!(table.get(0, "block_number"), Some(&Value::UInt64(100)));
    assert_eq!(table.get(0, "timestamp"), Some(&Value::UInt64(1_700_000_000)));
    assert_eq!(table.get(0, "gas_used"), Some(&Value::Float64(21_000.0)));
    assert_eq!(
        table.get(0, "gas_used_block"),
        Some(&Value::UInt64(30_000_000))
    );
    assert_eq!(table.get(1, "chain_id"), Some(&Value::UInt64(1)));
}

#[tokio::test]
async fn test_event_query_resolves_range_from_height() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get_height().times(1).returning(|| Ok(102));
    mock.expect_get()
        .withf(|query| query.from_block == 100 && query.to_block == Some(102))
        .times(1)
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let options = EventQueryOptions {
        block_range: Some(2),
        ..Default::default()
    };

    let table = manager(mock)
        .execute_event_query(&TRANSFER, options)
        .await
        .unwrap();

    assert_eq!(table.height(), 2);
}

#[tokio::test]
async fn test_event_query_filters_by_address() {
    let address = format!("0x{}", "11".repeat(20));
    let topic = address_to_topic(&address);

    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .withf(move |query| query.logs[0].topics.len() == 2 && query.logs[0].topics[1] == [topic.clone()])
        .times(1)
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let options = EventQueryOptions {
        address: Some(address.to_uppercase().replace("0X", "0x")),
        ..range(100, 102)
    };

    manager(mock)
        .execute_event_query(&TRANSFER, options)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_event_query_without_tx_data() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let options = EventQueryOptions {
        tx_data: false,
        ..range(100, 102)
    };

    let table = manager(mock)
        .execute_event_query(&TRANSFER, options)
        .await
        .unwrap();

    assert_eq!(table.column_names(), vec!["from", "to", "value"]);
}

#[tokio::test]
async fn test_event_query_without_data_fails() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .times(1)
        .returning(|query| Ok(empty_response(query.to_block.unwrap())));

    let err = manager(mock)
        .execute_event_query(&TRANSFER, range(100, 102))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NoData {
            from_block: 100,
            to_block: 102,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "No data returned for event name: Transfer from blocks 100 to 102"
    );
}

#[tokio::test]
async fn test_event_query_past_the_tip_has_no_data() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get_height().never();
    mock.expect_get().times(1).returning(|query| {
        Ok(QueryResponse {
            archive_height: Some(200),
            next_block: query.from_block,
            total_execution_time: 1,
            data: vec![],
        })
    });

    let err = manager(mock)
        .execute_event_query(&TRANSFER, range(500, 600))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NoData {
            from_block: 500,
            to_block: 600,
            ..
        }
    ));
}

#[tokio::test]
async fn test_event_query_saves_parquet() {
    let output_dir =
        std::env::temp_dir().join(format!("hyperquery-manager-{}", std::process::id()));

    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let manager = manager(mock).with_output_dir(&output_dir);
    let options = EventQueryOptions {
        save_data: true,
        ..range(100, 102)
    };

    manager
        .execute_event_query(&TRANSFER, options)
        .await
        .unwrap();

    let path = output_dir.join("eth").join("Transfer.parquet");
    assert_eq!(manager.output_path("Transfer"), path);
    assert!(path.exists());

    std::fs::remove_dir_all(&output_dir).unwrap();
}

#[tokio::test]
async fn test_get_txs_summarizes_transactions() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .withf(|query| {
            query.logs.is_empty() && query.transactions.len() == 1 && query.blocks.len() == 1
        })
        .times(1)
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let table = manager(mock)
        .get_txs(BlockQueryOptions {
            from_block: Some(100),
            to_block: Some(102),
            ..Default::default()
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(table.column_names(), TRANSACTION_SUMMARY_COLUMNS);
    assert_eq!(table.height(), 2);
    assert_eq!(
        table.get(0, "extra_data"),
        Some(&Value::from("0x6265617665726275696c642e6f7267"))
    );
    assert_eq!(table.get(1, "nonce"), Some(&Value::UInt64(1)));
}

#[tokio::test]
async fn test_search_txs_by_hash() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get_height().times(1).returning(|| Ok(500));
    mock.expect_get()
        .withf(|query| {
            query.from_block == 0
                && query.to_block == Some(500)
                && query.transactions[0].hash == [tx_hash('b')]
        })
        .times(1)
        .returning(|query| {
            let mut response = TRANSFER_RESPONSE.clone();
            response.next_block = query.to_block.unwrap();
            for data in response.data.iter_mut() {
                data.logs.clear();
                data.transactions.retain(|tx| tx["hash"] == tx_hash('b').as_str());
            }
            Ok(response)
        });

    let table = manager(mock)
        .search_txs([tx_hash('b')], false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(table.height(), 1);
    assert_eq!(table.get(0, "block_number"), Some(&Value::UInt64(101)));
    assert_eq!(table.get(0, "extra_data"), Some(&Value::from("0x")));
}

#[tokio::test]
async fn test_get_blocks() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .withf(|query| query.transactions.is_empty() && query.blocks.len() == 1)
        .times(1)
        .returning(|_| Ok(TRANSFER_RESPONSE.clone()));

    let table = manager(mock)
        .get_blocks(BlockQueryOptions {
            from_block: Some(100),
            to_block: Some(102),
            ..Default::default()
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.get(1, "number"), Some(&Value::UInt64(101)));
    assert_eq!(table.get(1, "gas_used"), Some(&Value::UInt64(15_000_000)));
}

#[tokio::test]
async fn test_get_blocks_empty_range() {
    let mut mock = MockIndexerApi::new();
    mock.expect_get()
        .returning(|query| Ok(empty_response(query.to_block.unwrap())));

    let table = manager(mock)
        .get_blocks(BlockQueryOptions {
            from_block: Some(100),
            to_block: Some(102),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(table.is_none());
}
