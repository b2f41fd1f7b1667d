use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use hyperquery_table::Table;
use hyperquery_types::{ColumnMapping, EventConfig, Network};
use indexer_client::types::{BlockSelection, ResponseData, TransactionSelection};
use indexer_client::{IndexerApi, IndexerClient};
use tracing::instrument;

use crate::assemble::{assemble, QueryTables};
use crate::config::{network_label, ManagerConfig, DEFAULT_OUTPUT_DIR};
use crate::decode::LogDecoder;
use crate::error::{Error, Result};
use crate::frames::{blocks_table, decoded_logs_table, logs_table, transactions_table};
use crate::query::{create_event_query, create_query};
use crate::range::BlockRange;

/// Options of [`HyperManager::execute_event_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQueryOptions {
    pub from_block: Option<u64>,
    /// Exclusive end of the range, the chain height when not set.
    pub to_block: Option<u64>,
    /// Number of blocks before `to_block` to query when `from_block` is not set.
    pub block_range: Option<u64>,
    /// Also write the result to `{output_dir}/{network}/{event}.parquet`.
    pub save_data: bool,
    /// Only logs whose first indexed parameter is this address.
    pub address: Option<String>,
    /// Join the transaction and block of every log.
    pub tx_data: bool,
}

impl Default for EventQueryOptions {
    fn default() -> Self {
        Self {
            from_block: None,
            to_block: None,
            block_range: None,
            save_data: false,
            address: None,
            tx_data: true,
        }
    }
}

/// Options of the block and transaction queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockQueryOptions {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub block_range: Option<u64>,
    pub save_data: bool,
}

/// Queries one HyperSync endpoint and assembles the results into tables.
pub struct HyperManager<C = IndexerClient> {
    client: Arc<C>,
    /// Label of the endpoint, used in output paths.
    network: String,
    output_dir: PathBuf,
    print_time: bool,
}

impl<C> Clone for HyperManager<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            network: self.network.clone(),
            output_dir: self.output_dir.clone(),
            print_time: self.print_time,
        }
    }
}

impl HyperManager<IndexerClient> {
    pub fn from_config(config: &ManagerConfig) -> Result<Self> {
        let client = IndexerClient::new(config.indexer.clone())?;

        Ok(Self::new(client, network_label(&config.indexer.url))
            .with_output_dir(&config.output_dir)
            .with_print_time(config.print_time))
    }

    /// Manager of the HyperSync endpoint of `network` with default settings.
    pub fn for_network(network: Network) -> Result<Self> {
        Self::from_config(&ManagerConfig::for_network(network))
    }
}

impl<C: IndexerApi> HyperManager<C> {
    pub fn new(client: C, network: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            network: network.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            print_time: true,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_print_time(mut self, print_time: bool) -> Self {
        self.print_time = print_time;
        self
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Path a result named `name` is saved to.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(&self.network)
            .join(format!("{name}.parquet"))
    }

    /// Current height of the chain.
    pub async fn get_height(&self) -> Result<u64> {
        Ok(self.client.get_height().await?)
    }

    /// Resolves the block range of a query. The chain height is only fetched when
    /// `to_block` is not given.
    pub async fn get_block_range(
        &self,
        from_block: Option<u64>,
        to_block: Option<u64>,
        block_range: Option<u64>,
    ) -> Result<BlockRange> {
        let to_block = match to_block {
            Some(to_block) => to_block,
            None => self.get_height().await?,
        };

        Ok(BlockRange::resolve(from_block, to_block, block_range))
    }

    /// Queries the logs of `event` and returns them decoded, joined with their
    /// transactions and blocks unless `options.tx_data` is off.
    #[instrument(skip_all, fields(network = %self.network, event = event.name()))]
    pub async fn execute_event_query(
        &self,
        event: &EventConfig,
        options: EventQueryOptions,
    ) -> Result<Table> {
        let started = Instant::now();

        let range = self
            .get_block_range(options.from_block, options.to_block, options.block_range)
            .await?;
        let query = create_event_query(event, range, options.address.as_deref())?;
        let decoder = LogDecoder::new(event)?;

        let data = self.client.collect(&query).await?;
        log_collected(&data, range);

        let mapping = event.column_mapping();
        let tables = QueryTables {
            decoded_logs: decoded_logs_table(&decoder, &data.logs, mapping)?,
            logs: logs_table(&data.logs)?,
            transactions: transactions_table(&data.transactions, mapping)?,
            blocks: blocks_table(&data.blocks, mapping)?,
        };

        let result = match assemble(tables, options.tx_data) {
            Ok(Some(result)) => result,
            Ok(None) | Err(Error::AllEmpty) => {
                return Err(Error::NoData {
                    event: event.name().to_string(),
                    from_block: range.from_block,
                    to_block: range.to_block,
                })
            }
            Err(err) => return Err(err),
        };

        if options.save_data {
            self.save(&result, event.name())?;
        }

        self.log_elapsed("execute_event_query", started);

        Ok(result)
    }

    /// Queries every transaction of a range with its block.
    #[instrument(skip_all, fields(network = %self.network))]
    pub async fn get_txs(&self, options: BlockQueryOptions) -> Result<Option<Table>> {
        let started = Instant::now();

        let range = self
            .get_block_range(options.from_block, options.to_block, options.block_range)
            .await?;
        let query = create_query(
            range,
            vec![],
            vec![TransactionSelection::default()],
            vec![BlockSelection::default()],
        );

        let result = self.collect_transactions(&query, range).await?;
        if let (Some(result), true) = (&result, options.save_data) {
            self.save(result, "transactions")?;
        }

        self.log_elapsed("get_txs", started);

        Ok(result)
    }

    /// Looks up transactions by hash over the whole chain.
    #[instrument(skip_all, fields(network = %self.network))]
    pub async fn search_txs<I, S>(&self, hashes: I, save_data: bool) -> Result<Option<Table>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let started = Instant::now();

        let range = BlockRange::new(0, self.get_height().await?);
        let selection = TransactionSelection {
            hash: hashes.into_iter().map(Into::into).collect(),
            ..Default::default()
        };
        let query = create_query(range, vec![], vec![selection], vec![]);

        let result = self.collect_transactions(&query, range).await?;
        if let (Some(result), true) = (&result, save_data) {
            self.save(result, "search_txs")?;
        }

        self.log_elapsed("search_txs", started);

        Ok(result)
    }

    /// Queries the blocks of a range. Returns `None` when the range has no blocks.
    #[instrument(skip_all, fields(network = %self.network))]
    pub async fn get_blocks(&self, options: BlockQueryOptions) -> Result<Option<Table>> {
        let started = Instant::now();

        let range = self
            .get_block_range(options.from_block, options.to_block, options.block_range)
            .await?;
        let query = create_query(range, vec![], vec![], vec![BlockSelection::default()]);

        let data = self.client.collect(&query).await?;
        log_collected(&data, range);

        let blocks = blocks_table(&data.blocks, &ColumnMapping::blocks_only())?;

        self.log_elapsed("get_blocks", started);

        if blocks.is_empty() {
            return Ok(None);
        }

        if options.save_data {
            self.save(&blocks, "blocks")?;
        }

        Ok(Some(blocks))
    }

    async fn collect_transactions(
        &self,
        query: &indexer_client::types::Query,
        range: BlockRange,
    ) -> Result<Option<Table>> {
        let data = self.client.collect(query).await?;
        log_collected(&data, range);

        let mapping = ColumnMapping::common();
        let tables = QueryTables {
            decoded_logs: Table::empty(),
            logs: logs_table(&data.logs)?,
            transactions: transactions_table(&data.transactions, &mapping)?,
            blocks: blocks_table(&data.blocks, &mapping)?,
        };

        assemble(tables, false)
    }

    fn save(&self, table: &Table, name: &str) -> Result<()> {
        let path = self.output_path(name);
        table.write_parquet(&path)?;

        tracing::info!(rows = table.height(), "Saved {} to {}", name, path.display());

        Ok(())
    }

    fn log_elapsed(&self, operation: &str, started: Instant) {
        if self.print_time {
            tracing::info!(
                "{} query finished in {:.2} seconds.",
                operation,
                started.elapsed().as_secs_f64()
            );
        }
    }
}

fn log_collected(data: &ResponseData, range: BlockRange) {
    tracing::debug!(
        logs = data.logs.len(),
        transactions = data.transactions.len(),
        blocks = data.blocks.len(),
        "Collected blocks {}",
        range
    );
}
