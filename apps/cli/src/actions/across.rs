use clap::Args;
use color_eyre::eyre;
use hyperquery_manager::{Error, EventQueryOptions};
use hyperquery_protocols::across::{EVENTS, SPOKE_POOLS};

use super::setup_progress_bar;
use crate::context::Context;

/// Most recent blocks queried on every network by default.
const DEFAULT_BLOCK_RANGE: u64 = 10_000;

#[derive(Args, Debug)]
pub struct AcrossArgs {
    /// Number of most recent blocks to query on every network.
    #[clap(long, default_value_t = DEFAULT_BLOCK_RANGE)]
    pub block_range: u64,

    /// Save every result as Parquet under the output directory.
    #[clap(long)]
    pub save: bool,
}

pub(crate) async fn run(args: AcrossArgs, mut context: Context) -> eyre::Result<()> {
    let options = EventQueryOptions {
        block_range: Some(args.block_range),
        save_data: args.save,
        ..Default::default()
    };

    for (network, spoke_pool) in SPOKE_POOLS {
        let manager = context.manager_for(*network)?;

        println!("Querying events for {network}...");
        println!("SpokePool Address: {spoke_pool}");

        for event in EVENTS.values() {
            let event = event.clone().with_contract(spoke_pool);

            let pb = setup_progress_bar(format!("Querying {} on {}...", event.name(), network))?;
            let result = manager.execute_event_query(&event, options.clone()).await;
            pb.finish_and_clear();

            match result {
                Ok(table) => println!(
                    "Events found for {} on {}: {} rows, {} columns",
                    event.name(),
                    network,
                    table.height(),
                    table.width()
                ),
                Err(Error::NoData { .. }) => {
                    println!(
                        "No events found for {} on {}, continuing...",
                        event.name(),
                        network
                    );
                }
                Err(err) => {
                    tracing::error!("Error querying {} on {}: {}", event.name(), network, err);
                }
            }
        }
    }

    Ok(())
}
