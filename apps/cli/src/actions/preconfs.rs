use clap::Args;
use color_eyre::eyre;
use hyperquery_manager::EventQueryOptions;
use hyperquery_protocols::mev_commit::commitment_events;
use hyperquery_table::{Table, Value};
use hyperquery_types::Network;

use super::{range_args::RangeArgs, setup_progress_bar};
use crate::context::Context;

/// Columns of the joined commitments.
const COMMITMENT_COLUMNS: &[&str] = &[
    "block_number",
    "timestamp",
    "blockNumber",
    "txnHash",
    "bid",
    "commiter",
    "bidder",
    "isSlash",
    "decayStartTimeStamp",
    "decayEndTimeStamp",
    "dispatchTimestamp",
    "commitmentHash",
    "commitmentIndex",
    "commitmentDigest",
    "commitmentSignature",
    "revertingTxHashes",
    "bidHash",
    "bidSignature",
    "sharedSecretKey",
];

const JOIN_SUFFIX: &str = "_right";

#[derive(Args, Debug)]
pub struct PreconfsArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

pub(crate) async fn run(args: PreconfsArgs, mut context: Context) -> eyre::Result<()> {
    let manager = match context.network() {
        Some(_) => context.manager()?,
        None => context.manager_for(Network::MevCommit)?,
    };

    let save = args.range.save;
    let options = EventQueryOptions {
        save_data: false,
        ..args.range.into()
    };

    let [unopened, opened, processed] = commitment_events();

    let pb = setup_progress_bar("Querying commitments...".into())?;
    let unopened = manager.execute_event_query(&unopened, options.clone()).await?;
    let opened = manager.execute_event_query(&opened, options.clone()).await?;
    let processed = manager.execute_event_query(&processed, options).await?;
    pb.finish_and_clear();

    let commitments = commitments_table(&unopened, &opened, &processed)?;

    println!("{commitments}");

    if save {
        let path = manager.output_path("commitments");
        commitments.write_parquet(&path)?;

        tracing::info!(rows = commitments.height(), "Saved commitments to {}", path.display());
    }

    Ok(())
}

/// Unopened commitments joined with their openings and whether they were slashed.
fn commitments_table(unopened: &Table, opened: &Table, processed: &Table) -> eyre::Result<Table> {
    let outcomes = processed.select(&["commitmentIndex", "isSlash"])?;

    let commitments = unopened
        .inner_join(opened, "commitmentIndex", JOIN_SUFFIX)?
        .map_column("txnHash", prefix_hash)?
        .inner_join(&outcomes, "commitmentIndex", JOIN_SUFFIX)?
        .select(COMMITMENT_COLUMNS)?;

    Ok(commitments)
}

/// Opened commitments carry transaction hashes without the `0x` prefix.
fn prefix_hash(value: Value) -> Value {
    match value {
        Value::Text(hash) => Value::Text(format!("0x{hash}")),
        other => other,
    }
}
