use clap::Args;
use hyperquery_manager::{BlockQueryOptions, EventQueryOptions};

#[derive(Clone, Args, Debug, Default)]
pub struct RangeArgs {
    /// First block to query. A zero block counts as not set.
    #[clap(long)]
    pub from_block: Option<u64>,

    /// Block the query stops before, the chain height by default.
    #[clap(long)]
    pub to_block: Option<u64>,

    /// Number of most recent blocks to query when `--from-block` is not set.
    #[clap(long)]
    pub block_range: Option<u64>,

    /// Save the result as Parquet under the output directory.
    #[clap(long)]
    pub save: bool,
}

impl From<RangeArgs> for BlockQueryOptions {
    fn from(args: RangeArgs) -> Self {
        Self {
            from_block: args.from_block,
            to_block: args.to_block,
            block_range: args.block_range,
            save_data: args.save,
        }
    }
}

impl From<RangeArgs> for EventQueryOptions {
    fn from(args: RangeArgs) -> Self {
        Self {
            from_block: args.from_block,
            to_block: args.to_block,
            block_range: args.block_range,
            save_data: args.save,
            ..Default::default()
        }
    }
}
