use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre;
use hyperquery_types::Network;

use crate::{
    config::{Config, IndexerConfig},
    context::Context,
};

#[derive(Args, Debug)]
pub struct GenerateConfigArgs {
    /// The path to the config file to generate
    output: PathBuf,

    /// Bearer token of the HyperSync endpoint
    #[clap(long)]
    bearer_token: Option<String>,
}

/// Writes a config for the network passed with `--network`, Ethereum mainnet otherwise.
pub(crate) fn run(args: GenerateConfigArgs, context: Context) -> eyre::Result<()> {
    let config = Config {
        indexer: IndexerConfig {
            network: Some(context.network().unwrap_or(Network::EthereumMainnet)),
            bearer_token: args.bearer_token,
            ..Default::default()
        },
        ..Default::default()
    };

    config.save_to_file(args.output)?;

    Ok(())
}
