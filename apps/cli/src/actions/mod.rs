use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_verbosity::Verbosity;
use color_eyre::eyre;
use hyperquery_types::Network;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::{filter::Targets, prelude::*};

use self::{
    across::AcrossArgs, event::EventArgs, generate::GenerateConfigArgs,
    preconfs::PreconfsArgs, range_args::RangeArgs, search::SearchArgs,
};
use crate::context::Context;

mod across;
mod blocks;
mod event;
mod generate;
mod networks;
mod preconfs;
mod protocols;
mod range_args;
mod search;
mod txs;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity,

    #[command(subcommand)]
    pub command: Commands,

    #[clap(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Query the HyperSync endpoint of this network instead of the configured one.
    #[clap(short, long, global = true)]
    pub network: Option<Network>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the networks served by HyperSync.
    Networks,

    /// List the events of the bundled protocols.
    Protocols,

    /// Query the logs of an event, joined with their transactions and blocks.
    Event(EventArgs),

    /// Query every transaction of a block range.
    Txs(RangeArgs),

    /// Query the blocks of a range.
    Blocks(RangeArgs),

    /// Look up transactions by hash.
    Search(SearchArgs),

    /// Query every Across SpokePool event on every network the pool is deployed on.
    Across(AcrossArgs),

    /// Join the MEV-Commit commitments with their openings and outcomes.
    Preconfs(PreconfsArgs),

    /// Generate a configuration file.
    GenerateConfig(GenerateConfigArgs),
}

impl Cli {
    pub async fn run(self) -> eyre::Result<()> {
        let mut context = Context::new(self.config, self.network);

        let verbosity = self.verbosity.log_level_filter().as_trace();
        let level_filter = LevelFilter::from_level(context.config()?.logger.level).max(verbosity);

        let filter = Targets::new()
            .with_target("hyperquery_manager", level_filter)
            .with_target("hyperquery_table", level_filter)
            .with_target("indexer_client", level_filter)
            .with_target("hyperquery", level_filter)
            .with_default(verbosity);

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_filter(filter))
            .try_init()?;

        execute_command(self.command, context).await
    }
}

async fn execute_command(command: Commands, context: Context) -> eyre::Result<()> {
    use Commands as Cmd;
    match command {
        Cmd::Networks => networks::run(),
        Cmd::Protocols => protocols::run(),
        Cmd::Event(args) => event::run(args, context).await,
        Cmd::Txs(args) => txs::run(args, context).await,
        Cmd::Blocks(args) => blocks::run(args, context).await,
        Cmd::Search(args) => search::run(args, context).await,
        Cmd::Across(args) => across::run(args, context).await,
        Cmd::Preconfs(args) => preconfs::run(args, context).await,
        Cmd::GenerateConfig(args) => generate::run(args, context),
    }
}

/// Setups progress bar that will appear in console for an adjusted while
fn setup_progress_bar(message: String) -> eyre::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {spinner:.green} {msg}")?.tick_strings(
            &[
                "▹▹▹▹▹",
                "▸▹▹▹▹",
                "▹▸▹▹▹",
                "▹▹▸▹▹",
                "▹▹▹▸▹",
                "▹▹▹▹▸",
                "▪▪▪▪▪",
            ],
        ),
    );
    pb.set_message(message);

    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_is_global() {
        let cli = Cli::try_parse_from(["hyperquery", "blocks", "--network", "base"]).unwrap();

        assert_eq!(cli.network, Some(Network::Base));
        assert!(matches!(cli.command, Commands::Blocks(_)));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_unknown_network_is_rejected() {
        assert!(Cli::try_parse_from(["hyperquery", "-n", "moon", "networks"]).is_err());
    }
}
