use clap::Args;
use color_eyre::eyre::{self, bail};
use hyperquery_manager::EventQueryOptions;
use hyperquery_protocols::Protocol;
use hyperquery_types::EventConfig;

use super::range_args::RangeArgs;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct EventArgs {
    /// Protocol whose event table holds the event.
    #[clap(long, short, requires = "event", conflicts_with_all = ["name", "signature"])]
    pub protocol: Option<Protocol>,

    /// Name of the event in the protocol table.
    #[clap(long, requires = "protocol")]
    pub event: Option<String>,

    /// Name of a custom event.
    #[clap(long, requires = "signature")]
    pub name: Option<String>,

    /// Signature of a custom event, e.g.
    /// `Transfer(address indexed from, address indexed to, uint256 value)`.
    #[clap(long, requires = "name")]
    pub signature: Option<String>,

    /// Only logs emitted by this contract.
    #[clap(long)]
    pub contract: Option<String>,

    /// Only logs whose first indexed parameter is this address.
    #[clap(long)]
    pub address: Option<String>,

    /// Return the decoded logs without their transactions and blocks.
    #[clap(long)]
    pub no_tx_data: bool,

    #[command(flatten)]
    pub range: RangeArgs,
}

impl EventArgs {
    fn event_config(&self) -> eyre::Result<EventConfig> {
        let event = match (&self.protocol, &self.event, &self.name, &self.signature) {
            (Some(protocol), Some(event), _, _) => protocol.event(event)?.clone(),
            (None, None, Some(name), Some(signature)) => EventConfig::new(name, signature),
            _ => bail!("Either --protocol with --event or --name with --signature is required"),
        };

        Ok(match &self.contract {
            Some(contract) => event.with_contract(contract),
            None => event,
        })
    }

    fn options(&self) -> EventQueryOptions {
        EventQueryOptions {
            address: self.address.clone(),
            tx_data: !self.no_tx_data,
            ..self.range.clone().into()
        }
    }
}

pub(crate) async fn run(args: EventArgs, mut context: Context) -> eyre::Result<()> {
    let event = args.event_config()?;
    let manager = context.manager()?;

    let table = manager
        .execute_event_query(&event, args.options())
        .await?;

    println!("{table}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::actions::{Cli, Commands};

    fn parse(args: &[&str]) -> EventArgs {
        let cli = Cli::try_parse_from(["hyperquery", "event"].iter().chain(args).copied()).unwrap();

        match cli.command {
            Commands::Event(args) => args,
            command => panic!("unexpected command: {command:?}"),
        }
    }

    #[test]
    fn test_protocol_event() {
        let args = parse(&[
            "--protocol",
            "uniswap-v3",
            "--event",
            "Swap",
            "--block-range",
            "10000",
        ]);

        let event = args.event_config().unwrap();
        assert_eq!(event.name(), "Swap");
        assert_eq!(event.contract(), None);

        let options = args.options();
        assert_eq!(options.block_range, Some(10_000));
        assert!(options.tx_data);
        assert!(!options.save_data);
    }

    #[test]
    fn test_custom_event_with_contract() {
        let args = parse(&[
            "--name",
            "Transfer",
            "--signature",
            "Transfer(address indexed from, address indexed to, uint256 value)",
            "--contract",
            "0xdAC17F958D2ee523a2206206994597C13D831ec7",
            "--address",
            "0x1111111111111111111111111111111111111111",
            "--no-tx-data",
            "--save",
        ]);

        let event = args.event_config().unwrap();
        assert_eq!(event.name(), "Transfer");
        assert_eq!(
            event.contract(),
            Some("0xdac17f958d2ee523a2206206994597c13d831ec7")
        );

        let options = args.options();
        assert!(!options.tx_data);
        assert!(options.save_data);
        assert_eq!(
            options.address.as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
    }

    #[test]
    fn test_unknown_protocol_event_fails() {
        let args = parse(&["--protocol", "across", "--event", "Swap"]);

        assert!(args.event_config().is_err());
    }

    #[test]
    fn test_event_is_required() {
        assert!(parse(&[]).event_config().is_err());
        assert!(Cli::try_parse_from(["hyperquery", "event", "--protocol", "across"]).is_err());
        assert!(Cli::try_parse_from(["hyperquery", "event", "--name", "Swap"]).is_err());
    }
}
