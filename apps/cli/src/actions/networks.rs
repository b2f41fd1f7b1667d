use color_eyre::eyre;
use hyperquery_types::Network;

pub(crate) fn run() -> eyre::Result<()> {
    println!("{:<24} {:>12} {:<8} URL", "NAME", "CHAIN ID", "TIER");

    for network in Network::ALL {
        println!(
            "{:<24} {:>12} {:<8} {}",
            network.name(),
            network.chain_id(),
            network.tier(),
            network.url()
        );
    }

    Ok(())
}
