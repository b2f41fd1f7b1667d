use color_eyre::eyre;
use hyperquery_protocols::Protocol;

pub(crate) fn run() -> eyre::Result<()> {
    for protocol in Protocol::ALL {
        println!("{protocol}:");

        for (name, event) in protocol.events() {
            println!("  {:<32} {}", name, event.signature());
        }
    }

    Ok(())
}
