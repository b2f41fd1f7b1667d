use color_eyre::eyre;

use super::range_args::RangeArgs;
use crate::context::Context;

pub(crate) async fn run(args: RangeArgs, mut context: Context) -> eyre::Result<()> {
    let manager = context.manager()?;

    match manager.get_txs(args.into()).await? {
        Some(table) => println!("{table}"),
        None => println!("No transactions found"),
    }

    Ok(())
}
