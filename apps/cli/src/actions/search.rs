use clap::Args;
use color_eyre::eyre;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Hashes of the transactions to look up.
    #[clap(required = true, num_args = 1..)]
    pub hashes: Vec<String>,

    /// Save the result as Parquet under the output directory.
    #[clap(long)]
    pub save: bool,
}

pub(crate) async fn run(args: SearchArgs, mut context: Context) -> eyre::Result<()> {
    let manager = context.manager()?;

    match manager.search_txs(args.hashes, args.save).await? {
        Some(table) => println!("{table}"),
        None => println!("No transactions found"),
    }

    Ok(())
}
