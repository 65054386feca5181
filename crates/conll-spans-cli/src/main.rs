mod commands;
mod dataset_cache;
mod input_output;
mod logging;
mod tag_mapping;

use clap::Parser;
use commands::Commands;

/// conll-spans
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
