use std::io;

use clap::Parser;
use stockledger_cli::{cli::Cli, commands};
use stockledger_inventory::LedgerConfig;

fn main() -> anyhow::Result<()> {
    stockledger_observability::init();

    let cli = Cli::parse();
    let config = LedgerConfig::from_env();
    commands::run_command(cli, config, &mut io::stdout().lock())
}
