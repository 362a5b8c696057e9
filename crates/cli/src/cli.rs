use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "stockledger",
    about = "Track stock quantities for named items in a JSON file",
    version
)]
pub struct Cli {
    /// Storage file (overrides STOCK_LEDGER_PATH)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Defaults to `demo` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the sample session against the storage file
    Demo,
    /// Add stock for an item
    Add(ItemArgs),
    /// Remove stock from an item
    Remove(ItemArgs),
    /// Show the current quantity of an item
    Qty(NameArgs),
    /// List items below a threshold
    Low(LowArgs),
    /// Print every item and its quantity
    Report,
}

#[derive(Args, Debug)]
pub struct ItemArgs {
    pub name: String,
    /// Numeric amount; anything else is rejected
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct LowArgs {
    /// Overrides STOCK_LEDGER_LOW_THRESHOLD
    #[arg(short, long)]
    pub threshold: Option<String>,
}
