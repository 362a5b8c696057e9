use std::io::Write;

use anyhow::{Context, bail};
use serde_json::Value as JsonValue;
use stockledger_core::Quantity;
use stockledger_inventory::{LedgerConfig, LoadOutcome, StockLedger};

use crate::cli::{Cli, Command, ItemArgs, LowArgs, NameArgs};

pub fn run_command(cli: Cli, mut config: LedgerConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    if let Some(file) = cli.file {
        config.storage_path = file;
    }
    let mut ledger = StockLedger::from_config(&config);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => cmd_demo(&mut ledger, out),
        Command::Add(args) => cmd_add(&mut ledger, args, out),
        Command::Remove(args) => cmd_remove(&mut ledger, args, out),
        Command::Qty(args) => cmd_qty(&mut ledger, args, out),
        Command::Low(args) => cmd_low(&mut ledger, args, out),
        Command::Report => cmd_report(&mut ledger, out),
    }
}

/// Sample session: a few adds and removes, then a save/load round-trip.
fn cmd_demo(ledger: &mut StockLedger, out: &mut dyn Write) -> anyhow::Result<()> {
    // Domain failures (e.g. the unknown "orange") are logged by the ledger;
    // the session carries on.
    let _ = ledger.add_item("apple", 10);
    let _ = ledger.add_item("banana", -2);
    let _ = ledger.remove_item("apple", 3);
    let _ = ledger.remove_item("orange", 1);

    writeln!(out, "Apple stock: {}", ledger.get_qty("apple"))?;
    writeln!(out, "Low items: {:?}", ledger.low_items())?;

    // Write failures are logged; the reload then reflects whatever is on disk.
    let _ = ledger.save_data();
    ledger.load_data();
    writeln!(out, "{}", ledger.report())?;
    Ok(())
}

fn cmd_add(ledger: &mut StockLedger, args: ItemArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    load_for_update(ledger)?;
    ledger
        .add_value(&JsonValue::String(args.name.clone()), &parse_quantity(&args.quantity))
        .with_context(|| format!("cannot add {:?} of {}", args.quantity, args.name))?;
    ledger.save_data().context("failed to save stock")?;
    writeln!(out, "{} -> {}", args.name, ledger.get_qty(&args.name))?;
    Ok(())
}

fn cmd_remove(ledger: &mut StockLedger, args: ItemArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    load_for_update(ledger)?;
    ledger
        .remove_value(&JsonValue::String(args.name.clone()), &parse_quantity(&args.quantity))
        .with_context(|| format!("cannot remove {:?} of {}", args.quantity, args.name))?;
    ledger.save_data().context("failed to save stock")?;
    writeln!(out, "{} -> {}", args.name, ledger.get_qty(&args.name))?;
    Ok(())
}

fn cmd_qty(ledger: &mut StockLedger, args: NameArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    ledger.load_data();
    writeln!(out, "{}", ledger.get_qty(&args.name))?;
    Ok(())
}

fn cmd_low(ledger: &mut StockLedger, args: LowArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let threshold = match args.threshold {
        Some(raw) => Quantity::from_json(&parse_quantity(&raw))
            .and_then(|q| q.ensure_finite().ok())
            .with_context(|| format!("threshold {raw:?} is not a number"))?,
        None => ledger.low_stock_threshold(),
    };

    ledger.load_data();
    for name in ledger.check_low_items(threshold) {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn cmd_report(ledger: &mut StockLedger, out: &mut dyn Write) -> anyhow::Result<()> {
    ledger.load_data();
    writeln!(out, "{}", ledger.report())?;
    Ok(())
}

/// Load before a mutation. An unreadable file is left alone rather than
/// overwritten with a fresh, nearly empty ledger.
fn load_for_update(ledger: &mut StockLedger) -> anyhow::Result<()> {
    if ledger.load_data() == LoadOutcome::Malformed {
        bail!(
            "refusing to update {}: existing contents could not be read",
            ledger.storage_path().display()
        );
    }
    Ok(())
}

/// Command-line quantities are parsed as JSON so that `10` and `2.5` are
/// numbers while `ten` stays text and is rejected by the ledger.
fn parse_quantity(raw: &str) -> JsonValue {
    serde_json::from_str(raw.trim()).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}
