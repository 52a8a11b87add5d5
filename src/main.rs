//! BankSweep CLI
//!
//! Reads account balances exported from the aggregator, optionally applies a
//! sweep rule, and prints the sweep summary as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- balances.json --threshold 50 --frequency weekly > summary.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use banksweep::{provider, CliConfig, InputFormat, Result, RuleStore, SweepEngine};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = CliConfig::from_args(env::args().skip(1))?;

    let store = RuleStore::new();
    if let Some(submission) = &config.rule {
        store.set_rule(&submission.threshold, &submission.frequency)?;
    }

    let file = File::open(&config.input)?;
    let reader = BufReader::new(file);
    let accounts = match config.format {
        InputFormat::Json => provider::read_json(reader)?,
        InputFormat::Csv => provider::read_csv(reader)?,
    };

    let engine = match config.sweep_amount {
        Some(amount) => SweepEngine::with_sweep_amount(amount),
        None => SweepEngine::new(),
    };
    let summary = engine.summarize(&accounts, &store.get_active_rule())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, &summary)?;
    writeln!(handle)?;

    Ok(())
}
