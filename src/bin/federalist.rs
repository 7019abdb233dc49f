//! Federalist CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use federalist::cli::args::*;
use federalist::cli::commands::*;

/// Log level for a `-v`/`-q` verbosity count.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Analyze(_) => "analyze",
        Command::Similar(_) => "similar",
        Command::Terms(_) => "terms",
        Command::Frequency(_) => "frequency",
        Command::Matrix(_) => "matrix",
    }
}

fn run(args: FederalistArgs) -> anyhow::Result<()> {
    let name = command_name(&args.command);
    execute_command(args).with_context(|| format!("'{name}' failed"))
}

fn main() {
    let args = FederalistArgs::parse();

    Builder::new()
        .filter_level(level_for(args.verbosity()))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
