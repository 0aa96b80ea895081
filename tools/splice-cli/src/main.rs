//! Splice CLI - print and inspect .splice drum machine patterns
//!
//! # Commands
//!
//! - `splice print <FILE>...` - Decode and print each pattern (`--json` for JSON)
//! - `splice inspect <FILE>` - Show every decoded field with its byte offset
//!
//! Logging goes to stderr and follows `RUST_LOG`; `-v` turns on decode
//! events when `RUST_LOG` is unset.

mod cli;
mod inspect;
mod print;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Print(args) => print::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
