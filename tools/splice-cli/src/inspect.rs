//! Inspect command - show how a pattern file's bytes were accounted for

use anyhow::{Context, Result};
use clap::Args;
use splice_drum::{DecodeEvent, EventLog, decode_with};
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// Pattern file to inspect (.splice)
    pub file: PathBuf,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let mut log = EventLog::new();
    let result = decode_with(&args.file, &mut log);

    println!("=== {} ===", args.file.display());
    // Events up to a failure are still useful for locating the bad byte
    for line in describe(log.events()) {
        println!("  {}", line);
    }

    let pattern = result.with_context(|| format!("Failed to decode {}", args.file.display()))?;
    let active: usize = pattern
        .measures()
        .iter()
        .map(|m| m.steps().active_count())
        .sum();
    println!(
        "  {} measures, {} active steps",
        pattern.measures().len(),
        active
    );

    Ok(())
}

/// One line per event, with a warning when the budget was overrun
pub(crate) fn describe(events: &[DecodeEvent]) -> Vec<String> {
    let mut lines: Vec<String> = events.iter().map(ToString::to_string).collect();

    if let Some(DecodeEvent::Finished { remaining, .. }) = events.last()
        && *remaining < 0
    {
        lines.push(format!(
            "warning: last record ran {} bytes past the declared size",
            -remaining
        ));
    }

    lines
}
