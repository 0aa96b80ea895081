//! Print command - decode pattern files and write their rendering to stdout

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the print command
#[derive(Args)]
pub struct PrintArgs {
    /// Pattern files to decode (.splice)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print JSON instead of the text rendering
    #[arg(long)]
    pub json: bool,
}

/// Execute the print command
///
/// Stops at the first file that fails to decode.
pub fn execute(args: PrintArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let many = args.files.len() > 1;

    for (i, path) in args.files.iter().enumerate() {
        let pattern = splice_drum::decode(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        tracing::debug!(
            "Decoded {}: {} measures",
            path.display(),
            pattern.measures().len()
        );

        if args.json {
            serde_json::to_writer_pretty(&mut out, &pattern)?;
            writeln!(out)?;
            continue;
        }

        if many {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "==> {} <==", path.display())?;
        }
        write!(out, "{}", pattern)?;
    }

    Ok(())
}
