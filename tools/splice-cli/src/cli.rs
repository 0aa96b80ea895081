//! CLI command definitions using clap

use clap::{Parser, Subcommand};

use crate::inspect::InspectArgs;
use crate::print::PrintArgs;

#[derive(Parser)]
#[command(name = "splice")]
#[command(about = "Print and inspect .splice drum machine patterns")]
#[command(version)]
pub struct Cli {
    /// Log decode events (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode pattern files and print them
    Print(PrintArgs),

    /// Show the byte layout of a pattern file, field by field
    Inspect(InspectArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_print_many() {
        let cli = Cli::try_parse_from(["splice", "print", "a.splice", "b.splice"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Print(args) => {
                assert_eq!(
                    args.files,
                    vec![PathBuf::from("a.splice"), PathBuf::from("b.splice")]
                );
                assert!(!args.json);
            }
            _ => panic!("expected print"),
        }
    }

    #[test]
    fn test_parse_print_json_verbose() {
        let cli = Cli::try_parse_from(["splice", "print", "--json", "-v", "a.splice"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Print(PrintArgs { json: true, .. })));
    }

    #[test]
    fn test_print_requires_a_file() {
        assert!(Cli::try_parse_from(["splice", "print"]).is_err());
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from(["splice", "-v", "inspect", "a.splice"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.file, PathBuf::from("a.splice")),
            _ => panic!("expected inspect"),
        }
    }
}
