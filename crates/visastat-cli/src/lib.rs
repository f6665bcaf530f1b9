//! Visastat CLI Library
//!
//! Thin command-line client for the visastat server: trigger ingestion
//! runs, inspect the manifest, and check server health.

pub mod api;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition
#[derive(Parser)]
#[command(name = "visastat")]
#[command(about = "Client for the visastat ingestion server", version)]
pub struct Cli {
    /// Base URL of the visastat server
    #[arg(
        long,
        global = true,
        env = "VISASTAT_SERVER_URL",
        default_value = "http://localhost:8000"
    )]
    pub server_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger an ingestion run and report its summary
    Run {
        /// Which pipeline(s) to run
        #[arg(value_enum)]
        family: RunFamily,
    },

    /// Show the manifest record count and most recent records
    Status,

    /// Check server health
    Health,
}

/// Trigger argument for an ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunFamily {
    Monthly,
    Annual,
    All,
}

impl RunFamily {
    /// Path segment the server expects
    pub fn as_str(&self) -> &'static str {
        match self {
            RunFamily::Monthly => "monthly",
            RunFamily::Annual => "annual",
            RunFamily::All => "all",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_family_as_str() {
        assert_eq!(RunFamily::Monthly.as_str(), "monthly");
        assert_eq!(RunFamily::Annual.as_str(), "annual");
        assert_eq!(RunFamily::All.as_str(), "all");
    }

    #[test]
    fn test_cli_parses_run_command() {
        let cli = Cli::try_parse_from(["visastat", "run", "annual"]).unwrap();
        match cli.command {
            Commands::Run { family } => assert_eq!(family, RunFamily::Annual),
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_family() {
        assert!(Cli::try_parse_from(["visastat", "run", "weekly"]).is_err());
    }

    #[test]
    fn test_cli_default_server_url() {
        let cli = Cli::try_parse_from(["visastat", "status"]).unwrap();
        assert_eq!(cli.server_url, "http://localhost:8000");
    }
}
