//! Visastat CLI - Main entry point

use clap::Parser;
use std::process;
use tracing::error;
use visastat_cli::api::ApiClient;
use visastat_cli::{Cli, Commands};
use visastat_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("visastat-cli".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("visastat-cli".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // The CLI should keep working even if logging setup fails
    let _ = init_logging(&log_config);

    let result = execute_command(&cli).await;

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> visastat_cli::Result<()> {
    let client = ApiClient::new(cli.server_url.clone())?;

    match &cli.command {
        Commands::Run { family } => visastat_cli::commands::run::run(&client, *family).await,
        Commands::Status => visastat_cli::commands::status::run(&client).await,
        Commands::Health => visastat_cli::commands::health::run(&client).await,
    }
}
