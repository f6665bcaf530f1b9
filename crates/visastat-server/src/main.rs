//! Visastat Server - Main entry point

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use visastat_common::logging::{init_logging, LogConfig};
use visastat_server::api::{create_router, AppState};
use visastat_server::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("visastat-server".to_string())
        .filter_directives("visastat_server=debug,tower_http=debug,axum=trace".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    info!("Starting visastat server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );
    info!(
        root_url = %config.ingest.root_url,
        manifest = %config.ingest.manifest_path.display(),
        data_dir = %config.ingest.data_dir.display(),
        "Ingest configuration"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        config: Arc::new(config),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Resolve when the process receives a shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install shutdown signal handler");
        return;
    }
    info!("Shutdown signal received");
}
