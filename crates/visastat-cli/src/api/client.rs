//! HTTP API client for the visastat server

use crate::api::{endpoints, types::RunResponse};
use crate::error::{CliError, Result};
use reqwest::Client;
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Runs are synchronous on the server side and crawl a whole hierarchy
/// with a politeness delay between requests, so this is generous.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 600;

/// Default visastat server URL when not specified.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// API client for the visastat server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Result<Self> {
        let timeout_secs = std::env::var("VISASTAT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("VISASTAT_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        Self::new(base_url)
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Trigger a synchronous ingestion run
    pub async fn trigger_run(&self, family: &str) -> Result<RunResponse> {
        let url = endpoints::run_url(&self.base_url, family);

        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP status {}", status));
            return Err(CliError::Api(detail));
        }

        let run: RunResponse = response.json().await?;
        Ok(run)
    }

    /// Fetch the manifest contents
    pub async fn list_manifest(&self) -> Result<serde_json::Value> {
        let url = endpoints::list_url(&self.base_url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let manifest = response.json().await?;

        Ok(manifest)
    }
}
