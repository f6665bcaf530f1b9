//! `visastat health` - check server liveness

use crate::api::ApiClient;
use crate::error::{CliError, Result};

/// Probe the server's health endpoint
pub async fn run(client: &ApiClient) -> Result<()> {
    if client.health_check().await? {
        println!("Server is healthy");
        Ok(())
    } else {
        Err(CliError::Api("health check failed".to_string()))
    }
}
