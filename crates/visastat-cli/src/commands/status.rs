//! `visastat status` - show manifest record count and recent records

use crate::api::ApiClient;
use crate::error::Result;

/// How many of the most recent records to print
const RECENT_RECORD_COUNT: usize = 5;

/// Print a short manifest summary
pub async fn run(client: &ApiClient) -> Result<()> {
    let manifest = client.list_manifest().await?;

    let records = manifest["records"].as_array().cloned().unwrap_or_default();
    println!("Manifest records: {}", records.len());

    if records.is_empty() {
        return Ok(());
    }

    println!("Most recent:");
    for record in records.iter().rev().take(RECENT_RECORD_COUNT) {
        println!(
            "  [{}] {} {} ({} bytes)",
            record["variant"].as_str().unwrap_or("?"),
            record["fy"].as_str().unwrap_or("?"),
            record["url"].as_str().unwrap_or("?"),
            record["bytes"].as_u64().unwrap_or(0),
        );
    }

    Ok(())
}
