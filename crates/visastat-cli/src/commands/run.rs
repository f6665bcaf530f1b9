//! `visastat run` - trigger an ingestion run

use crate::api::ApiClient;
use crate::error::Result;
use crate::RunFamily;

/// Trigger a run and print the per-family summaries
pub async fn run(client: &ApiClient, family: RunFamily) -> Result<()> {
    println!("Triggering {} ingestion run...", family.as_str());

    let response = client.trigger_run(family.as_str()).await?;

    for summary in &response.summaries {
        match summary.outcome.as_str() {
            "no_data" => {
                println!("{}: no data found", summary.family);
            },
            _ => {
                println!(
                    "{}: {} appended, {} skipped, {} error(s)",
                    summary.family,
                    summary.appended,
                    summary.skipped,
                    summary.errors.len()
                );
            },
        }

        for error in &summary.errors {
            println!("  error: {}", error);
        }
    }

    Ok(())
}
