//! Response types for the server API

use serde::Deserialize;

/// Response to a run trigger
#[derive(Debug, Deserialize)]
pub struct RunResponse {
    pub status: String,
    pub family: String,
    pub summaries: Vec<RunSummary>,
}

/// One pipeline family's result
#[derive(Debug, Deserialize)]
pub struct RunSummary {
    pub family: String,
    pub outcome: String,
    pub appended: usize,
    pub skipped: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}
