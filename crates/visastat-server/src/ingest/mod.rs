// Visa statistics ingestion module
//
// Traverses the published visa statistics page hierarchy and downloads
// new documents into a local archive:
//
// - Fetch: HTTP client with retry and a fixed politeness delay
// - Discover: anchor extraction + fiscal-year resolution over page HTML
// - Dedup: URL-keyed lookups against the persisted manifest
// - Record: per-download manifest append, persisted immediately
//
// Two pipeline drivers share the machinery: `annual` walks root ->
// category page -> one page per fiscal year; `monthly` walks root ->
// one page per visa program (immigrant / non-immigrant).

pub mod config;
pub mod fetcher;
pub mod fiscal_year;
pub mod links;
pub mod manifest;
pub mod pipeline;

// Re-export main types
pub use config::IngestConfig;
pub use fetcher::{FetchedDocument, Fetcher};
pub use fiscal_year::FiscalYearResolver;
pub use links::CandidateLink;
pub use manifest::{Manifest, ManifestRecord};
pub use pipeline::{CandidateOutcome, IngestPipeline, RunOutcome, RunSummary};

/// Result type for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error types for the ingestion engine
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Common(#[from] visastat_common::VisastatError),
}

impl From<regex::Error> for IngestError {
    fn from(err: regex::Error) -> Self {
        IngestError::Validation(err.to_string())
    }
}
