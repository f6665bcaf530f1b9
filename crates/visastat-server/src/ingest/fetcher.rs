// HTTP fetcher for pages and documents
//
// One request outstanding at a time. Every fetch ends with a fixed
// politeness pause, success or failure, so the request rate against the
// remote host stays bounded.

use crate::ingest::{IngestConfig, IngestError, Result};
use reqwest::header;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// User agent sent with every request
const USER_AGENT: &str = "Visastat-Ingester/1.0";

/// A downloaded document plus the response metadata the manifest keeps
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Raw document bytes
    pub bytes: Vec<u8>,

    /// ETag header value, empty when absent
    pub etag: String,

    /// Last-Modified header value, empty when absent
    pub last_modified: String,
}

impl FetchedDocument {
    /// The freshness token recorded in the manifest's URL map
    pub fn freshness_token(&self) -> String {
        format!("{}|{}", self.etag, self.last_modified)
    }
}

/// HTTP client for page and document fetches
pub struct Fetcher {
    client: Client,
    request_delay: Duration,
    max_retries: u32,
}

impl Fetcher {
    /// Create a new fetcher from the pipeline configuration
    pub fn new(config: &IngestConfig) -> Result<Self> {
        config.validate().map_err(IngestError::Validation)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Fetcher {
            client,
            request_delay: config.request_delay(),
            max_retries: config.max_retries,
        })
    }

    /// Fetch a page and return its HTML body
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let result = self.fetch_page_inner(url).await;
        self.pause().await;
        result
    }

    /// Fetch a document and capture its freshness metadata
    pub async fn fetch_document(&self, url: &str) -> Result<FetchedDocument> {
        let result = self.fetch_document_inner(url).await;
        self.pause().await;
        result
    }

    async fn fetch_page_inner(&self, url: &str) -> Result<String> {
        let response = self.get_with_retry(url).await?;
        Ok(response.text().await?)
    }

    async fn fetch_document_inner(&self, url: &str) -> Result<FetchedDocument> {
        let response = self.get_with_retry(url).await?;

        let etag = header_value(&response, header::ETAG);
        let last_modified = header_value(&response, header::LAST_MODIFIED);
        let bytes = response.bytes().await?.to_vec();

        Ok(FetchedDocument {
            bytes,
            etag,
            last_modified,
        })
    }

    /// Issue a GET with bounded retries and exponential backoff
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.get_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        url = %url,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Fetch attempt failed"
                    );
                    last_error = Some(e);

                    if attempt < self.max_retries {
                        // Exponential backoff: 2^attempt seconds
                        let backoff_secs = 2u64.pow(attempt);
                        debug!(url = %url, backoff_secs, "Retrying fetch");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    }
                },
            }
        }

        // last_error is always Some here because max_retries >= 1 is
        // enforced by config validation.
        match last_error {
            Some(err) => Err(err),
            None => Err(IngestError::Validation(format!(
                "Fetch of {} failed after {} attempts with no error captured",
                url, self.max_retries
            ))),
        }
    }

    async fn get_once(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    /// The fixed inter-request pause
    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

fn header_value(response: &reqwest::Response, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> IngestConfig {
        IngestConfig::builder()
            .request_delay_ms(0)
            .timeout_secs(5)
            .max_retries(1)
            .build()
    }

    #[test]
    fn test_fetcher_creation() {
        let fetcher = Fetcher::new(&test_config());
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.root_url = String::new();

        let fetcher = Fetcher::new(&config);
        assert!(fetcher.is_err());
    }

    #[test]
    fn test_freshness_token_both_present() {
        let doc = FetchedDocument {
            bytes: Vec::new(),
            etag: "\"abc\"".to_string(),
            last_modified: "Tue, 06 Jan 2026 00:00:00 GMT".to_string(),
        };
        assert_eq!(doc.freshness_token(), "\"abc\"|Tue, 06 Jan 2026 00:00:00 GMT");
    }

    #[test]
    fn test_freshness_token_absent_headers_are_empty() {
        let doc = FetchedDocument {
            bytes: Vec::new(),
            etag: String::new(),
            last_modified: String::new(),
        };
        assert_eq!(doc.freshness_token(), "|");
    }
}
