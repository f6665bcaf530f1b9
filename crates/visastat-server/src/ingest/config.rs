// Ingestion configuration
//
// All tunables the pipeline needs, passed in explicitly at construction.
// Nothing in the engine reads module-level state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default root of the published visa statistics hierarchy.
pub const DEFAULT_ROOT_URL: &str =
    "https://travel.state.gov/content/travel/en/legal/visa-law0/visa-statistics.html";

/// Default directory downloaded documents are archived under.
pub const DEFAULT_DATA_DIR: &str = "data/visa-statistics";

/// Default manifest file location.
pub const DEFAULT_MANIFEST_PATH: &str = "data/manifest.json";

/// Default pause after every page fetch and document download, in
/// milliseconds. This bounds the request rate against the remote host.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default maximum attempts for a failed fetch.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// File extensions accepted as document candidates.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".xlsx", ".xls"];

/// Configuration for the ingestion pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Root page of the statistics hierarchy
    pub root_url: String,

    /// Directory downloaded documents are written under
    pub data_dir: PathBuf,

    /// Path of the persisted manifest file
    pub manifest_path: PathBuf,

    /// Pause after every fetch, in milliseconds
    pub request_delay_ms: u64,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Maximum attempts for a failed fetch
    pub max_retries: u32,

    /// Lowercase extensions accepted as document candidates
    pub allowed_extensions: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            root_url: DEFAULT_ROOT_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl IngestConfig {
    /// Create new config with builder pattern
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }

    /// The politeness delay as a [`Duration`]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = IngestConfig::default();

        IngestConfig {
            root_url: std::env::var("VISASTAT_ROOT_URL").unwrap_or(default.root_url),
            data_dir: std::env::var("VISASTAT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
            manifest_path: std::env::var("VISASTAT_MANIFEST_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.manifest_path),
            request_delay_ms: std::env::var("VISASTAT_REQUEST_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.request_delay_ms),
            timeout_secs: std::env::var("VISASTAT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            max_retries: std::env::var("VISASTAT_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_retries),
            allowed_extensions: default.allowed_extensions,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.root_url.is_empty() {
            return Err("Root URL cannot be empty".to_string());
        }

        if self.manifest_path.as_os_str().is_empty() {
            return Err("Manifest path cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_retries == 0 {
            return Err("Max retries must be greater than 0".to_string());
        }

        if self.allowed_extensions.is_empty() {
            return Err("Allowed extension set cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Builder for IngestConfig
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    root_url: Option<String>,
    data_dir: Option<PathBuf>,
    manifest_path: Option<PathBuf>,
    request_delay_ms: Option<u64>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    allowed_extensions: Option<Vec<String>>,
}

impl IngestConfigBuilder {
    pub fn root_url(mut self, url: impl Into<String>) -> Self {
        self.root_url = Some(url.into());
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn request_delay_ms(mut self, millis: u64) -> Self {
        self.request_delay_ms = Some(millis);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = Some(extensions);
        self
    }

    pub fn build(self) -> IngestConfig {
        let default = IngestConfig::default();

        IngestConfig {
            root_url: self.root_url.unwrap_or(default.root_url),
            data_dir: self.data_dir.unwrap_or(default.data_dir),
            manifest_path: self.manifest_path.unwrap_or(default.manifest_path),
            request_delay_ms: self.request_delay_ms.unwrap_or(default.request_delay_ms),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            max_retries: self.max_retries.unwrap_or(default.max_retries),
            allowed_extensions: self.allowed_extensions.unwrap_or(default.allowed_extensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();
        assert_eq!(config.root_url, DEFAULT_ROOT_URL);
        assert_eq!(config.data_dir, PathBuf::from("data/visa-statistics"));
        assert_eq!(config.manifest_path, PathBuf::from("data/manifest.json"));
        assert_eq!(config.request_delay_ms, 1000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.allowed_extensions, vec![".pdf", ".xlsx", ".xls"]);
    }

    #[test]
    fn test_builder_pattern() {
        let config = IngestConfig::builder()
            .root_url("http://localhost:9999/root.html")
            .data_dir("/tmp/visastat")
            .request_delay_ms(0)
            .timeout_secs(5)
            .build();

        assert_eq!(config.root_url, "http://localhost:9999/root.html");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/visastat"));
        assert_eq!(config.request_delay_ms, 0);
        assert_eq!(config.timeout_secs, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_validate() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid = config.clone();
        invalid.root_url = String::new();
        assert!(invalid.validate().is_err());

        let mut invalid = config.clone();
        invalid.timeout_secs = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = config;
        invalid.allowed_extensions.clear();
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_request_delay_duration() {
        let config = IngestConfig::builder().request_delay_ms(250).build();
        assert_eq!(config.request_delay(), Duration::from_millis(250));
    }
}
