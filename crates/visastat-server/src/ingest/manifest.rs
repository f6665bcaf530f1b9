//! Manifest handling (manifest.json)
//!
//! The manifest is the durable ledger of ingested documents: an
//! append-only record sequence plus a URL-keyed dedup map. It is
//! persisted after every successful append so a crash loses at most the
//! in-flight download.

use crate::ingest::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use visastat_common::VariantTag;

/// Provenance record for one ingested document. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestRecord {
    /// Source URL the document was downloaded from
    pub url: String,

    /// Hex SHA-256 digest of the file content
    pub sha256: String,

    /// File size in bytes
    pub bytes: u64,

    /// Fiscal-year label ("FY2023" or "unknown")
    pub fy: String,

    /// Which ingestion variant produced this record
    pub variant: VariantTag,

    /// When the download completed (UTC)
    pub downloaded_at: DateTime<Utc>,

    /// Destination path the file was written to
    pub saved_to: String,
}

/// The durable ledger of ingested files and dedup keys
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Ingested documents, in ingestion order
    #[serde(default)]
    pub records: Vec<ManifestRecord>,

    /// Source URL -> freshness token ("<etag>|<last-modified>").
    /// Presence of a URL here means it is already ingested; the token
    /// itself is audit data and is never consulted for revalidation.
    #[serde(rename = "_url_meta", default)]
    pub url_meta: HashMap<String, String>,
}

impl Manifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest from a file
    ///
    /// A missing file yields an empty manifest; a file that exists but
    /// fails to parse is a fatal error (we never silently fall back to
    /// empty, which would re-ingest the full archive).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Manifest::new());
        }

        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Persist the manifest, overwriting prior content
    ///
    /// Pretty-printed JSON for human auditability.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Append one record together with its dedup entry
    pub fn append(&mut self, record: ManifestRecord, freshness_token: String) {
        self.url_meta.insert(record.url.clone(), freshness_token);
        self.records.push(record);
    }

    /// Whether a URL has already been ingested
    pub fn is_ingested(&self, url: &str) -> bool {
        self.url_meta.contains_key(url)
    }

    /// Number of records in the ledger
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.url_meta.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(url: &str) -> ManifestRecord {
        ManifestRecord {
            url: url.to_string(),
            sha256: "abc123".to_string(),
            bytes: 1024,
            fy: "FY2023".to_string(),
            variant: VariantTag::Annual,
            downloaded_at: "2026-01-15T12:00:00Z".parse().unwrap(),
            saved_to: "data/visa-statistics/annual/FY2023/report.pdf".to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::load(dir.path().join("manifest.json")).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.record_count(), 0);
    }

    #[test]
    fn test_load_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Manifest::load(&path).is_err());
    }

    #[test]
    fn test_append_and_dedup() {
        let mut manifest = Manifest::new();
        assert!(!manifest.is_ingested("https://example.org/a.pdf"));

        manifest.append(sample_record("https://example.org/a.pdf"), "etag1|".to_string());

        assert!(manifest.is_ingested("https://example.org/a.pdf"));
        assert!(!manifest.is_ingested("https://example.org/b.pdf"));
        assert_eq!(manifest.record_count(), 1);
        assert_eq!(
            manifest.url_meta.get("https://example.org/a.pdf"),
            Some(&"etag1|".to_string())
        );
    }

    #[test]
    fn test_save_load_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");

        let mut manifest = Manifest::new();
        manifest.append(sample_record("https://example.org/a.pdf"), "|".to_string());
        manifest.append(sample_record("https://example.org/b.xlsx"), "etag|date".to_string());
        manifest.append(sample_record("https://example.org/c.xls"), "|mod".to_string());
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.records[0].url, "https://example.org/a.pdf");
        assert_eq!(loaded.records[1].url, "https://example.org/b.xlsx");
        assert_eq!(loaded.records[2].url, "https://example.org/c.xls");
    }

    #[test]
    fn test_save_is_pretty_printed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");

        let mut manifest = Manifest::new();
        manifest.append(sample_record("https://example.org/a.pdf"), "|".to_string());
        manifest.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Multi-line output with the external field names
        assert!(content.contains('\n'));
        assert!(content.contains("\"records\""));
        assert!(content.contains("\"_url_meta\""));
        assert!(content.contains("\"sha256\""));
        assert!(content.contains("\"variant\": \"annual\""));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/manifest.json");

        Manifest::new().save(&path).unwrap();
        assert!(path.exists());
    }
}
