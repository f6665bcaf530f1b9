// Ingestion pipeline and variant drivers
//
// Traversal is fully sequential: one fetch outstanding at a time, with
// the fetcher's politeness pause after every request. The manifest is
// persisted after every append, so a crash loses at most the in-flight
// download. A failure on a single candidate or leaf page is recorded and
// skipped; only root/category discovery failures abort a family's run.

use crate::ingest::fiscal_year::UNKNOWN_FISCAL_YEAR;
use crate::ingest::{
    links, CandidateLink, Fetcher, FiscalYearResolver, IngestConfig, IngestError, Manifest,
    ManifestRecord, Result,
};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use url::Url;
use visastat_common::{checksum, VariantFamily, VariantTag};

/// Root-page anchor text identifying the annual reports page
const ANNUAL_LINK_TEXT: &str = "annual";

/// Root-page anchor text identifying the monthly immigrant visa page
const MONTHLY_IV_LINK_TEXT: &str = "monthly immigrant visa";

/// Root-page anchor text identifying the monthly non-immigrant visa page
const MONTHLY_NIV_LINK_TEXT: &str = "monthly nonimmigrant visa";

/// Outcome of one candidate decision
#[derive(Debug)]
pub enum CandidateOutcome {
    /// Document downloaded, hashed, and recorded
    Ingested(ManifestRecord),
    /// Candidate intentionally not fetched
    Skipped(String),
    /// Fetch or filesystem failure; traversal continues
    Failed(String),
}

/// How a family's traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Traversal reached the end of the hierarchy
    Completed,
    /// The expected root link(s) for this family were not found
    NoData,
}

/// Aggregated result of one family's run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Which driver ran
    pub family: VariantFamily,

    /// Traversal outcome
    pub outcome: RunOutcome,

    /// Manifest records appended by this run
    pub appended: usize,

    /// Candidates skipped as already ingested
    pub skipped: usize,

    /// Per-candidate and per-page failures, with context
    pub errors: Vec<String>,
}

impl RunSummary {
    fn new(family: VariantFamily) -> Self {
        RunSummary {
            family,
            outcome: RunOutcome::Completed,
            appended: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    fn observe(&mut self, outcome: CandidateOutcome) {
        match outcome {
            CandidateOutcome::Ingested(_) => self.appended += 1,
            CandidateOutcome::Skipped(_) => self.skipped += 1,
            CandidateOutcome::Failed(reason) => self.errors.push(reason),
        }
    }
}

/// The crawl-and-ingest engine
///
/// Holds the loaded manifest for the duration of one run; construct a
/// fresh pipeline per run so the manifest reflects persisted state.
pub struct IngestPipeline {
    config: IngestConfig,
    fetcher: Fetcher,
    resolver: FiscalYearResolver,
    manifest: Manifest,
}

impl IngestPipeline {
    /// Create a pipeline, loading persisted manifest state
    ///
    /// Fails fast if the manifest file exists but cannot be parsed.
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate().map_err(IngestError::Validation)?;

        let fetcher = Fetcher::new(&config)?;
        let resolver = FiscalYearResolver::new()?;
        let manifest = Manifest::load(&config.manifest_path)?;

        Ok(IngestPipeline {
            config,
            fetcher,
            resolver,
            manifest,
        })
    }

    /// The manifest as currently held in memory
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Run one family's traversal to completion
    pub async fn run(&mut self, family: VariantFamily) -> Result<RunSummary> {
        match family {
            VariantFamily::Annual => self.run_annual().await,
            VariantFamily::Monthly => self.run_monthly().await,
        }
    }

    /// Annual driver: root -> annual category page -> one page per
    /// fiscal year -> document links
    async fn run_annual(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::new(VariantFamily::Annual);
        let root_url = Url::parse(&self.config.root_url)?;

        info!(variant = %VariantFamily::Annual, url = %root_url, "Starting annual ingestion");

        let root_html = self.fetcher.fetch_page(root_url.as_str()).await?;

        let Some(annual_url) = links::find_link_by_text(&root_html, &root_url, ANNUAL_LINK_TEXT)
        else {
            warn!(variant = %VariantFamily::Annual, "Annual reports page not found");
            summary.outcome = RunOutcome::NoData;
            return Ok(summary);
        };

        let category_html = self.fetcher.fetch_page(annual_url.as_str()).await?;

        // Year pages are the category anchors that resolve to a concrete
        // fiscal year; every document on a year page inherits its label.
        let year_pages: Vec<(String, Url)> = links::extract_links(&category_html, &annual_url)
            .into_iter()
            .filter_map(|(url, text)| {
                let fy = self.resolver.resolve(&text);
                (fy != UNKNOWN_FISCAL_YEAR).then_some((fy, url))
            })
            .collect();

        for (fy, year_url) in year_pages {
            let year_html = match self.fetcher.fetch_page(year_url.as_str()).await {
                Ok(html) => html,
                Err(e) => {
                    error!(variant = %VariantFamily::Annual, url = %year_url, error = %e, "Failed to fetch year page");
                    summary.errors.push(format!("{}: {}", year_url, e));
                    continue;
                },
            };

            let candidates =
                links::document_links(&year_html, &year_url, &self.config.allowed_extensions);

            for candidate in candidates {
                let outcome = self
                    .ingest_candidate(&candidate, &fy, VariantTag::Annual, Path::new("annual"))
                    .await;
                summary.observe(outcome);
            }
        }

        info!(
            variant = %VariantFamily::Annual,
            appended = summary.appended,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "Annual ingestion complete"
        );

        Ok(summary)
    }

    /// Monthly driver: root -> one page per visa program -> document
    /// links, fiscal year resolved per link
    async fn run_monthly(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::new(VariantFamily::Monthly);
        let root_url = Url::parse(&self.config.root_url)?;

        info!(variant = %VariantFamily::Monthly, url = %root_url, "Starting monthly ingestion");

        let root_html = self.fetcher.fetch_page(root_url.as_str()).await?;

        let mut program_pages = Vec::new();
        if let Some(url) = links::find_link_by_text(&root_html, &root_url, MONTHLY_IV_LINK_TEXT) {
            program_pages.push((VariantTag::MonthlyIv, "iv", url));
        }
        if let Some(url) = links::find_link_by_text(&root_html, &root_url, MONTHLY_NIV_LINK_TEXT) {
            program_pages.push((VariantTag::MonthlyNiv, "niv", url));
        }

        if program_pages.is_empty() {
            warn!(variant = %VariantFamily::Monthly, "No monthly program pages found");
            summary.outcome = RunOutcome::NoData;
            return Ok(summary);
        }

        for (tag, program, program_url) in program_pages {
            info!(variant = %tag, url = %program_url, "Scanning program page");

            let program_html = match self.fetcher.fetch_page(program_url.as_str()).await {
                Ok(html) => html,
                Err(e) => {
                    error!(variant = %tag, url = %program_url, error = %e, "Failed to fetch program page");
                    summary.errors.push(format!("{}: {}", program_url, e));
                    continue;
                },
            };

            let candidates =
                links::document_links(&program_html, &program_url, &self.config.allowed_extensions);
            let subpath = PathBuf::from("monthly").join(program);

            for candidate in candidates {
                let fy = self.resolver.resolve(&candidate.text);
                let outcome = self.ingest_candidate(&candidate, &fy, tag, &subpath).await;
                summary.observe(outcome);
            }
        }

        info!(
            variant = %VariantFamily::Monthly,
            appended = summary.appended,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "Monthly ingestion complete"
        );

        Ok(summary)
    }

    /// Decide one candidate: dedup, download, hash, record, persist
    async fn ingest_candidate(
        &mut self,
        candidate: &CandidateLink,
        fy: &str,
        tag: VariantTag,
        subpath: &Path,
    ) -> CandidateOutcome {
        let url = candidate.url.as_str();

        let Some(basename) = basename_of(&candidate.url) else {
            return CandidateOutcome::Failed(format!("{}: no file name in URL path", url));
        };

        // Dedup is keyed on the URL alone; no fetch and no re-hash for a
        // known URL, even if the remote content has since changed.
        if self.manifest.is_ingested(url) {
            info!(url = %url, variant = %tag, "Skipping existing document");
            return CandidateOutcome::Skipped(format!("{}: already ingested", url));
        }

        let dest = self.config.data_dir.join(subpath).join(fy).join(&basename);

        match self.download_and_record(candidate, fy, tag, &dest).await {
            Ok(record) => CandidateOutcome::Ingested(record),
            Err(e) => {
                error!(url = %url, variant = %tag, error = %e, "Failed to ingest document");
                CandidateOutcome::Failed(format!("{}: {}", url, e))
            },
        }
    }

    async fn download_and_record(
        &mut self,
        candidate: &CandidateLink,
        fy: &str,
        tag: VariantTag,
        dest: &Path,
    ) -> Result<ManifestRecord> {
        let document = self.fetcher.fetch_document(candidate.url.as_str()).await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &document.bytes).await?;

        let sha256 = checksum::compute_file_checksum(dest)?;

        let record = ManifestRecord {
            url: candidate.url.to_string(),
            sha256,
            bytes: document.bytes.len() as u64,
            fy: fy.to_string(),
            variant: tag,
            downloaded_at: Utc::now(),
            saved_to: dest.display().to_string(),
        };

        self.manifest
            .append(record.clone(), document.freshness_token());
        self.manifest.save(&self.config.manifest_path)?;

        info!(
            url = %candidate.url,
            dest = %dest.display(),
            fy = %fy,
            variant = %tag,
            bytes = record.bytes,
            "Saved document"
        );

        Ok(record)
    }
}

/// Final path segment of a URL, if any
fn basename_of(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}
