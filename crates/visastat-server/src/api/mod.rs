//! HTTP trigger interface
//!
//! Three routes, all thin wrappers over the ingest engine:
//!
//! - `GET /healthz` — liveness probe
//! - `POST /run/:family` — run `monthly`, `annual`, or `all` pipelines
//!   synchronously and report per-family summaries
//! - `GET /list` — current manifest contents, or `{"records": 0}` when no
//!   manifest exists yet

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::ingest::{IngestConfig, IngestPipeline, RunSummary};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use visastat_common::VariantFamily;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/run/:family", post(run_family))
        .route("/list", get(list_manifest))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe
async fn healthz() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Run the requested pipeline(s) synchronously
///
/// POST /run/:family where family is `monthly`, `annual`, or `all`
async fn run_family(
    State(state): State<AppState>,
    Path(family): Path<String>,
) -> Result<Response, AppError> {
    let families = parse_families(&family).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid family '{}'; expected monthly, annual, or all",
            family
        ))
    })?;

    let mut summaries: Vec<RunSummary> = Vec::new();
    for fam in families {
        let summary = run_one(state.config.ingest.clone(), fam).await?;
        summaries.push(summary);
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "family": family,
            "summaries": summaries,
        })),
    )
        .into_response())
}

/// Run one family with a freshly loaded manifest
async fn run_one(config: IngestConfig, family: VariantFamily) -> AppResult<RunSummary> {
    let mut pipeline = IngestPipeline::new(config)?;
    let summary = pipeline.run(family).await?;
    Ok(summary)
}

/// Return the manifest contents
async fn list_manifest(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = load_manifest_summary(&state.config.ingest.manifest_path)?;
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Manifest file contents as JSON, or `{"records": 0}` when absent
pub fn load_manifest_summary(path: &std::path::Path) -> AppResult<serde_json::Value> {
    if !path.exists() {
        return Ok(json!({ "records": 0 }));
    }

    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| AppError::Internal(format!("Manifest file is unreadable: {}", e)))?;

    Ok(value)
}

/// Map a trigger argument to the pipeline families it runs
fn parse_families(family: &str) -> Option<Vec<VariantFamily>> {
    match family.to_lowercase().as_str() {
        "monthly" => Some(vec![VariantFamily::Monthly]),
        "annual" => Some(vec![VariantFamily::Annual]),
        "all" => Some(vec![VariantFamily::Monthly, VariantFamily::Annual]),
        _ => None,
    }
}
