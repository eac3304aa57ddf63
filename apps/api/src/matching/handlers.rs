//! Axum route handlers for the Matching API.
//!
//! Matching is CPU-bound and synchronous, so every report is computed on the
//! blocking pool.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::cascade::{CascadeMatcher, MatchReport};
use crate::models::{JobRequirements, UserProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: UserProfile,
    pub requirements: JobRequirements,
}

#[derive(Debug, Deserialize)]
pub struct BatchJob {
    pub job_id: String,
    pub requirements: JobRequirements,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    pub profile: UserProfile,
    pub jobs: Vec<BatchJob>,
}

#[derive(Debug, Serialize)]
pub struct BatchMatchResult {
    pub job_id: String,
    pub report: MatchReport,
}

#[derive(Debug, Serialize)]
pub struct BatchMatchResponse {
    pub results: Vec<BatchMatchResult>,
}

async fn match_blocking(
    matcher: Arc<CascadeMatcher>,
    profile: Arc<UserProfile>,
    requirements: JobRequirements,
) -> Result<MatchReport, AppError> {
    tokio::task::spawn_blocking(move || matcher.match_user_to_job(&profile, &requirements))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Matching task failed: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let report = match_blocking(
        state.matcher.clone(),
        Arc::new(request.profile),
        request.requirements,
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/v1/match/batch
///
/// Matches one profile against many jobs. Jobs run independently on the
/// blocking pool; results come back in request order.
pub async fn handle_match_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchMatchRequest>,
) -> Result<Json<BatchMatchResponse>, AppError> {
    if request.jobs.is_empty() {
        return Err(AppError::Validation("jobs cannot be empty".to_string()));
    }

    let profile = Arc::new(request.profile);
    let tasks: Vec<_> = request
        .jobs
        .into_iter()
        .map(|job| {
            let matcher = state.matcher.clone();
            let profile = profile.clone();
            (
                job.job_id,
                tokio::spawn(match_blocking(matcher, profile, job.requirements)),
            )
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for (job_id, task) in tasks {
        let report = task
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Matching task failed: {e}")))??;
        results.push(BatchMatchResult { job_id, report });
    }

    info!("Batch matched {} jobs", results.len());
    Ok(Json(BatchMatchResponse { results }))
}
