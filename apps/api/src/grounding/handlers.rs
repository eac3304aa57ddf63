//! Axum route handlers for the Grounding API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::grounding::facts::{extract_facts, FactSet};
use crate::grounding::rewrite::{rewrite_achievements, RewriteOutcome, RewriteTarget};
use crate::grounding::verifier::{verify, verify_letter, VerificationResult};
use crate::models::{Achievement, UserProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FactsRequest {
    pub achievement: Achievement,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub original: FactSet,
    pub rewritten_text: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyLetterRequest {
    pub profile: UserProfile,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub outcomes: Vec<RewriteOutcome>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/facts
pub async fn handle_extract_facts(
    Json(request): Json<FactsRequest>,
) -> Result<Json<FactSet>, AppError> {
    if request.achievement.bullet.trim().is_empty() {
        return Err(AppError::Validation(
            "achievement.bullet cannot be empty".to_string(),
        ));
    }
    Ok(Json(extract_facts(&request.achievement)))
}

/// POST /api/v1/verify
pub async fn handle_verify(
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerificationResult>, AppError> {
    if request.rewritten_text.trim().is_empty() {
        return Err(AppError::Validation(
            "rewritten_text cannot be empty".to_string(),
        ));
    }
    Ok(Json(verify(&request.original, &request.rewritten_text)))
}

/// POST /api/v1/verify/letter
pub async fn handle_verify_letter(
    Json(request): Json<VerifyLetterRequest>,
) -> Result<Json<VerificationResult>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let result = verify_letter(&request.profile, &request.text);
    if !result.all_facts_preserved {
        info!(
            "Letter verification flagged {} claims (confidence {:.2})",
            result.added_facts.len(),
            result.confidence
        );
    }
    Ok(Json(result))
}

/// POST /api/v1/rewrite
///
/// Rewrites each bullet through the configured collaborator. Bullets that fail
/// verification come back unchanged.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    let rewriter = state.rewriter.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("No generation backend is configured".to_string())
    })?;
    if request.achievements.is_empty() {
        return Err(AppError::Validation(
            "achievements cannot be empty".to_string(),
        ));
    }
    if let Some(blank) = request.achievements.iter().find(|a| a.bullet.trim().is_empty()) {
        return Err(AppError::Validation(format!(
            "achievement '{}' has an empty bullet",
            blank.id
        )));
    }

    let target = RewriteTarget {
        target_role: request.target_role,
        keywords: request.keywords,
    };
    let outcomes = rewrite_achievements(rewriter.as_ref(), &request.achievements, &target).await;

    Ok(Json(RewriteResponse { outcomes }))
}
