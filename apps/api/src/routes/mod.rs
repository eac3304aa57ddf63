pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::grounding::handlers as grounding;
use crate::matching::handlers as matching;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/batch", post(matching::handle_match_batch))
        // Grounding API
        .route("/api/v1/facts", post(grounding::handle_extract_facts))
        .route("/api/v1/verify", post(grounding::handle_verify))
        .route("/api/v1/verify/letter", post(grounding::handle_verify_letter))
        .route("/api/v1/rewrite", post(grounding::handle_rewrite))
        .fallback(not_found)
        .with_state(state)
}
