use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillmatch::config::Config;
use skillmatch::grounding::BulletRewriter;
use skillmatch::llm_client::{self, LlmClient};
use skillmatch::matching::{CascadeMatcher, KnowledgeBase};
use skillmatch::routes::build_router;
use skillmatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skillmatch={},skillmatch_api={}", config.rust_log, config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Knowledge tables: built-in unless a JSON file replaces them
    let knowledge = match &config.knowledge_base_path {
        Some(path) => {
            let kb = KnowledgeBase::from_json_file(path)?;
            info!("Knowledge base loaded from {}", path.display());
            kb
        }
        None => KnowledgeBase::builtin(),
    };

    let matching_config = config.matching_config();
    info!(
        "Matching config: semantic_threshold={} required_weight={} transferable={} inferred={}",
        matching_config.semantic_threshold,
        matching_config.required_weight,
        matching_config.transferable_confidence,
        matching_config.inferred_confidence
    );
    let matcher = CascadeMatcher::new(Arc::new(knowledge), matching_config);

    // Rewrite backend is optional; /api/v1/rewrite answers 503 without it
    let rewriter: Option<Arc<dyn BulletRewriter>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(llm))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; rewrite endpoint disabled");
            None
        }
    };

    let state = AppState::new(config.clone(), matcher, rewriter);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
