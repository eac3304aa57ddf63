use std::sync::Arc;

use crate::config::Config;
use crate::grounding::BulletRewriter;
use crate::matching::CascadeMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Cascade matcher with the loaded knowledge tables and thresholds.
    pub matcher: Arc<CascadeMatcher>,
    /// Pluggable rewrite backend. Default: `LlmClient`. `None` when no API key is set.
    pub rewriter: Option<Arc<dyn BulletRewriter>>,
}

impl AppState {
    pub fn new(
        config: Config,
        matcher: CascadeMatcher,
        rewriter: Option<Arc<dyn BulletRewriter>>,
    ) -> Self {
        Self {
            config,
            matcher: Arc::new(matcher),
            rewriter,
        }
    }
}
