use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::MatchingConfig;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables `/api/v1/rewrite` when set.
    pub anthropic_api_key: Option<String>,
    /// JSON file replacing the built-in knowledge tables.
    pub knowledge_base_path: Option<PathBuf>,
    pub semantic_threshold: Option<f64>,
    pub required_weight: Option<f64>,
    pub transferable_confidence: Option<f64>,
    pub inferred_confidence: Option<f64>,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            knowledge_base_path: None,
            semantic_threshold: None,
            required_weight: None,
            transferable_confidence: None,
            inferred_confidence: None,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            knowledge_base_path: optional_env("KNOWLEDGE_BASE_PATH").map(PathBuf::from),
            semantic_threshold: parse_env("MATCH_SEMANTIC_THRESHOLD")?,
            required_weight: parse_env("MATCH_REQUIRED_WEIGHT")?,
            transferable_confidence: parse_env("MATCH_TRANSFERABLE_CONFIDENCE")?,
            inferred_confidence: parse_env("MATCH_INFERRED_CONFIDENCE")?,
            port: parse_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Matching thresholds with any environment overrides applied.
    pub fn matching_config(&self) -> MatchingConfig {
        let mut config = MatchingConfig::default();
        if let Some(w) = self.required_weight {
            config = config.with_required_weight(w);
        }
        if let Some(t) = self.semantic_threshold {
            config.semantic_threshold = t.clamp(0.0, 1.0);
        }
        if let Some(c) = self.transferable_confidence {
            config.transferable_confidence = c.clamp(0.0, 1.0);
        }
        if let Some(c) = self.inferred_confidence {
            config.inferred_confidence = c.clamp(0.0, 1.0);
        }
        config
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
        })
        .transpose()
}
