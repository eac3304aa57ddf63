//! Rewrite-and-verify — asks a generation collaborator to rewrite achievement
//! bullets, audits each rewrite, and falls back to the original bullet verbatim
//! whenever the audit fails or the collaborator errors.
//!
//! The fallback is mandatory: an unverified rewrite never leaves this module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::grounding::facts::{extract_facts, FactSet};
use crate::grounding::prompts::{build_rewrite_prompt, REWRITE_SYSTEM};
use crate::grounding::verifier::{verify, VerificationResult};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::Achievement;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// What the rewrite should be tailored toward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteTarget {
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStatus {
    Accepted,
    /// Verification failed; `text` is the original bullet.
    RejectedFallback,
    /// The collaborator errored; `text` is the original bullet.
    GenerationFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub achievement_id: String,
    pub text: String,
    pub status: RewriteStatus,
    /// Absent when generation failed before there was anything to verify.
    pub verification: Option<VerificationResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The generation collaborator. Implement this to swap backends; carried in
/// `AppState` as `Arc<dyn BulletRewriter>`.
#[async_trait]
pub trait BulletRewriter: Send + Sync {
    async fn rewrite(
        &self,
        achievement: &Achievement,
        facts: &FactSet,
        target: &RewriteTarget,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl BulletRewriter for LlmClient {
    async fn rewrite(
        &self,
        achievement: &Achievement,
        facts: &FactSet,
        target: &RewriteTarget,
    ) -> Result<String, LlmError> {
        let prompt = build_rewrite_prompt(
            &achievement.bullet,
            &facts.metrics,
            &facts.key_facts,
            &facts.technologies,
            target.target_role.as_deref(),
            &target.keywords,
        );
        let text = self.call_text(&prompt, REWRITE_SYSTEM).await?;
        Ok(clean_bullet(&text))
    }
}

/// Strips wrapping quotes and a leading bullet marker from model output.
fn clean_bullet(text: &str) -> String {
    let line = text.trim().lines().next().unwrap_or_default().trim();
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line);
    line.trim_matches('"').trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Protocol
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites one achievement. Never fails: collaborator errors and failed audits
/// both resolve to the original bullet.
pub async fn rewrite_achievement(
    rewriter: &dyn BulletRewriter,
    achievement: &Achievement,
    target: &RewriteTarget,
) -> RewriteOutcome {
    let facts = extract_facts(achievement);

    let rewritten = match rewriter.rewrite(achievement, &facts, target).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!(
                "Rewrite of achievement {} returned empty text, keeping original",
                achievement.id
            );
            return fallback(achievement, RewriteStatus::GenerationFailed, None);
        }
        Err(e) => {
            warn!(
                "Rewrite of achievement {} failed: {e}, keeping original",
                achievement.id
            );
            return fallback(achievement, RewriteStatus::GenerationFailed, None);
        }
    };

    let verification = verify(&facts, &rewritten);
    if verification.all_facts_preserved {
        debug!(
            "Rewrite of achievement {} accepted (confidence {:.2})",
            achievement.id, verification.confidence
        );
        RewriteOutcome {
            achievement_id: achievement.id.clone(),
            text: rewritten,
            status: RewriteStatus::Accepted,
            verification: Some(verification),
        }
    } else {
        warn!(
            "Rewrite of achievement {} rejected: missing={:?} added={:?}, keeping original",
            achievement.id, verification.missing_facts, verification.added_facts
        );
        fallback(achievement, RewriteStatus::RejectedFallback, Some(verification))
    }
}

fn fallback(
    achievement: &Achievement,
    status: RewriteStatus,
    verification: Option<VerificationResult>,
) -> RewriteOutcome {
    RewriteOutcome {
        achievement_id: achievement.id.clone(),
        text: achievement.bullet.clone(),
        status,
        verification,
    }
}

/// Rewrites each achievement in order. One outcome per input.
pub async fn rewrite_achievements(
    rewriter: &dyn BulletRewriter,
    achievements: &[Achievement],
    target: &RewriteTarget,
) -> Vec<RewriteOutcome> {
    let mut outcomes = Vec::with_capacity(achievements.len());
    for achievement in achievements {
        outcomes.push(rewrite_achievement(rewriter, achievement, target).await);
    }

    let accepted = outcomes
        .iter()
        .filter(|o| o.status == RewriteStatus::Accepted)
        .count();
    info!(
        "Rewrote {} achievements: {} accepted, {} kept original",
        outcomes.len(),
        accepted,
        outcomes.len() - accepted
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Returns canned rewrites keyed by achievement id; unknown ids error.
    struct ScriptedRewriter {
        rewrites: HashMap<String, String>,
    }

    impl ScriptedRewriter {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                rewrites: pairs
                    .iter()
                    .map(|(id, text)| (id.to_string(), text.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl BulletRewriter for ScriptedRewriter {
        async fn rewrite(
            &self,
            achievement: &Achievement,
            _facts: &FactSet,
            _target: &RewriteTarget,
        ) -> Result<String, LlmError> {
            self.rewrites
                .get(&achievement.id)
                .cloned()
                .ok_or(LlmError::EmptyContent)
        }
    }

    fn achievement(id: &str, bullet: &str) -> Achievement {
        Achievement {
            id: id.to_string(),
            bullet: bullet.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_faithful_rewrite_is_accepted() {
        let rewriter = ScriptedRewriter::new(&[(
            "a1",
            "Cut API latency by 40% by introducing a Redis caching layer",
        )]);
        let a = achievement("a1", "Reduced latency by 40% using caching");
        let outcome = rewrite_achievement(&rewriter, &a, &RewriteTarget::default()).await;

        assert_eq!(outcome.status, RewriteStatus::Accepted);
        assert!(outcome.text.contains("40%"));
        assert!(outcome.verification.unwrap().all_facts_preserved);
    }

    #[tokio::test]
    async fn test_dropped_metric_falls_back_to_original() {
        let rewriter = ScriptedRewriter::new(&[("a1", "Improved system latency significantly")]);
        let a = achievement("a1", "Reduced latency by 40% using caching");
        let outcome = rewrite_achievement(&rewriter, &a, &RewriteTarget::default()).await;

        assert_eq!(outcome.status, RewriteStatus::RejectedFallback);
        assert_eq!(outcome.text, a.bullet);
        let verification = outcome.verification.unwrap();
        assert!(!verification.all_facts_preserved);
        assert_eq!(verification.missing_facts, vec!["40%".to_string()]);
    }

    #[tokio::test]
    async fn test_invented_metric_falls_back_to_original() {
        let rewriter =
            ScriptedRewriter::new(&[("a1", "Reduced latency by 40% for 2M users using caching")]);
        let a = achievement("a1", "Reduced latency by 40% using caching");
        let outcome = rewrite_achievement(&rewriter, &a, &RewriteTarget::default()).await;

        assert_eq!(outcome.status, RewriteStatus::RejectedFallback);
        assert_eq!(outcome.text, a.bullet);
    }

    #[tokio::test]
    async fn test_collaborator_error_keeps_original() {
        let rewriter = ScriptedRewriter::new(&[]);
        let a = achievement("a1", "Reduced latency by 40% using caching");
        let outcome = rewrite_achievement(&rewriter, &a, &RewriteTarget::default()).await;

        assert_eq!(outcome.status, RewriteStatus::GenerationFailed);
        assert_eq!(outcome.text, a.bullet);
        assert!(outcome.verification.is_none());
    }

    #[tokio::test]
    async fn test_blank_rewrite_keeps_original() {
        let rewriter = ScriptedRewriter::new(&[("a1", "   ")]);
        let a = achievement("a1", "Shipped the billing service");
        let outcome = rewrite_achievement(&rewriter, &a, &RewriteTarget::default()).await;

        assert_eq!(outcome.status, RewriteStatus::GenerationFailed);
        assert_eq!(outcome.text, a.bullet);
    }

    #[tokio::test]
    async fn test_batch_mixes_outcomes_in_input_order() {
        let rewriter = ScriptedRewriter::new(&[
            ("a1", "Delivered the billing service in Rust"),
            ("a2", "Improved conversion dramatically"),
        ]);
        let achievements = vec![
            achievement("a1", "Shipped the billing service"),
            achievement("a2", "Lifted conversion by 12%"),
            achievement("a3", "Wrote the onboarding docs"),
        ];
        let outcomes =
            rewrite_achievements(&rewriter, &achievements, &RewriteTarget::default()).await;

        let statuses: Vec<_> = outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![
                RewriteStatus::Accepted,
                RewriteStatus::RejectedFallback,
                RewriteStatus::GenerationFailed,
            ]
        );
        assert_eq!(outcomes[1].text, "Lifted conversion by 12%");
        assert_eq!(outcomes[2].achievement_id, "a3");
    }

    #[test]
    fn test_clean_bullet_strips_markers_and_quotes() {
        assert_eq!(clean_bullet("- Built things\n"), "Built things");
        assert_eq!(clean_bullet("\"Built things\""), "Built things");
        assert_eq!(clean_bullet("Built things\nExtra line"), "Built things");
    }
}
