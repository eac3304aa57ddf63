//! Cascading Requirement Matcher — decides which evidenced skills satisfy each
//! job requirement and assembles the `MatchReport`.
//!
//! Per requirement: Unmatched → direct → semantic → transferable → inferred →
//! {Matched(type), Missing}. The first strategy that succeeds wins; later, looser
//! strategies are never consulted and results are never merged across levels.
//! A requirement no strategy can back with evidence is reported as missing.
//!
//! The matcher is pure: no I/O, no clock, no shared mutable state. One instance
//! can serve any number of concurrent calls.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::matching::corpus::build_skill_corpus;
use crate::matching::knowledge::KnowledgeBase;
use crate::matching::recommendations::{generate_recommendations, Recommendation};
use crate::matching::scoring::compute_match_score;
use crate::matching::strategies::{
    normalize, try_direct, try_inferred, try_semantic, try_transferable, MatchContext,
};
use crate::matching::thresholds::MatchingConfig;
use crate::models::{Achievement, ExtractedKeyword, JobRequirements, UserProfile};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Direct,
    Semantic,
    Transferable,
    Inferred,
}

impl MatchType {
    /// Cascade order, strongest first.
    pub const CASCADE: [MatchType; 4] = [
        MatchType::Direct,
        MatchType::Semantic,
        MatchType::Transferable,
        MatchType::Inferred,
    ];

    /// Inclusive confidence bounds for this match type.
    pub fn confidence_range(&self, config: &MatchingConfig) -> (f64, f64) {
        match self {
            MatchType::Direct => (config.synonym_confidence, config.exact_confidence),
            MatchType::Semantic => (
                config.semantic_base_confidence,
                config.semantic_base_confidence + config.semantic_confidence_span,
            ),
            MatchType::Transferable => (
                config.transferable_confidence,
                config.transferable_confidence,
            ),
            MatchType::Inferred => (config.inferred_confidence, config.inferred_confidence),
        }
    }
}

/// A satisfied requirement. Always carries at least one achievement as evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub requirement: ExtractedKeyword,
    pub user_evidence: Vec<Achievement>,
    pub match_type: MatchType,
    pub confidence: f64,
    /// The corpus skill the match was made on (the source skill for
    /// transferable/inferred matches).
    pub matched_skill: String,
    pub explanation: String,
}

impl Match {
    /// Returns `None` when `user_evidence` is empty; a match without evidence
    /// cannot exist. Confidence is clamped into the type's range.
    pub fn new(
        requirement: ExtractedKeyword,
        user_evidence: Vec<Achievement>,
        match_type: MatchType,
        confidence: f64,
        matched_skill: &str,
        explanation: String,
        config: &MatchingConfig,
    ) -> Option<Self> {
        if user_evidence.is_empty() {
            return None;
        }
        let (lo, hi) = match_type.confidence_range(config);
        Some(Self {
            requirement,
            user_evidence,
            match_type,
            confidence: confidence.clamp(lo, hi),
            matched_skill: matched_skill.to_string(),
            explanation,
        })
    }
}

/// Full matching result for one job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub matches: Vec<Match>,
    pub missing: Vec<ExtractedKeyword>,
    pub match_score: f64,
    pub recommendations: Vec<Recommendation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// Cascade matcher with injected knowledge tables and thresholds.
#[derive(Debug, Clone)]
pub struct CascadeMatcher {
    knowledge: Arc<KnowledgeBase>,
    config: MatchingConfig,
}

impl Default for CascadeMatcher {
    fn default() -> Self {
        Self::new(Arc::new(KnowledgeBase::builtin()), MatchingConfig::default())
    }
}

impl CascadeMatcher {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: MatchingConfig) -> Self {
        Self { knowledge, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Matches a profile against one job's required and preferred keywords.
    ///
    /// Required keywords are processed first, then preferred, each in input
    /// order. A keyword's `required` flag is normalized to the list it came from.
    pub fn match_user_to_job(
        &self,
        profile: &UserProfile,
        requirements: &JobRequirements,
    ) -> MatchReport {
        let corpus = build_skill_corpus(profile);
        let ctx = MatchContext {
            profile,
            corpus: &corpus,
            knowledge: &self.knowledge,
            config: &self.config,
        };

        let mut matches = Vec::new();
        let mut missing = Vec::new();
        let mut matched_required = 0usize;
        let mut matched_preferred = 0usize;

        let tagged = requirements
            .required
            .iter()
            .map(|kw| (kw, true))
            .chain(requirements.preferred.iter().map(|kw| (kw, false)));

        for (keyword, required) in tagged {
            if keyword.required != required {
                debug!(
                    "Keyword '{}' flagged required={} but listed as required={}; using list",
                    keyword.phrase, keyword.required, required
                );
            }
            let keyword = ExtractedKeyword {
                required,
                ..keyword.clone()
            };

            match self.match_requirement(&ctx, &keyword) {
                Some(m) => {
                    debug!(
                        "Requirement '{}' matched ({:?}, confidence {:.2}) via '{}'",
                        keyword.phrase, m.match_type, m.confidence, m.matched_skill
                    );
                    if required {
                        matched_required += 1;
                    } else {
                        matched_preferred += 1;
                    }
                    matches.push(m);
                }
                None => {
                    debug!("Requirement '{}' missing", keyword.phrase);
                    missing.push(keyword);
                }
            }
        }

        let match_score = compute_match_score(
            matched_required,
            requirements.required.len(),
            matched_preferred,
            requirements.preferred.len(),
            &self.config,
        );

        let recommendations =
            generate_recommendations(&missing, &matches, match_score, profile, &self.config);

        info!(
            "Match report: score={:.2}, {} matched, {} missing, {} recommendations (corpus {} skills)",
            match_score,
            matches.len(),
            missing.len(),
            recommendations.len(),
            corpus.len()
        );

        MatchReport {
            matches,
            missing,
            match_score,
            recommendations,
        }
    }

    /// Runs the cascade for one requirement. Blank phrases are always missing.
    pub fn match_requirement(
        &self,
        ctx: &MatchContext<'_>,
        keyword: &ExtractedKeyword,
    ) -> Option<Match> {
        if normalize(&keyword.phrase).is_empty() {
            return None;
        }

        MatchType::CASCADE.iter().find_map(|stage| match stage {
            MatchType::Direct => try_direct(ctx, keyword),
            MatchType::Semantic => try_semantic(ctx, keyword),
            MatchType::Transferable => try_transferable(ctx, keyword),
            MatchType::Inferred => try_inferred(ctx, keyword),
        })
    }
}

/// Matches with the built-in knowledge tables and default thresholds.
pub fn match_user_to_job(profile: &UserProfile, requirements: &JobRequirements) -> MatchReport {
    CascadeMatcher::default().match_user_to_job(profile, requirements)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordCategory, Skill, WorkExperience};

    fn keyword(phrase: &str, category: KeywordCategory, required: bool) -> ExtractedKeyword {
        ExtractedKeyword {
            phrase: phrase.to_string(),
            category,
            required,
            synonyms: vec![],
        }
    }

    fn evidenced(id: &str, skill: &str) -> Achievement {
        Achievement {
            id: id.to_string(),
            bullet: format!("Delivered a {skill} initiative that cut costs by 12%"),
            skills: vec![skill.to_string()],
            ..Default::default()
        }
    }

    fn profile(skills: &[&str], evidenced_skills: &[&str]) -> UserProfile {
        UserProfile {
            skills: skills
                .iter()
                .map(|s| Skill {
                    name: s.to_string(),
                    ..Default::default()
                })
                .collect(),
            experience: vec![WorkExperience {
                company: "Acme".to_string(),
                achievements: evidenced_skills
                    .iter()
                    .enumerate()
                    .map(|(i, s)| evidenced(&format!("a{i}"), s))
                    .collect(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn requirements(required: &[&str], preferred: &[&str]) -> JobRequirements {
        JobRequirements {
            required: required
                .iter()
                .map(|p| keyword(p, KeywordCategory::Other, true))
                .collect(),
            preferred: preferred
                .iter()
                .map(|p| keyword(p, KeywordCategory::Other, false))
                .collect(),
        }
    }

    #[test]
    fn test_every_match_has_evidence() {
        let p = profile(
            &["rust", "teaching", "react", "python"],
            &["rust", "teaching", "react"],
        );
        let report = match_user_to_job(
            &p,
            &requirements(
                &["rust", "communication", "javascript", "python"],
                &["kafka"],
            ),
        );
        assert!(!report.matches.is_empty());
        for m in &report.matches {
            assert!(!m.user_evidence.is_empty(), "{} has no evidence", m.requirement.phrase);
        }
    }

    #[test]
    fn test_confidence_within_type_bounds() {
        let config = MatchingConfig::default();
        let p = profile(
            &["rust", "teaching", "react", "data pipelines", "k8s"],
            &["rust", "teaching", "react", "data pipelines", "k8s"],
        );
        let report = match_user_to_job(
            &p,
            &requirements(
                &["rust", "kubernetes", "ci/cd pipelines", "communication", "javascript"],
                &[],
            ),
        );
        assert_eq!(report.matches.len(), 5);
        for m in &report.matches {
            let (lo, hi) = m.match_type.confidence_range(&config);
            assert!(
                m.confidence >= lo && m.confidence <= hi,
                "{:?} confidence {} outside [{lo}, {hi}]",
                m.match_type,
                m.confidence
            );
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_reports() {
        let p = profile(
            &["teaching", "sales", "react", "vue", "rust"],
            &["teaching", "sales", "react", "vue", "rust"],
        );
        let reqs = requirements(&["communication", "javascript", "go"], &["negotiation"]);
        let first = match_user_to_job(&p, &reqs);
        let second = match_user_to_job(&p, &reqs);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_direct_wins_over_inferred() {
        let p = profile(&["javascript", "react"], &["javascript", "react"]);
        let report = match_user_to_job(&p, &requirements(&["JavaScript"], &[]));
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].match_type, MatchType::Direct);
        assert_eq!(report.matches[0].confidence, 1.0);
    }

    #[test]
    fn test_transferable_teaching_to_communication() {
        let p = profile(&["teaching"], &["teaching"]);
        let report = match_user_to_job(&p, &requirements(&["communication"], &[]));
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].match_type, MatchType::Transferable);
        assert_eq!(report.matches[0].confidence, 0.6);
    }

    #[test]
    fn test_inferred_react_to_javascript() {
        let p = profile(&["react"], &["react"]);
        let report = match_user_to_job(&p, &requirements(&["javascript"], &[]));
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].match_type, MatchType::Inferred);
        assert_eq!(report.matches[0].confidence, 0.7);
    }

    #[test]
    fn test_listed_skill_without_evidence_is_missing() {
        let p = profile(&["python"], &[]);
        let report = match_user_to_job(&p, &requirements(&["python"], &[]));
        assert!(report.matches.is_empty());
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].phrase, "python");
    }

    #[test]
    fn test_adding_a_matched_required_keyword_never_lowers_score() {
        let reqs = requirements(&["rust", "go", "kafka"], &["docker"]);
        let before = match_user_to_job(&profile(&["rust"], &["rust"]), &reqs);
        let after = match_user_to_job(&profile(&["rust", "go"], &["rust", "go"]), &reqs);
        assert!(after.match_score >= before.match_score);
        assert!(after.match_score > before.match_score);
    }

    #[test]
    fn test_required_flag_normalized_to_list_membership() {
        let p = profile(&["rust"], &[]);
        let reqs = JobRequirements {
            required: vec![],
            preferred: vec![keyword("rust", KeywordCategory::Language, true)],
        };
        let report = match_user_to_job(&p, &reqs);
        assert_eq!(report.missing.len(), 1);
        assert!(!report.missing[0].required);
    }

    #[test]
    fn test_blank_requirement_is_missing() {
        let p = profile(&["rust"], &["rust"]);
        let report = match_user_to_job(&p, &requirements(&["   "], &[]));
        assert!(report.matches.is_empty());
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn test_empty_requirements_score_is_neutral() {
        let report = match_user_to_job(&UserProfile::default(), &JobRequirements::default());
        // 0.7 * 1.0 + 0.3 * 0.5
        assert!((report.match_score - 0.85).abs() < 1e-9);
        assert!(report.matches.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_injected_knowledge_base_replaces_builtin() {
        let p = profile(&["teaching"], &["teaching"]);
        let matcher = CascadeMatcher::new(Arc::new(KnowledgeBase::empty()), MatchingConfig::default());
        let report = matcher.match_user_to_job(&p, &requirements(&["communication"], &[]));
        assert!(report.matches.is_empty());
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn test_match_new_rejects_empty_evidence() {
        let config = MatchingConfig::default();
        let m = Match::new(
            keyword("rust", KeywordCategory::Language, true),
            vec![],
            MatchType::Direct,
            1.0,
            "rust",
            "exact".to_string(),
            &config,
        );
        assert!(m.is_none());
    }

    #[test]
    fn test_match_new_clamps_confidence_into_type_range() {
        let config = MatchingConfig::default();
        let m = Match::new(
            keyword("rust", KeywordCategory::Language, true),
            vec![evidenced("a0", "rust")],
            MatchType::Semantic,
            0.99,
            "rust lang",
            "overlap".to_string(),
            &config,
        )
        .unwrap();
        assert!((m.confidence - 0.9).abs() < 1e-9);
    }
}
