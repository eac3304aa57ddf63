//! Matching constants. Business rules reproduced exactly; override per instance
//! through `MatchingConfig` rather than editing the literals.

use serde::{Deserialize, Serialize};

pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;
pub const SYNONYM_MATCH_CONFIDENCE: f64 = 0.95;
pub const SEMANTIC_THRESHOLD: f64 = 0.5;
pub const SEMANTIC_BASE_CONFIDENCE: f64 = 0.7;
pub const SEMANTIC_CONFIDENCE_SPAN: f64 = 0.2;
pub const TRANSFERABLE_CONFIDENCE: f64 = 0.6;
pub const INFERRED_CONFIDENCE: f64 = 0.7;
/// Tokens of this many characters or fewer are dropped before Jaccard.
pub const MIN_TOKEN_LEN: usize = 2;

pub const REQUIRED_WEIGHT: f64 = 0.7;
pub const PREFERRED_WEIGHT: f64 = 0.3;
/// Required score when the job lists no required keywords.
pub const EMPTY_REQUIRED_SCORE: f64 = 1.0;
/// Neutral preferred score when the job lists no preferred keywords.
pub const EMPTY_PREFERRED_SCORE: f64 = 0.5;

pub const WEAK_MATCH_CONFIDENCE: f64 = 0.7;
pub const ADD_PROJECT_SCORE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationLimits {
    pub missing_required: usize,
    pub missing_preferred: usize,
    pub weak_matches: usize,
    pub certifications: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            missing_required: 3,
            missing_preferred: 2,
            weak_matches: 2,
            certifications: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub exact_confidence: f64,
    pub synonym_confidence: f64,
    pub semantic_threshold: f64,
    pub semantic_base_confidence: f64,
    pub semantic_confidence_span: f64,
    pub transferable_confidence: f64,
    pub inferred_confidence: f64,
    pub min_token_len: usize,
    pub required_weight: f64,
    pub preferred_weight: f64,
    pub empty_required_score: f64,
    pub empty_preferred_score: f64,
    pub weak_match_confidence: f64,
    pub add_project_score_threshold: f64,
    pub recommendation_limits: RecommendationLimits,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            exact_confidence: EXACT_MATCH_CONFIDENCE,
            synonym_confidence: SYNONYM_MATCH_CONFIDENCE,
            semantic_threshold: SEMANTIC_THRESHOLD,
            semantic_base_confidence: SEMANTIC_BASE_CONFIDENCE,
            semantic_confidence_span: SEMANTIC_CONFIDENCE_SPAN,
            transferable_confidence: TRANSFERABLE_CONFIDENCE,
            inferred_confidence: INFERRED_CONFIDENCE,
            min_token_len: MIN_TOKEN_LEN,
            required_weight: REQUIRED_WEIGHT,
            preferred_weight: PREFERRED_WEIGHT,
            empty_required_score: EMPTY_REQUIRED_SCORE,
            empty_preferred_score: EMPTY_PREFERRED_SCORE,
            weak_match_confidence: WEAK_MATCH_CONFIDENCE,
            add_project_score_threshold: ADD_PROJECT_SCORE_THRESHOLD,
            recommendation_limits: RecommendationLimits::default(),
        }
    }
}

impl MatchingConfig {
    /// Confidence for a semantic match of the given Jaccard similarity.
    pub fn semantic_confidence(&self, similarity: f64) -> f64 {
        self.semantic_base_confidence + similarity * self.semantic_confidence_span
    }

    /// Sets the required weight; the preferred weight becomes its complement.
    pub fn with_required_weight(mut self, required_weight: f64) -> Self {
        let w = required_weight.clamp(0.0, 1.0);
        self.required_weight = w;
        self.preferred_weight = 1.0 - w;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_business_rules() {
        let c = MatchingConfig::default();
        assert_eq!(c.semantic_threshold, 0.5);
        assert_eq!(c.transferable_confidence, 0.6);
        assert_eq!(c.inferred_confidence, 0.7);
        assert!((c.required_weight + c.preferred_weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_semantic_confidence_spans_0_7_to_0_9() {
        let c = MatchingConfig::default();
        assert!((c.semantic_confidence(0.5) - 0.8).abs() < 1e-9);
        assert!((c.semantic_confidence(1.0) - 0.9).abs() < 1e-9);
        assert!((c.semantic_confidence(0.0) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_required_weight_override_keeps_complement() {
        let c = MatchingConfig::default().with_required_weight(0.8);
        assert!((c.preferred_weight - 0.2).abs() < 1e-9);
        let clamped = MatchingConfig::default().with_required_weight(1.7);
        assert_eq!(clamped.required_weight, 1.0);
        assert_eq!(clamped.preferred_weight, 0.0);
    }
}
