//! Recommendation Generator — turns gaps and weak matches into prioritized advice.
//!
//! Rules, evaluated in order and then stable-sorted by priority:
//! 1. first 3 missing required keywords → high "add-skill"
//! 2. first 2 missing preferred keywords → medium "add-skill"
//! 3. up to 2 matches below 0.7 confidence → medium "reframe-experience"
//! 4. score below 0.6 and not a working professional → one high "add-project"
//! 5. first missing technical keyword → low "get-certification"

use serde::{Deserialize, Serialize};

use crate::matching::cascade::Match;
use crate::matching::thresholds::MatchingConfig;
use crate::models::{ExtractedKeyword, UserProfile};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    AddSkill,
    ReframeExperience,
    AddProject,
    GetCertification,
}

/// Ordered so that sorting puts `High` first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub rec_type: RecommendationType,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    pub reason: String,
    pub suggestion: String,
}

pub fn generate_recommendations(
    missing: &[ExtractedKeyword],
    matches: &[Match],
    match_score: f64,
    profile: &UserProfile,
    config: &MatchingConfig,
) -> Vec<Recommendation> {
    let limits = &config.recommendation_limits;
    let mut recommendations = Vec::new();

    for kw in missing.iter().filter(|k| k.required).take(limits.missing_required) {
        recommendations.push(Recommendation {
            rec_type: RecommendationType::AddSkill,
            priority: Priority::High,
            skill: Some(kw.phrase.clone()),
            reason: format!(
                "'{}' is a required qualification with no supporting evidence in your profile",
                kw.phrase
            ),
            suggestion: format!(
                "Add an achievement or project that demonstrates '{}', tagged with that skill",
                kw.phrase
            ),
        });
    }

    for kw in missing.iter().filter(|k| !k.required).take(limits.missing_preferred) {
        recommendations.push(Recommendation {
            rec_type: RecommendationType::AddSkill,
            priority: Priority::Medium,
            skill: Some(kw.phrase.clone()),
            reason: format!("'{}' is a preferred qualification you have not evidenced", kw.phrase),
            suggestion: format!(
                "If you have used '{}', record an achievement that shows it",
                kw.phrase
            ),
        });
    }

    for m in matches
        .iter()
        .filter(|m| m.confidence < config.weak_match_confidence)
        .take(limits.weak_matches)
    {
        recommendations.push(Recommendation {
            rec_type: RecommendationType::ReframeExperience,
            priority: Priority::Medium,
            skill: Some(m.requirement.phrase.clone()),
            reason: format!(
                "'{}' is only matched indirectly through '{}' (confidence {:.2})",
                m.requirement.phrase, m.matched_skill, m.confidence
            ),
            suggestion: format!(
                "Emphasize how your '{}' experience demonstrates '{}' more prominently",
                m.matched_skill, m.requirement.phrase
            ),
        });
    }

    if match_score < config.add_project_score_threshold && !profile.is_professional() {
        recommendations.push(Recommendation {
            rec_type: RecommendationType::AddProject,
            priority: Priority::High,
            skill: None,
            reason: format!(
                "Match score {:.0}% is low and you have limited professional experience",
                match_score * 100.0
            ),
            suggestion: "Build a portfolio project that exercises the job's core required skills"
                .to_string(),
        });
    }

    for kw in missing
        .iter()
        .filter(|k| k.category.is_technical())
        .take(limits.certifications)
    {
        recommendations.push(Recommendation {
            rec_type: RecommendationType::GetCertification,
            priority: Priority::Low,
            skill: Some(kw.phrase.clone()),
            reason: format!("A certification would provide verifiable evidence of '{}'", kw.phrase),
            suggestion: format!("Consider a recognized certification covering '{}'", kw.phrase),
        });
    }

    // Stable: rule order is preserved within a priority.
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::cascade::MatchType;
    use crate::models::{Achievement, CareerStage, KeywordCategory};

    fn kw(phrase: &str, category: KeywordCategory, required: bool) -> ExtractedKeyword {
        ExtractedKeyword {
            phrase: phrase.to_string(),
            category,
            required,
            synonyms: vec![],
        }
    }

    fn weak_match(phrase: &str) -> Match {
        Match::new(
            kw(phrase, KeywordCategory::Soft, true),
            vec![Achievement {
                id: "a1".to_string(),
                bullet: "Taught 30 students".to_string(),
                skills: vec!["teaching".to_string()],
                ..Default::default()
            }],
            MatchType::Transferable,
            0.6,
            "teaching",
            "transfers".to_string(),
            &MatchingConfig::default(),
        )
        .unwrap()
    }

    fn professional() -> UserProfile {
        UserProfile {
            career_stage: Some(CareerStage::Professional),
            ..Default::default()
        }
    }

    #[test]
    fn test_top_three_missing_required_are_high_priority() {
        let missing: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|p| kw(p, KeywordCategory::Soft, true))
            .collect();
        let recs = generate_recommendations(&missing, &[], 0.9, &professional(), &MatchingConfig::default());
        assert_eq!(recs.len(), 3);
        assert!(recs
            .iter()
            .all(|r| r.priority == Priority::High && r.rec_type == RecommendationType::AddSkill));
        assert_eq!(recs[2].skill.as_deref(), Some("c"));
    }

    #[test]
    fn test_missing_preferred_capped_at_two_medium() {
        let missing: Vec<_> = ["x", "y", "z"]
            .iter()
            .map(|p| kw(p, KeywordCategory::Soft, false))
            .collect();
        let recs = generate_recommendations(&missing, &[], 0.9, &professional(), &MatchingConfig::default());
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.priority == Priority::Medium));
    }

    #[test]
    fn test_weak_matches_become_reframe_advice() {
        let matches = vec![weak_match("communication"), weak_match("mentoring"), weak_match("training")];
        let recs = generate_recommendations(&[], &matches, 0.9, &professional(), &MatchingConfig::default());
        assert_eq!(recs.len(), 2);
        assert!(recs
            .iter()
            .all(|r| r.rec_type == RecommendationType::ReframeExperience));
    }

    #[test]
    fn test_add_project_for_low_score_non_professional() {
        let student = UserProfile {
            career_stage: Some(CareerStage::Student),
            ..Default::default()
        };
        let recs = generate_recommendations(&[], &[], 0.4, &student, &MatchingConfig::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].rec_type, RecommendationType::AddProject);
        assert_eq!(recs[0].priority, Priority::High);

        let none = generate_recommendations(&[], &[], 0.4, &professional(), &MatchingConfig::default());
        assert!(none.is_empty());

        let high_score = generate_recommendations(&[], &[], 0.6, &student, &MatchingConfig::default());
        assert!(high_score.is_empty());
    }

    #[test]
    fn test_single_certification_for_technical_gap() {
        let missing = vec![
            kw("communication", KeywordCategory::Soft, true),
            kw("aws", KeywordCategory::Cloud, false),
            kw("terraform", KeywordCategory::Devops, false),
        ];
        let recs = generate_recommendations(&missing, &[], 0.9, &professional(), &MatchingConfig::default());
        let certs: Vec<_> = recs
            .iter()
            .filter(|r| r.rec_type == RecommendationType::GetCertification)
            .collect();
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].skill.as_deref(), Some("aws"));
        assert_eq!(certs[0].priority, Priority::Low);
    }

    #[test]
    fn test_sorted_by_priority_high_first() {
        let missing = vec![
            kw("kafka", KeywordCategory::Tool, false),
            kw("rust", KeywordCategory::Language, true),
        ];
        let recs = generate_recommendations(
            &missing,
            &[weak_match("communication")],
            0.3,
            &UserProfile::default(),
            &MatchingConfig::default(),
        );
        let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert_eq!(recs[0].skill.as_deref(), Some("rust"));
        assert_eq!(recs[1].rec_type, RecommendationType::AddProject);
        assert_eq!(recs.last().unwrap().rec_type, RecommendationType::GetCertification);
    }

    #[test]
    fn test_recommendation_type_serializes_kebab_case() {
        let json = serde_json::to_string(&RecommendationType::ReframeExperience).unwrap();
        assert_eq!(json, r#""reframe-experience""#);
    }
}
