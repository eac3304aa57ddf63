use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CareerStage {
    Student,
    EarlyCareer,
    CareerChanger,
    Professional,
}

/// A skill the candidate lists explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub proficiency: Option<Proficiency>,
    #[serde(default)]
    pub category: Option<String>,
    /// The candidate's own aliases; a requirement naming one matches this skill directly.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// A quantified outcome recorded alongside an achievement, e.g. `40 %` of latency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// One accomplishment bullet. Immutable once authored; consumed as evidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    #[serde(default)]
    pub id: String,
    pub bullet: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub transferable_skills: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolunteerEntry {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub graduation_date: Option<NaiveDate>,
    #[serde(default)]
    pub relevant_courses: Vec<String>,
}

/// Everything the engine knows about a candidate. Supplied by the profile store
/// already validated for required fields; optional sections default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub career_stage: Option<CareerStage>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub volunteer: Vec<VolunteerEntry>,
    #[serde(default)]
    pub education: Vec<Education>,
}

impl UserProfile {
    /// Every achievement in scan order: work experience, projects, volunteer entries.
    pub fn achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.experience
            .iter()
            .flat_map(|e| e.achievements.iter())
            .chain(self.projects.iter().flat_map(|p| p.achievements.iter()))
            .chain(self.volunteer.iter().flat_map(|v| v.achievements.iter()))
    }

    pub fn is_professional(&self) -> bool {
        self.career_stage == Some(CareerStage::Professional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_profile_deserializes_with_defaults() {
        let json = r#"{
            "skills": [{"name": "Rust"}],
            "experience": [{
                "company": "Acme",
                "start_date": "2021-03-01",
                "achievements": [{"id": "a1", "bullet": "Shipped the billing service"}]
            }]
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills.len(), 1);
        assert!(profile.skills[0].proficiency.is_none());
        assert!(profile.projects.is_empty());
        assert!(profile.career_stage.is_none());

        let achievement = &profile.experience[0].achievements[0];
        assert!(achievement.skills.is_empty());
        assert!(achievement.result.is_none());
        assert!(!achievement.verified);
    }

    #[test]
    fn test_achievements_scan_order() {
        let mk = |id: &str| Achievement {
            id: id.to_string(),
            bullet: format!("bullet {id}"),
            ..Default::default()
        };
        let profile = UserProfile {
            volunteer: vec![VolunteerEntry {
                achievements: vec![mk("v1")],
                ..Default::default()
            }],
            projects: vec![Project {
                achievements: vec![mk("p1")],
                ..Default::default()
            }],
            experience: vec![WorkExperience {
                achievements: vec![mk("w1"), mk("w2")],
                ..Default::default()
            }],
            ..Default::default()
        };

        let ids: Vec<&str> = profile.achievements().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w2", "p1", "v1"]);
    }

    #[test]
    fn test_missing_career_stage_is_not_professional() {
        assert!(!UserProfile::default().is_professional());
        let profile = UserProfile {
            career_stage: Some(CareerStage::Professional),
            ..Default::default()
        };
        assert!(profile.is_professional());
    }

    #[test]
    fn test_career_stage_serde_snake_case() {
        let stage: CareerStage = serde_json::from_str(r#""career_changer""#).unwrap();
        assert_eq!(stage, CareerStage::CareerChanger);
    }
}
