//! Evidence Locator — finds the achievements that justify a claimed skill.
//!
//! An achievement counts only when its `skills` or `keywords` name the skill
//! (case-insensitive equality). Bullet text is never substring-searched, so every
//! piece of evidence can be traced back to an explicit tag.

use crate::models::{Achievement, UserProfile};

fn tags_skill(achievement: &Achievement, skill: &str) -> bool {
    achievement
        .skills
        .iter()
        .chain(achievement.keywords.iter())
        .any(|tag| tag.trim().to_lowercase() == skill)
}

/// Returns every achievement in work experience, projects, and volunteer entries
/// tagged with `skill`, in profile order. Empty when the skill is blank.
pub fn find_evidence(profile: &UserProfile, skill: &str) -> Vec<Achievement> {
    let skill = skill.trim().to_lowercase();
    if skill.is_empty() {
        return Vec::new();
    }

    profile
        .achievements()
        .filter(|a| !a.bullet.trim().is_empty())
        .filter(|a| tags_skill(a, &skill))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, VolunteerEntry, WorkExperience};

    fn achievement(id: &str, skills: &[&str], keywords: &[&str], bullet: &str) -> Achievement {
        Achievement {
            id: id.to_string(),
            bullet: bullet.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            experience: vec![WorkExperience {
                achievements: vec![
                    achievement("w1", &["Rust"], &[], "Rewrote the ingest service"),
                    achievement("w2", &[], &[], "Mentored interns on Rust"),
                ],
                ..Default::default()
            }],
            projects: vec![Project {
                achievements: vec![achievement("p1", &[], &["rust"], "Built a CLI")],
                ..Default::default()
            }],
            volunteer: vec![VolunteerEntry {
                achievements: vec![achievement("v1", &["Teaching"], &[], "Taught coding")],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_skills_and_keywords_case_insensitively() {
        let evidence = find_evidence(&profile(), "RUST");
        let ids: Vec<&str> = evidence.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "p1"]);
    }

    #[test]
    fn test_bullet_text_mentions_are_not_evidence() {
        // w2 mentions Rust in its bullet but is not tagged with it.
        let evidence = find_evidence(&profile(), "rust");
        assert!(evidence.iter().all(|a| a.id != "w2"));
    }

    #[test]
    fn test_volunteer_entries_are_scanned() {
        let evidence = find_evidence(&profile(), "teaching");
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].id, "v1");
    }

    #[test]
    fn test_unknown_or_blank_skill_yields_nothing() {
        assert!(find_evidence(&profile(), "cobol").is_empty());
        assert!(find_evidence(&profile(), "  ").is_empty());
    }

    #[test]
    fn test_blank_bullets_never_count_as_evidence() {
        let profile = UserProfile {
            experience: vec![WorkExperience {
                achievements: vec![achievement("w1", &["go"], &[], "  ")],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(find_evidence(&profile, "go").is_empty());
    }
}
