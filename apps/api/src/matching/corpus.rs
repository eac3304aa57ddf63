//! Skill corpus — every skill string the candidate's profile mentions, lower-cased.

use std::collections::HashSet;

use crate::models::{Achievement, UserProfile};

/// Case-normalized set of known skills. Iterates in first-insertion order so
/// corpus scans are deterministic for identical profiles.
#[derive(Debug, Clone, Default)]
pub struct SkillCorpus {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl SkillCorpus {
    /// Adds a skill; blank strings and duplicates (case-insensitive) are ignored.
    pub fn insert(&mut self, skill: &str) -> bool {
        let normalized = skill.trim().to_lowercase();
        if normalized.is_empty() || self.index.contains(&normalized) {
            return false;
        }
        self.index.insert(normalized.clone());
        self.ordered.push(normalized);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.index.contains(&skill.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    fn extend<'a>(&mut self, skills: impl IntoIterator<Item = &'a String>) {
        for skill in skills {
            self.insert(skill);
        }
    }

    fn extend_from_achievements(&mut self, achievements: &[Achievement]) {
        for achievement in achievements {
            self.extend(&achievement.skills);
            self.extend(&achievement.keywords);
            self.extend(&achievement.transferable_skills);
        }
    }
}

/// Flattens a profile into its skill corpus.
///
/// Order: explicit skills, work experience (entry skills then achievement
/// skills/keywords/transferable skills), projects, volunteer entries, and
/// finally education `relevant_courses`.
pub fn build_skill_corpus(profile: &UserProfile) -> SkillCorpus {
    let mut corpus = SkillCorpus::default();

    for skill in &profile.skills {
        corpus.insert(&skill.name);
    }

    for job in &profile.experience {
        corpus.extend(&job.skills);
        corpus.extend_from_achievements(&job.achievements);
    }

    for project in &profile.projects {
        corpus.extend(&project.skills);
        corpus.extend_from_achievements(&project.achievements);
    }

    for entry in &profile.volunteer {
        corpus.extend(&entry.skills);
        corpus.extend_from_achievements(&entry.achievements);
    }

    for education in &profile.education {
        corpus.extend(&education.relevant_courses);
    }

    corpus
}
