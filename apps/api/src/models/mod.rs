// Input records shared by matching and grounding.
// Produced by collaborators (profile store, keyword extractor); never mutated here.

pub mod job;
pub mod profile;

pub use job::{ExtractedKeyword, JobRequirements, KeywordCategory};
pub use profile::{
    Achievement, CareerStage, Education, Metric, Proficiency, Project, Skill, UserProfile,
    VolunteerEntry, WorkExperience,
};
