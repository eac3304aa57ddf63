// Skill-to-requirement matching engine.
// Pure, synchronous computation: profile + job requirements → MatchReport.
// Knowledge tables are injected; nothing here performs I/O.

pub mod cascade;
pub mod corpus;
pub mod evidence;
pub mod handlers;
pub mod knowledge;
pub mod recommendations;
pub mod scoring;
pub mod strategies;
pub mod thresholds;

pub use cascade::{match_user_to_job, CascadeMatcher, Match, MatchReport, MatchType};
pub use knowledge::KnowledgeBase;
pub use recommendations::{Priority, Recommendation, RecommendationType};
pub use thresholds::MatchingConfig;
