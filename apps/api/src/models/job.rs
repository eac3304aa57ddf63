use serde::{Deserialize, Serialize};

/// Category assigned to a job requirement by the keyword extractor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Language,
    Framework,
    Cloud,
    Devops,
    Db,
    Tool,
    Soft,
    Domain,
    Methodology,
    Certification,
    #[default]
    #[serde(other)]
    Other,
}

impl KeywordCategory {
    /// Categories that a certification can plausibly cover.
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            KeywordCategory::Language
                | KeywordCategory::Framework
                | KeywordCategory::Cloud
                | KeywordCategory::Devops
                | KeywordCategory::Db
                | KeywordCategory::Tool
        )
    }
}

/// One job requirement as produced by the keyword-extraction collaborator.
/// `phrase` is free text, not pre-normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedKeyword {
    pub phrase: String,
    #[serde(default)]
    pub category: KeywordCategory,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required: Vec<ExtractedKeyword>,
    #[serde(default)]
    pub preferred: Vec<ExtractedKeyword>,
}
