//! Knowledge tables — read-only lookup data shared by every matching call.
//!
//! - transferable: non-technical domain skill → target skills it substitutes for
//! - inferences: tool/framework → skills it implies
//! - synonyms: canonical skill → equivalent spellings (searched in both directions)
//!
//! Built-in tables ship with the binary; `KNOWLEDGE_BASE_PATH` swaps in a JSON file
//! with the same shape. Tests build smaller tables directly.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const TRANSFERABLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "teaching",
        &[
            "communication",
            "presentation",
            "mentoring",
            "curriculum design",
            "public speaking",
            "training",
            "coaching",
        ],
    ),
    (
        "sales",
        &[
            "communication",
            "negotiation",
            "relationship building",
            "persuasion",
            "client management",
            "stakeholder management",
        ],
    ),
    (
        "military",
        &[
            "leadership",
            "discipline",
            "teamwork",
            "crisis management",
            "operations",
            "logistics",
        ],
    ),
    (
        "customer service",
        &[
            "communication",
            "problem solving",
            "conflict resolution",
            "empathy",
            "customer support",
        ],
    ),
    (
        "retail",
        &[
            "customer support",
            "inventory management",
            "cash handling",
            "teamwork",
        ],
    ),
    (
        "nursing",
        &[
            "attention to detail",
            "crisis management",
            "empathy",
            "documentation",
            "teamwork",
        ],
    ),
    (
        "hospitality",
        &[
            "customer support",
            "multitasking",
            "conflict resolution",
            "teamwork",
        ],
    ),
    (
        "coaching",
        &["mentoring", "leadership", "motivation", "feedback", "training"],
    ),
    (
        "event planning",
        &[
            "project management",
            "budgeting",
            "vendor management",
            "organization",
        ],
    ),
    (
        "journalism",
        &[
            "writing",
            "research",
            "interviewing",
            "editing",
            "storytelling",
        ],
    ),
    (
        "research",
        &[
            "analysis",
            "critical thinking",
            "data analysis",
            "technical writing",
        ],
    ),
    (
        "tutoring",
        &["mentoring", "communication", "patience", "explaining complex concepts"],
    ),
];

const SKILL_INFERENCES: &[(&str, &[&str])] = &[
    ("react", &["javascript", "html", "css", "jsx", "frontend development"]),
    ("angular", &["typescript", "javascript", "html", "css", "frontend development"]),
    ("vue", &["javascript", "html", "css", "frontend development"]),
    ("next.js", &["react", "javascript", "server-side rendering"]),
    ("node.js", &["javascript", "backend development"]),
    ("express", &["node.js", "javascript", "rest api"]),
    ("typescript", &["javascript"]),
    ("django", &["python", "web development", "orm"]),
    ("flask", &["python", "web development", "rest api"]),
    ("fastapi", &["python", "rest api", "backend development"]),
    ("pandas", &["python", "data analysis"]),
    ("tensorflow", &["python", "machine learning", "deep learning"]),
    ("pytorch", &["python", "machine learning", "deep learning"]),
    ("spring", &["java", "backend development"]),
    ("spring boot", &["java", "backend development", "microservices"]),
    ("rails", &["ruby", "web development"]),
    ("laravel", &["php", "web development"]),
    ("actix", &["rust", "backend development"]),
    ("axum", &["rust", "backend development"]),
    ("tokio", &["rust", "async programming"]),
    ("docker", &["containerization", "devops"]),
    ("kubernetes", &["containerization", "container orchestration", "devops"]),
    ("terraform", &["infrastructure as code", "devops"]),
    ("ansible", &["configuration management", "devops"]),
    ("jenkins", &["ci/cd", "devops"]),
    ("github actions", &["ci/cd", "devops"]),
    ("aws", &["cloud computing", "cloud infrastructure"]),
    ("gcp", &["cloud computing", "cloud infrastructure"]),
    ("azure", &["cloud computing", "cloud infrastructure"]),
    ("postgresql", &["sql", "database", "relational database"]),
    ("mysql", &["sql", "database", "relational database"]),
    ("sqlite", &["sql", "database"]),
    ("mongodb", &["nosql", "database"]),
    ("redis", &["caching", "nosql", "database"]),
    ("graphql", &["api design"]),
    ("kafka", &["event streaming", "distributed systems"]),
    ("spark", &["big data", "distributed computing"]),
    ("git", &["version control"]),
];

const SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "ecmascript"]),
    ("typescript", &["ts"]),
    ("python", &["py"]),
    ("golang", &["go"]),
    ("kubernetes", &["k8s"]),
    ("postgresql", &["postgres", "psql"]),
    ("node.js", &["nodejs", "node"]),
    ("react", &["reactjs", "react.js"]),
    ("vue", &["vuejs", "vue.js"]),
    ("next.js", &["nextjs"]),
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai"]),
    ("ci/cd", &["continuous integration", "continuous delivery", "cicd"]),
    ("c#", &["csharp", "c sharp"]),
    ("c++", &["cpp"]),
    ("mongodb", &["mongo"]),
    ("user experience", &["ux"]),
    ("user interface", &["ui"]),
    ("project management", &["program management"]),
];

fn table_from(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

/// Lower-cases keys and values and drops blank entries, so lookups can assume
/// normalized input.
fn normalize_table(table: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    table
        .into_iter()
        .filter_map(|(key, values)| {
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                return None;
            }
            let values: Vec<String> = values
                .into_iter()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect();
            Some((key, values))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub transferable: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub inferences: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self::new(
            table_from(TRANSFERABLE_SKILLS),
            table_from(SKILL_INFERENCES),
            table_from(SKILL_SYNONYMS),
        )
    }

    pub fn new(
        transferable: BTreeMap<String, Vec<String>>,
        inferences: BTreeMap<String, Vec<String>>,
        synonyms: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            transferable: normalize_table(transferable),
            inferences: normalize_table(inferences),
            synonyms: normalize_table(synonyms),
        }
    }

    /// An empty knowledge base: only direct and semantic matching can succeed.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new(), BTreeMap::new(), BTreeMap::new())
    }

    /// Loads tables from a JSON file of shape
    /// `{"transferable": {..}, "inferences": {..}, "synonyms": {..}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base '{}'", path.display()))?;
        let parsed: KnowledgeBase = serde_json::from_str(&raw)
            .with_context(|| format!("Knowledge base '{}' is not valid JSON", path.display()))?;
        let kb = Self::new(parsed.transferable, parsed.inferences, parsed.synonyms);
        info!(
            "Loaded knowledge base from {}: {} transferable, {} inference, {} synonym entries",
            path.display(),
            kb.transferable.len(),
            kb.inferences.len(),
            kb.synonyms.len()
        );
        Ok(kb)
    }

    /// Target skills a domain skill substitutes for. `skill` must be lower-cased.
    pub fn transferable_targets(&self, skill: &str) -> Option<&[String]> {
        self.transferable.get(skill).map(Vec::as_slice)
    }

    /// Skills implied by a tool or framework. `skill` must be lower-cased.
    pub fn implied_skills(&self, skill: &str) -> Option<&[String]> {
        self.inferences.get(skill).map(Vec::as_slice)
    }

    /// All known equivalent spellings of `term`, excluding `term` itself.
    /// Searches canonical keys and their synonym lists in both directions.
    pub fn synonyms_of(&self, term: &str) -> Vec<String> {
        let term = term.trim().to_lowercase();
        let mut out: Vec<String> = Vec::new();
        let mut push = |candidate: &str| {
            if candidate != term && !out.iter().any(|o| o == candidate) {
                out.push(candidate.to_string());
            }
        };

        if let Some(values) = self.synonyms.get(&term) {
            for v in values {
                push(v);
            }
        }
        for (canonical, values) in &self.synonyms {
            if values.iter().any(|v| *v == term) {
                push(canonical);
                for v in values {
                    push(v);
                }
            }
        }
        out
    }
}
