//! Hallucination Verifier — audits AI-rewritten text against verified source facts.
//!
//! Bullet level: every original metric must survive verbatim (case-insensitive)
//! and the rewrite may not introduce metrics the original never had. A failed
//! bullet obligates the caller to reuse the original text unmodified.
//!
//! Letter level: flags new claims the profile cannot back up. Leadership language
//! needs corroboration, team sizes must appear in the profile, and every metric
//! needs a matching value+unit pair. Each finding costs a fixed penalty from a
//! starting confidence of 1.0, floored at 0.
//!
//! Never fails: findings are data, not errors.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::grounding::facts::{extract_text_metrics, FactSet};
use crate::matching::corpus::build_skill_corpus;
use crate::models::{Metric, UserProfile};

pub const LEADERSHIP_PENALTY: f64 = 0.25;
pub const TEAM_SIZE_PENALTY: f64 = 0.25;
pub const METRIC_PENALTY: f64 = 0.2;
pub const METRIC_TOLERANCE: f64 = 0.1;

/// Corpus skills that corroborate leadership language.
const LEADERSHIP_SKILLS: &[&str] = &[
    "leadership",
    "team leadership",
    "people management",
    "team management",
    "management",
    "team lead",
    "engineering management",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub leadership_penalty: f64,
    pub team_size_penalty: f64,
    pub metric_penalty: f64,
    pub metric_tolerance: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            leadership_penalty: LEADERSHIP_PENALTY,
            team_size_penalty: TEAM_SIZE_PENALTY,
            metric_penalty: METRIC_PENALTY,
            metric_tolerance: METRIC_TOLERANCE,
        }
    }
}

/// Audit outcome for one rewrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationResult {
    pub all_facts_preserved: bool,
    pub added_facts: Vec<String>,
    #[serde(default)]
    pub missing_facts: Vec<String>,
    pub confidence: f64,
}

static LEADERSHIP_CLAIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:led|lead|leading|managed|managing|supervised|supervising|directed|headed)\s+(?:(?:a|an|the|my|our)\s+)?(?:[\w-]+\s+){0,2}?(?:team|teams|group|squad|department|engineers|developers|staff|reports)\b|\bteam\s+lead(?:er)?\b|\bpeople\s+manag(?:er|ement)\b",
    )
    .expect("valid leadership regex")
});

/// "team of 8", "8-person team", "8 member team"
static TEAM_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bteam\s+of\s+(\d+)\b|\b(\d+)[-\s](?:person|member|people)\s+team\b")
        .expect("valid team size regex")
});

static UNIT_METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([$€£])?\b(\d+(?:,\d{3})*(?:\.\d+)?)\s?(%|percent\b|x\b|k\b|m\b|b\b)?")
        .expect("valid unit metric regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Bullet level
// ────────────────────────────────────────────────────────────────────────────

/// Verifies one rewritten bullet with default penalties.
pub fn verify(original: &FactSet, rewritten_text: &str) -> VerificationResult {
    verify_with(original, rewritten_text, &VerificationConfig::default())
}

pub fn verify_with(
    original: &FactSet,
    rewritten_text: &str,
    config: &VerificationConfig,
) -> VerificationResult {
    let rewritten_lower = rewritten_text.to_lowercase();

    let missing_facts: Vec<String> = original
        .metrics
        .iter()
        .filter(|m| !contains_metric(&rewritten_lower, &m.to_lowercase()))
        .cloned()
        .collect();

    // Whole metrics only: "5%" is not known just because "15%" is.
    let known: BTreeSet<String> = original
        .metrics
        .iter()
        .cloned()
        .chain(original.key_facts.iter().flat_map(|k| extract_text_metrics(k)))
        .map(|m| m.to_lowercase())
        .collect();
    let added_facts: Vec<String> = extract_text_metrics(rewritten_text)
        .into_iter()
        .filter(|m| !known.contains(&m.to_lowercase()))
        .collect();

    let total = original.metrics.len();
    let preserved_ratio = if total == 0 {
        1.0
    } else {
        (total - missing_facts.len()) as f64 / total as f64
    };
    let confidence =
        (preserved_ratio - config.metric_penalty * added_facts.len() as f64).max(0.0);

    VerificationResult {
        all_facts_preserved: missing_facts.is_empty() && added_facts.is_empty(),
        added_facts,
        missing_facts,
        confidence,
    }
}

/// True when `metric` occurs in `text` as a whole number, not as the tail or
/// head of a longer one ("5%" does not occur in "15%", "$5" not in "$50,000").
fn contains_metric(text: &str, metric: &str) -> bool {
    if metric.is_empty() {
        return false;
    }
    text.match_indices(metric).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let mut after = text[start + metric.len()..].chars();
        let starts_numeric = metric.starts_with(|c: char| c.is_ascii_digit());
        let ends_numeric = metric.ends_with(|c: char| c.is_ascii_digit());

        let joined_before =
            starts_numeric && matches!(before, Some(c) if c.is_ascii_digit() || c == '.');
        let joined_after = ends_numeric
            && match after.next() {
                Some(c) if c.is_ascii_digit() => true,
                Some(',') | Some('.') => after.next().is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
        !joined_before && !joined_after
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Letter level
// ────────────────────────────────────────────────────────────────────────────

/// A number with a recognized unit, normalized: scale suffixes are applied to the
/// value, currencies collapse to "$", bare counts have an empty unit.
#[derive(Debug, Clone, PartialEq)]
struct UnitValue {
    value: f64,
    unit: String,
}

fn scale_for(suffix: &str) -> Option<f64> {
    match suffix {
        "k" | "thousand" => Some(1e3),
        "m" | "million" => Some(1e6),
        "b" | "billion" => Some(1e9),
        _ => None,
    }
}

fn normalize_metric(metric: &Metric) -> UnitValue {
    let unit = metric.unit.trim().to_lowercase();
    let (value, unit) = match unit.as_str() {
        "%" | "percent" => (metric.value, "%"),
        "x" | "times" => (metric.value, "x"),
        "$" | "€" | "£" | "usd" | "eur" | "gbp" | "dollars" => (metric.value, "$"),
        other => match scale_for(other) {
            Some(scale) => (metric.value * scale, ""),
            None => (metric.value, ""),
        },
    };
    UnitValue {
        value,
        unit: unit.to_string(),
    }
}

/// Scans `text` for numbers carrying a unit. Returns the matched span and its
/// normalized value; unit-less numbers (years, bare counts) are skipped.
fn scan_unit_metrics(text: &str) -> Vec<(String, UnitValue)> {
    UNIT_METRIC
        .captures_iter(text)
        .filter_map(|caps| {
            let currency = caps.get(1).is_some();
            let suffix = caps.get(3).map(|m| m.as_str().to_lowercase());
            if !currency && suffix.is_none() {
                return None;
            }
            let raw = caps.get(2)?.as_str().replace(',', "");
            let mut value: f64 = raw.parse().ok()?;
            let mut unit = if currency { "$" } else { "" };
            match suffix.as_deref() {
                Some("%") | Some("percent") => unit = "%",
                Some("x") => unit = "x",
                Some(s) => {
                    if let Some(scale) = scale_for(s) {
                        value *= scale;
                    }
                }
                None => {}
            }
            let span = caps.get(0)?.as_str().trim().to_string();
            Some((
                span,
                UnitValue {
                    value,
                    unit: unit.to_string(),
                },
            ))
        })
        .collect()
}

fn team_sizes(text: &str) -> BTreeSet<u32> {
    TEAM_SIZE
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse().ok())
        })
        .collect()
}

/// All free text the profile records about its achievements.
fn profile_texts(profile: &UserProfile) -> Vec<&str> {
    let mut texts = Vec::new();
    for a in profile.achievements() {
        texts.push(a.bullet.as_str());
        texts.push(a.action.as_str());
        texts.push(a.object.as_str());
        if let Some(result) = &a.result {
            texts.push(result.as_str());
        }
    }
    texts
}

fn has_leadership_evidence(profile: &UserProfile, texts: &[&str]) -> bool {
    let corpus = build_skill_corpus(profile);
    LEADERSHIP_SKILLS.iter().any(|s| corpus.contains(s))
        || texts.iter().any(|t| LEADERSHIP_CLAIM.is_match(t))
}

/// Audits a generated letter (or letter section) for claims the profile cannot
/// support, with default penalties.
pub fn verify_letter(profile: &UserProfile, text: &str) -> VerificationResult {
    verify_letter_with(profile, text, &VerificationConfig::default())
}

pub fn verify_letter_with(
    profile: &UserProfile,
    text: &str,
    config: &VerificationConfig,
) -> VerificationResult {
    let texts = profile_texts(profile);
    let mut added_facts = Vec::new();
    let mut penalty = 0.0;

    if let Some(claim) = LEADERSHIP_CLAIM.find(text) {
        if !has_leadership_evidence(profile, &texts) {
            added_facts.push(format!("unsupported leadership claim: '{}'", claim.as_str()));
            penalty += config.leadership_penalty;
        }
    }

    let profile_sizes: BTreeSet<u32> = texts.iter().flat_map(|t| team_sizes(t)).collect();
    for size in team_sizes(text) {
        if !profile_sizes.contains(&size) {
            added_facts.push(format!("unsupported team size: {size}"));
            penalty += config.team_size_penalty;
        }
    }

    let mut known: Vec<UnitValue> = profile
        .achievements()
        .flat_map(|a| a.metrics.iter().map(normalize_metric))
        .collect();
    for t in &texts {
        known.extend(scan_unit_metrics(t).into_iter().map(|(_, v)| v));
    }

    let mut flagged: BTreeSet<String> = BTreeSet::new();
    for (span, candidate) in scan_unit_metrics(text) {
        let supported = known.iter().any(|k| {
            k.unit == candidate.unit && (k.value - candidate.value).abs() <= config.metric_tolerance
        });
        if !supported && flagged.insert(span.clone()) {
            added_facts.push(format!("unsupported metric: {span}"));
            penalty += config.metric_penalty;
        }
    }

    VerificationResult {
        all_facts_preserved: added_facts.is_empty(),
        added_facts,
        missing_facts: Vec::new(),
        confidence: (1.0 - penalty).max(0.0),
    }
}
