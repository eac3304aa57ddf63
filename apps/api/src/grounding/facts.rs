//! Fact Extractor — parses one achievement into the verifiable `FactSet` that
//! every AI rewrite of it is audited against.
//!
//! Total function: a pattern that does not occur just leaves its facet empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Achievement, Metric};

/// Verifiable content of one bullet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FactSet {
    pub metrics: Vec<String>,
    pub technologies: Vec<String>,
    pub key_facts: Vec<String>,
}

impl FactSet {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.technologies.is_empty() && self.key_facts.is_empty()
    }
}

static PERCENTAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?%").expect("valid percentage regex"));

static CURRENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[$€£]\s?\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:thousand|million|billion|k|m|b)\b)?")
        .expect("valid currency regex")
});

/// "500K users", "1.2M requests", "10k+ records"
static SCALED_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?[KkMmBb]\+?\s+[A-Za-z]+").expect("valid scaled count regex")
});

static NUMERIC_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?\s?(?:-|–|to)\s?\d+(?:\.\d+)?%?").expect("valid range regex")
});

/// "50+ clients"
static PLUS_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+\+\s*[A-Za-z]+").expect("valid plus count regex"));

static MULTIPLIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?x\b").expect("valid multiplier regex"));

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s+(?:seconds?|minutes?|hours?|days?|weeks?|months?|quarters?|years?)\b",
    )
    .expect("valid duration regex")
});

/// "reduced p99 latency by 40%"
static CHANGE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:reduced|increased|improved|decreased|cut|grew|boosted|lowered|raised|accelerated)\b[^.;]{0,60}?\bby\s+\d+(?:\.\d+)?%",
    )
    .expect("valid change phrase regex")
});

/// Leading verbs accepted as the bullet's action.
const ACTION_VERBS: &[&str] = &[
    "accelerated", "achieved", "analyzed", "architected", "automated", "built", "championed",
    "coached", "collaborated", "conducted", "configured", "coordinated", "created", "cut",
    "decreased", "delivered", "deployed", "designed", "developed", "directed", "drove",
    "eliminated", "enabled", "engineered", "established", "expanded", "facilitated", "founded",
    "generated", "grew", "guided", "implemented", "improved", "increased", "integrated",
    "introduced", "launched", "led", "maintained", "managed", "mentored", "migrated",
    "modernized", "negotiated", "optimized", "organized", "oversaw", "pioneered", "planned",
    "produced", "published", "raised", "redesigned", "reduced", "refactored", "resolved",
    "restructured", "saved", "scaled", "secured", "shipped", "simplified", "spearheaded",
    "streamlined", "supervised", "taught", "tested", "trained", "transformed", "wrote",
];

fn push_unique(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !out.iter().any(|v| v == value) {
        out.push(value.to_string());
    }
}

fn preceded_by_currency(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .map(|c| matches!(c, '$' | '€' | '£'))
        .unwrap_or(false)
}

/// Every metric-like span in `text`, in pattern order, de-duplicated.
pub fn extract_text_metrics(text: &str) -> Vec<String> {
    let mut metrics = Vec::new();

    for pattern in [&*PERCENTAGE, &*CURRENCY] {
        for m in pattern.find_iter(text) {
            push_unique(&mut metrics, m.as_str());
        }
    }
    for m in SCALED_COUNT.find_iter(text) {
        // "$2M in revenue" is already captured as currency.
        if !preceded_by_currency(text, m.start()) {
            push_unique(&mut metrics, m.as_str());
        }
    }
    for pattern in [&*NUMERIC_RANGE, &*PLUS_COUNT, &*MULTIPLIER, &*DURATION] {
        for m in pattern.find_iter(text) {
            push_unique(&mut metrics, m.as_str());
        }
    }

    metrics
}

/// Formats an explicit metric the way it would read in a bullet.
pub fn format_metric(metric: &Metric) -> String {
    let value = if metric.value.fract() == 0.0 && metric.value.abs() < 1e15 {
        format!("{}", metric.value as i64)
    } else {
        format!("{}", metric.value)
    };
    match metric.unit.trim() {
        "" => value,
        "%" => format!("{value}%"),
        "x" | "X" => format!("{value}x"),
        "$" => format!("${value}"),
        unit => format!("{value} {unit}"),
    }
}

/// The bullet's leading word, if it is an accepted action verb.
fn leading_action_verb(bullet: &str) -> Option<&str> {
    let first = bullet
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric());
    let lower = first.to_lowercase();
    ACTION_VERBS.contains(&lower.as_str()).then_some(first)
}

/// Builds the `FactSet` for one achievement.
///
/// - metrics: regex hits in the bullet, then explicit `metrics[]` values
/// - technologies: the achievement's `keywords`
/// - key_facts: leading action verb, change phrases, `action`/`object`/`result`,
///   explicit metric contexts
pub fn extract_facts(achievement: &Achievement) -> FactSet {
    let bullet = achievement.bullet.as_str();

    let mut metrics = extract_text_metrics(bullet);
    for metric in &achievement.metrics {
        push_unique(&mut metrics, &format_metric(metric));
    }

    let mut technologies = Vec::new();
    for keyword in &achievement.keywords {
        push_unique(&mut technologies, keyword);
    }

    let mut key_facts = Vec::new();
    if let Some(verb) = leading_action_verb(bullet) {
        push_unique(&mut key_facts, verb);
    }
    for m in CHANGE_PHRASE.find_iter(bullet) {
        push_unique(&mut key_facts, m.as_str());
    }
    push_unique(&mut key_facts, &achievement.action);
    push_unique(&mut key_facts, &achievement.object);
    if let Some(result) = &achievement.result {
        push_unique(&mut key_facts, result);
    }
    for metric in &achievement.metrics {
        if let Some(context) = &metric.context {
            push_unique(&mut key_facts, context);
        }
    }

    FactSet {
        metrics,
        technologies,
        key_facts,
    }
}
