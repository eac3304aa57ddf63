//! The four matching strategies, strongest first: direct → semantic →
//! transferable → inferred. Each returns a `Match` only when the Evidence
//! Locator finds at least one achievement for the skill it matched on.

use std::collections::BTreeSet;

use crate::matching::cascade::{Match, MatchType};
use crate::matching::corpus::SkillCorpus;
use crate::matching::evidence::find_evidence;
use crate::matching::knowledge::KnowledgeBase;
use crate::matching::thresholds::MatchingConfig;
use crate::models::{ExtractedKeyword, UserProfile};

/// Everything a strategy reads. Built once per `match_user_to_job` call.
pub struct MatchContext<'a> {
    pub profile: &'a UserProfile,
    pub corpus: &'a SkillCorpus,
    pub knowledge: &'a KnowledgeBase,
    pub config: &'a MatchingConfig,
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits on `.`, `-`, `_`, `/` and whitespace; drops tokens of `min_len` chars or fewer.
pub fn tokenize(text: &str, min_len: usize) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '.' | '-' | '_' | '/'))
        .filter(|t| t.chars().count() > min_len)
        .map(str::to_string)
        .collect()
}

/// `|A ∩ B| / |A ∪ B|`; 0.0 when both sets are empty.
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Equality or containment in either direction. Blank strings never relate.
fn phrases_related(requirement: &str, target: &str) -> bool {
    if requirement.is_empty() || target.is_empty() {
        return false;
    }
    requirement == target || requirement.contains(target) || target.contains(requirement)
}

/// Direct: the requirement itself, a knowledge-base synonym, one of the
/// requirement's own synonyms, or a skill the candidate lists it as an alias of
/// is in the corpus and has evidence.
pub fn try_direct(ctx: &MatchContext<'_>, keyword: &ExtractedKeyword) -> Option<Match> {
    let phrase = normalize(&keyword.phrase);

    if ctx.corpus.contains(&phrase) {
        let evidence = find_evidence(ctx.profile, &phrase);
        if let Some(m) = Match::new(
            keyword.clone(),
            evidence,
            MatchType::Direct,
            ctx.config.exact_confidence,
            &phrase,
            format!("Exact match on skill '{phrase}'"),
            ctx.config,
        ) {
            return Some(m);
        }
    }

    let mut synonyms = ctx.knowledge.synonyms_of(&phrase);
    for own in &keyword.synonyms {
        let own = normalize(own);
        if !own.is_empty() && own != phrase && !synonyms.contains(&own) {
            synonyms.push(own);
        }
    }

    let by_synonym = synonyms
        .iter()
        .filter(|syn| ctx.corpus.contains(syn))
        .find_map(|syn| {
            Match::new(
                keyword.clone(),
                find_evidence(ctx.profile, syn),
                MatchType::Direct,
                ctx.config.synonym_confidence,
                syn,
                format!("'{syn}' is a synonym of '{phrase}'"),
                ctx.config,
            )
        });
    if by_synonym.is_some() {
        return by_synonym;
    }

    // The candidate's own aliases for a listed skill, e.g. "Postgres" on "PostgreSQL".
    ctx.profile
        .skills
        .iter()
        .filter(|skill| skill.synonyms.iter().any(|s| normalize(s) == phrase))
        .find_map(|skill| {
            let name = normalize(&skill.name);
            if name.is_empty() || name == phrase {
                return None;
            }
            Match::new(
                keyword.clone(),
                find_evidence(ctx.profile, &name),
                MatchType::Direct,
                ctx.config.synonym_confidence,
                &name,
                format!("'{phrase}' is listed as an alias of '{name}'"),
                ctx.config,
            )
        })
}

/// Semantic: best Jaccard token overlap at or above the threshold. Only the single
/// best corpus skill is considered; if it lacks evidence the strategy fails.
pub fn try_semantic(ctx: &MatchContext<'_>, keyword: &ExtractedKeyword) -> Option<Match> {
    let min_len = ctx.config.min_token_len;
    let requirement_tokens = tokenize(&keyword.phrase, min_len);
    if requirement_tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&str, f64)> = None;
    for skill in ctx.corpus.iter() {
        let similarity = jaccard_similarity(&requirement_tokens, &tokenize(skill, min_len));
        if similarity < ctx.config.semantic_threshold {
            continue;
        }
        // Strictly greater keeps the earliest corpus skill on ties.
        if best.map_or(true, |(_, s)| similarity > s) {
            best = Some((skill, similarity));
        }
    }

    let (skill, similarity) = best?;
    Match::new(
        keyword.clone(),
        find_evidence(ctx.profile, skill),
        MatchType::Semantic,
        ctx.config.semantic_confidence(similarity),
        skill,
        format!(
            "'{skill}' overlaps '{}' (similarity {:.2})",
            normalize(&keyword.phrase),
            similarity
        ),
        ctx.config,
    )
}

/// Transferable: a non-technical corpus skill maps onto the requirement.
/// Evidence is located for the source skill, not the requirement.
pub fn try_transferable(ctx: &MatchContext<'_>, keyword: &ExtractedKeyword) -> Option<Match> {
    let phrase = normalize(&keyword.phrase);

    ctx.corpus.iter().find_map(|skill| {
        let targets = ctx.knowledge.transferable_targets(skill)?;
        let target = targets.iter().find(|t| phrases_related(&phrase, t))?;
        Match::new(
            keyword.clone(),
            find_evidence(ctx.profile, skill),
            MatchType::Transferable,
            ctx.config.transferable_confidence,
            skill,
            format!("'{skill}' experience transfers to '{target}'"),
            ctx.config,
        )
    })
}

/// Inferred: a corpus tool or framework implies the requirement.
/// Evidence is located for the implying skill.
pub fn try_inferred(ctx: &MatchContext<'_>, keyword: &ExtractedKeyword) -> Option<Match> {
    let phrase = normalize(&keyword.phrase);

    ctx.corpus.iter().find_map(|skill| {
        let implied = ctx.knowledge.implied_skills(skill)?;
        let target = implied.iter().find(|t| phrases_related(&phrase, t))?;
        Match::new(
            keyword.clone(),
            find_evidence(ctx.profile, skill),
            MatchType::Inferred,
            ctx.config.inferred_confidence,
            skill,
            format!("'{skill}' implies working knowledge of '{target}'"),
            ctx.config,
        )
    })
}
