// Prompt constants for the bullet rewrite collaborator.
// The model sees only verified facts; the verifier audits whatever comes back.

/// System prompt for single-bullet rewrites. Output is the bullet text only.
pub const REWRITE_SYSTEM: &str = "You are an expert resume editor. \
    You rewrite one resume bullet at a time so it reads well for a target role. \
    Respond with the rewritten bullet text only: one line, no quotes, \
    no leading dash or bullet character, no commentary.";

/// Rewrite prompt template. Replace `{bullet}`, `{metrics}`, `{key_facts}`,
/// `{technologies}`, `{target_role}` and `{keywords}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following resume bullet for the target role.

ORIGINAL BULLET:
{bullet}

VERIFIED METRICS (each must appear verbatim in your rewrite):
{metrics}

VERIFIED FACTS:
{key_facts}

TECHNOLOGIES USED:
{technologies}

TARGET ROLE: {target_role}
KEYWORDS TO EMPHASIZE WHERE TRUTHFUL: {keywords}

Rules:
- Keep every verified metric exactly as written, including its unit.
- Do NOT add any number, percentage, currency amount, team size or duration that is not listed above.
- Do NOT claim leadership, ownership or scope the original bullet does not state.
- Only mention a keyword if the original bullet or its technologies support it.
- Start with a strong past-tense action verb.
- Keep it under 30 words."#;

fn bulleted(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items
            .iter()
            .map(|i| format!("- {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fills `REWRITE_PROMPT_TEMPLATE`.
pub fn build_rewrite_prompt(
    bullet: &str,
    metrics: &[String],
    key_facts: &[String],
    technologies: &[String],
    target_role: Option<&str>,
    keywords: &[String],
) -> String {
    let keywords = if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.join(", ")
    };
    REWRITE_PROMPT_TEMPLATE
        .replace("{bullet}", bullet)
        .replace("{metrics}", &bulleted(metrics))
        .replace("{key_facts}", &bulleted(key_facts))
        .replace("{technologies}", &bulleted(technologies))
        .replace("{target_role}", target_role.unwrap_or("(unspecified)"))
        .replace("{keywords}", &keywords)
}
