// Shared prompt constants.
// Each stage that calls the provider defines its own prompts.rs alongside it;
// this file holds the fragments they have in common.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Honesty rule appended to every prompt that rewrites candidate content.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Only include truthful information present in the original resume. \
    Do NOT fabricate experience, skills, employers, dates, or qualifications. \
    You may reframe, reorder, and rephrase existing content; you may not invent it.";

/// Builds a system prompt from a role description plus the JSON-only rule.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").unwrap())
}

/// Fills `{name}` placeholders in one pass over `template`.
///
/// Inserted values are never rescanned, so a value containing `{resume}` stays
/// literal. Placeholders with no entry in `values` are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}
