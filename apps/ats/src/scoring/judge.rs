//! Match Judge: holistic LLM comparison of candidate and job profiles.
//!
//! Parsing runs the shared JSON chain (`strict` → `fenced-block` → `brace-scan`)
//! and then `field-regex`, which pulls `score`, `matching_skills`,
//! `missing_skills` and `recommendation` out of the text one by one. When every
//! tier fails the verdict is `MatchVerdict::fallback()`.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::{info, warn};

use crate::llm_client::json_recovery::ParserChain;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::profile::{DEFAULT_VERDICT_SCORE, MISSING_RECOMMENDATION};
use crate::models::{clamp_score, clean_list, MatchVerdict, Parsed, SkillProfile};
use crate::scoring::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_ROLE};

pub const JUDGE_TEMPERATURE: f32 = 0.1;

/// Where a verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictOrigin {
    /// Name of the parser strategy that succeeded.
    Recovered(&'static str),
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Judgement {
    pub verdict: MatchVerdict,
    pub origin: VerdictOrigin,
}

impl Judgement {
    pub fn fallback() -> Self {
        Self {
            verdict: MatchVerdict::fallback(),
            origin: VerdictOrigin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == VerdictOrigin::Fallback
    }
}

pub fn build_prompt(candidate: &Parsed<SkillProfile>, job: &Parsed<SkillProfile>) -> String {
    fill_template(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("candidate_profile", &candidate.to_prompt_text()),
            ("job_profile", &job.to_prompt_text()),
        ],
    )
}

/// One judging call. Provider failures are returned; parse failures never are.
pub async fn judge(
    candidate: &Parsed<SkillProfile>,
    job: &Parsed<SkillProfile>,
    llm: &dyn TextGenerator,
    model: &str,
) -> Result<Judgement, LlmError> {
    let system = json_system(MATCH_ROLE);
    let prompt = build_prompt(candidate, job);
    let raw = llm
        .generate(&system, &prompt, model, JUDGE_TEMPERATURE)
        .await?;
    Ok(parse_verdict(&raw))
}

pub fn parse_verdict(raw: &str) -> Judgement {
    let chain = ParserChain::<MatchVerdict>::json_object().then("field-regex", field_regex);
    match chain.parse(raw) {
        Some(recovered) => {
            info!(
                "Judge verdict: score={}, matching={}, missing={} (via {})",
                recovered.value.score,
                recovered.value.matching_skills.len(),
                recovered.value.missing_skills.len(),
                recovered.strategy
            );
            Judgement {
                verdict: recovered.value,
                origin: VerdictOrigin::Recovered(recovered.strategy),
            }
        }
        None => {
            warn!(
                "Judge response unparseable by {:?}; using default verdict",
                chain.names()
            );
            Judgement::fallback()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// field-regex tier
// ────────────────────────────────────────────────────────────────────────────

struct FieldPatterns {
    score: Regex,
    matching: Regex,
    missing: Regex,
    recommendation: Regex,
    quoted_item: Regex,
}

/// A double- or single-quoted string; the other quote character may appear inside.
const QUOTED: &str = r#"(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#;

static FIELD_PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

fn field_patterns() -> &'static FieldPatterns {
    FIELD_PATTERNS.get_or_init(|| FieldPatterns {
        score: Regex::new(r#"(?i)["']?score["']?\s*:\s*(\d+(?:\.\d+)?)"#).unwrap(),
        matching: Regex::new(r#"(?is)["']?matching_skills["']?\s*:\s*\[(.*?)\]"#).unwrap(),
        missing: Regex::new(r#"(?is)["']?missing_skills["']?\s*:\s*\[(.*?)\]"#).unwrap(),
        recommendation: Regex::new(&format!(
            r#"(?i)["']?recommendation["']?\s*:\s*{QUOTED}"#
        ))
        .unwrap(),
        quoted_item: Regex::new(QUOTED).unwrap(),
    })
}

/// Independent extraction of each verdict field. Succeeds if any of `score`,
/// `matching_skills` or `missing_skills` is found.
fn field_regex(raw: &str) -> Option<MatchVerdict> {
    let patterns = field_patterns();

    let score = patterns
        .score
        .captures(raw)
        .and_then(|c| c[1].parse::<f64>().ok())
        .map(clamp_score);
    let matching = list_field(&patterns.matching, raw);
    let missing = list_field(&patterns.missing, raw);

    if score.is_none() && matching.is_none() && missing.is_none() {
        return None;
    }

    let recommendation = patterns
        .recommendation
        .captures(raw)
        .map(|c| quoted_text(&c).trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| MISSING_RECOMMENDATION.to_string());

    Some(MatchVerdict {
        score: score.unwrap_or(DEFAULT_VERDICT_SCORE),
        matching_skills: matching.unwrap_or_default(),
        missing_skills: missing.unwrap_or_default(),
        recommendation,
        rationale: None,
    })
}

fn list_field(pattern: &Regex, raw: &str) -> Option<Vec<String>> {
    let body = pattern.captures(raw)?.get(1)?.as_str();
    let items = field_patterns()
        .quoted_item
        .captures_iter(body)
        .map(|c| quoted_text(&c))
        .collect();
    Some(clean_list(items))
}

/// Body of a `QUOTED` match with escaped quotes restored.
fn quoted_text(caps: &Captures) -> String {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
        .replace("\\\"", "\"")
        .replace("\\'", "'")
}
