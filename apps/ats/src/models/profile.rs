use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient_string_list, lenient_years, score_from_value, string_list};

pub const DEFAULT_VERDICT_SCORE: u8 = 50;
pub const FALLBACK_RECOMMENDATION: &str = "Error analyzing match. The candidate appears to have relevant skills but a detailed analysis could not be completed.";
pub const MISSING_RECOMMENDATION: &str = "No specific recommendation provided.";

/// Skills and requirements extracted from a resume or a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    #[serde(deserialize_with = "lenient_string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_years")]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub key_requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub domains: Vec<String>,
}

/// The judge's holistic comparison of two profiles.
///
/// Deserializes from any object carrying at least one of `score`,
/// `matching_skills` or `missing_skills`; the rest falls back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VerdictWire")]
pub struct MatchVerdict {
    pub score: u8,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl MatchVerdict {
    /// Verdict used when no parser strategy recovered anything or the provider failed.
    pub fn fallback() -> Self {
        Self {
            score: DEFAULT_VERDICT_SCORE,
            matching_skills: Vec::new(),
            missing_skills: Vec::new(),
            recommendation: FALLBACK_RECOMMENDATION.to_string(),
            rationale: None,
        }
    }
}

#[derive(Deserialize)]
struct VerdictWire {
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    matching_skills: Option<Value>,
    #[serde(default)]
    missing_skills: Option<Value>,
    #[serde(default)]
    recommendation: Option<Value>,
    #[serde(default)]
    rationale: Option<Value>,
}

impl TryFrom<VerdictWire> for MatchVerdict {
    type Error = String;

    fn try_from(wire: VerdictWire) -> Result<Self, Self::Error> {
        let has_signal = [&wire.score, &wire.matching_skills, &wire.missing_skills]
            .iter()
            .any(|field| matches!(field, Some(v) if !v.is_null()));
        if !has_signal {
            return Err("object has no score or skill lists".to_string());
        }

        Ok(Self {
            score: wire
                .score
                .as_ref()
                .and_then(score_from_value)
                .unwrap_or(DEFAULT_VERDICT_SCORE),
            matching_skills: wire.matching_skills.map(string_list).unwrap_or_default(),
            missing_skills: wire.missing_skills.map(string_list).unwrap_or_default(),
            recommendation: non_blank_text(wire.recommendation)
                .unwrap_or_else(|| MISSING_RECOMMENDATION.to_string()),
            rationale: non_blank_text(wire.rationale),
        })
    }
}

fn non_blank_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Public output of `score`. All scores are percentages in [0, 100], two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub llm_score: f64,
    pub semantic_score: f64,
    pub keyword_overlap_score: f64,
    pub final_score: f64,
    pub resume_skills: Vec<String>,
    pub job_requirements: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_requires_skills() {
        let err = serde_json::from_value::<SkillProfile>(json!({"domains": ["fintech"]}));
        assert!(err.is_err());
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let profile: SkillProfile =
            serde_json::from_value(json!({"skills": ["Python", "SQL"]})).unwrap();
        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert_eq!(profile.experience_years, None);
        assert!(profile.key_requirements.is_empty());
        assert!(profile.domains.is_empty());
    }

    #[test]
    fn test_verdict_from_full_object() {
        let verdict: MatchVerdict = serde_json::from_value(json!({
            "score": 78,
            "matching_skills": ["Python", "Docker"],
            "missing_skills": ["AWS"],
            "recommendation": "Strong fit; ramp up on AWS.",
            "rationale": "Core stack overlaps."
        }))
        .unwrap();
        assert_eq!(verdict.score, 78);
        assert_eq!(verdict.missing_skills, vec!["AWS"]);
        assert_eq!(verdict.rationale.as_deref(), Some("Core stack overlaps."));
    }

    #[test]
    fn test_verdict_fills_missing_fields() {
        let verdict: MatchVerdict =
            serde_json::from_value(json!({"matching_skills": ["SQL"]})).unwrap();
        assert_eq!(verdict.score, DEFAULT_VERDICT_SCORE);
        assert!(verdict.missing_skills.is_empty());
        assert_eq!(verdict.recommendation, MISSING_RECOMMENDATION);
    }

    #[test]
    fn test_verdict_rejects_unrelated_object() {
        assert!(serde_json::from_value::<MatchVerdict>(json!({"skills": ["SQL"]})).is_err());
        assert!(serde_json::from_value::<MatchVerdict>(json!({"score": null})).is_err());
    }

    #[test]
    fn test_verdict_score_as_text_is_clamped() {
        let verdict: MatchVerdict = serde_json::from_value(json!({"score": "120"})).unwrap();
        assert_eq!(verdict.score, 100);
    }

    #[test]
    fn test_fallback_verdict() {
        let verdict = MatchVerdict::fallback();
        assert_eq!(verdict.score, 50);
        assert!(verdict.matching_skills.is_empty());
        assert_eq!(verdict.recommendation, FALLBACK_RECOMMENDATION);
    }
}
