pub mod profile;
pub mod resume;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use profile::{MatchResult, MatchVerdict, SkillProfile};
pub use resume::{OptimizedResume, ResumeDraft, SchemaViolation};

/// Outcome of turning a model response into a typed value.
///
/// `ParseFailure` keeps the raw response so downstream stages can still use it
/// as opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Ok(T),
    ParseFailure(String),
}

impl<T> Parsed<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Parsed::Ok(_))
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Parsed::Ok(value) => Some(value),
            Parsed::ParseFailure(_) => None,
        }
    }
}

impl<T: Serialize> Parsed<T> {
    /// JSON for a parsed value, the raw response otherwise.
    pub fn to_prompt_text(&self) -> String {
        match self {
            Parsed::Ok(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
            Parsed::ParseFailure(raw) => raw.clone(),
        }
    }
}

impl Parsed<SkillProfile> {
    /// Skills of a parsed profile; a failed parse has none.
    pub fn skills(&self) -> &[String] {
        match self {
            Parsed::Ok(profile) => &profile.skills,
            Parsed::ParseFailure(_) => &[],
        }
    }
}

/// Trims entries, drops blanks and removes case-insensitive duplicates, keeping first spelling.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a string list that may arrive as `null`, a single string, or an array
/// containing non-string scalars.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(Value::deserialize(deserializer)?))
}

pub(crate) fn string_list(value: Value) -> Vec<String> {
    let items = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    };
    clean_list(items)
}

/// Years of experience as int, float or text such as "5+ years".
pub(crate) fn lenient_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let years = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|y| *y >= 0.0).map(|y| y.round() as u32),
        Value::String(s) => leading_number(&s).map(|y| y.round() as u32),
        _ => None,
    };
    Ok(years)
}

/// A 0–100 score as int, float or numeric text; anything unreadable is `None`.
pub(crate) fn score_from_value(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }?;
    Some(clamp_score(raw))
}

pub(crate) fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let digits: String = text
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}
