//! Skill Matcher: synonym-aware keyword overlap between two skill lists.
//!
//! Each job skill earns credit against the whole candidate list:
//! 1. direct: case-insensitive substring containment in either direction → 1.0
//! 2. synonym: both sides mention members of the same related-concept group → 1.0
//! 3. partial: a multi-word job skill with at least half its words present in
//!    some candidate skill → 0.5
//!
//! score = Σ credit / |job skills|, clamped to [0, 1]. Only the numeric signal
//! comes from here; matching/missing lists shown to users come from the judge.

use std::collections::HashSet;

use serde::Serialize;

use super::is_stop_word;

/// Returned when either list is empty.
pub const NEUTRAL_OVERLAP: f64 = 0.5;
pub const PARTIAL_CREDIT: f64 = 0.5;

/// Related-concept groups. Every term in a group is interchangeable for matching.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["python", "py", "python programming", "python3"],
    &[
        "machine learning",
        "ml",
        "ai",
        "artificial intelligence",
        "predictive modeling",
        "deep learning",
    ],
    &["databases", "database", "sql", "mysql", "postgres", "postgresql", "nosql", "mongodb"],
    &["cloud", "aws", "azure", "gcp", "google cloud"],
    &["visualization", "data visualization", "tableau", "power bi", "looker", "matplotlib"],
    &["devops", "ci/cd", "docker", "kubernetes", "jenkins", "github actions"],
    &["communication", "written communication", "verbal communication", "presentation", "public speaking"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    Direct,
    Synonym,
    Partial,
    None,
}

impl MatchKind {
    pub fn credit(self) -> f64 {
        match self {
            MatchKind::Direct | MatchKind::Synonym => 1.0,
            MatchKind::Partial => PARTIAL_CREDIT,
            MatchKind::None => 0.0,
        }
    }
}

/// Credit earned by one job skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCredit {
    pub job_skill: String,
    pub kind: MatchKind,
}

/// Overlap score in [0, 1]; `NEUTRAL_OVERLAP` when either list is empty.
pub fn keyword_overlap(candidate: &[String], job: &[String]) -> f64 {
    let breakdown = overlap_breakdown(candidate, job);
    if breakdown.is_empty() || normalized(candidate).is_empty() {
        return NEUTRAL_OVERLAP;
    }
    let earned: f64 = breakdown.iter().map(|c| c.kind.credit()).sum();
    (earned / breakdown.len() as f64).clamp(0.0, 1.0)
}

/// Per-job-skill credit, in job-list order. Blank entries are ignored.
pub fn overlap_breakdown(candidate: &[String], job: &[String]) -> Vec<SkillCredit> {
    let candidate = normalized(candidate);
    normalized(job)
        .into_iter()
        .map(|job_skill| {
            let kind = classify(&job_skill, &candidate);
            SkillCredit { job_skill, kind }
        })
        .collect()
}

fn classify(job_skill: &str, candidate: &[String]) -> MatchKind {
    if candidate.is_empty() {
        return MatchKind::None;
    }
    if candidate
        .iter()
        .any(|c| c.contains(job_skill) || job_skill.contains(c.as_str()))
    {
        return MatchKind::Direct;
    }
    if synonym_match(job_skill, candidate) {
        return MatchKind::Synonym;
    }
    if partial_match(job_skill, candidate) {
        return MatchKind::Partial;
    }
    MatchKind::None
}

fn synonym_match(job_skill: &str, candidate: &[String]) -> bool {
    SYNONYM_GROUPS.iter().any(|group| {
        mentions_group(job_skill, group) && candidate.iter().any(|c| mentions_group(c, group))
    })
}

/// Whole-word (or whole-phrase) mention of any group term, so "aws" never matches "lawsuit".
fn mentions_group(skill: &str, group: &[&str]) -> bool {
    let padded = format!(" {} ", words(skill).join(" "));
    group.iter().any(|term| {
        let term = words(term).join(" ");
        !term.is_empty() && padded.contains(&format!(" {term} "))
    })
}

fn partial_match(job_skill: &str, candidate: &[String]) -> bool {
    let job_words: Vec<String> = words(job_skill)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect();
    if job_words.len() < 2 {
        return false;
    }
    let needed = job_words.len().div_ceil(2);
    candidate.iter().any(|c| {
        let candidate_words: HashSet<String> = words(c).into_iter().collect();
        job_words
            .iter()
            .filter(|w| candidate_words.contains(w.as_str()))
            .count()
            >= needed
    })
}

/// Lowercase words, splitting on anything that is not alphanumeric, `+`, `#` or `/`.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '/')))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn normalized(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
