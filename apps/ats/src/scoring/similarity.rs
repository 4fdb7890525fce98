//! Text Similarity Engine: TF-IDF cosine similarity between exactly two documents.
//!
//! The vocabulary is rebuilt on every call from the two inputs only:
//! lowercase tokens of two or more word characters, English stop words removed,
//! unigrams plus bigrams, capped at `MAX_FEATURES` terms by total frequency.
//! Weights are raw term counts times the smoothed idf `ln((1 + n) / (1 + df)) + 1`,
//! and each document vector is L2-normalised.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::is_stop_word;

/// Returned when the similarity cannot be computed at all.
pub const NEUTRAL_SIMILARITY: f64 = 0.5;
/// Lower bound applied to every computed similarity.
pub const SIMILARITY_FLOOR: f64 = 0.4;
pub const MAX_FEATURES: usize = 5000;

const DOCUMENT_COUNT: f64 = 2.0;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("empty vocabulary; documents contain only stop words or no words at all")]
    EmptyVocabulary,
}

static TOKEN: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").unwrap())
}

/// Similarity in [`SIMILARITY_FLOOR`, 1.0], or `NEUTRAL_SIMILARITY` when undefined.
pub fn similarity(text_a: &str, text_b: &str) -> f64 {
    match cosine_tfidf(text_a, text_b) {
        Ok(cosine) => {
            let floored = cosine.clamp(0.0, 1.0).max(SIMILARITY_FLOOR);
            debug!("TF-IDF cosine {:.4} (floored {:.4})", cosine, floored);
            floored
        }
        Err(e) => {
            debug!("Similarity undefined ({}); using neutral {}", e, NEUTRAL_SIMILARITY);
            NEUTRAL_SIMILARITY
        }
    }
}

/// Raw cosine similarity of the two TF-IDF vectors, without floor.
pub fn cosine_tfidf(text_a: &str, text_b: &str) -> Result<f64, SimilarityError> {
    let counts = [term_counts(text_a), term_counts(text_b)];

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for doc in &counts {
        for (term, count) in doc {
            *totals.entry(term.as_str()).or_default() += count;
        }
    }
    if totals.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }
    let vocabulary = cap_vocabulary(&totals);

    let vectors: Vec<BTreeMap<&str, f64>> = counts
        .iter()
        .map(|doc| {
            doc.iter()
                .filter(|(term, _)| vocabulary.contains(term.as_str()))
                .map(|(term, tf)| {
                    let df = counts.iter().filter(|d| d.contains_key(term)).count() as f64;
                    let idf = ((1.0 + DOCUMENT_COUNT) / (1.0 + df)).ln() + 1.0;
                    (term.as_str(), tf * idf)
                })
                .collect()
        })
        .collect();

    let norm_a = l2_norm(&vectors[0]);
    let norm_b = l2_norm(&vectors[1]);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let dot: f64 = vectors[0]
        .iter()
        .filter_map(|(term, wa)| vectors[1].get(term).map(|wb| wa * wb))
        .sum();
    Ok(dot / (norm_a * norm_b))
}

/// Unigram and bigram counts after stop-word removal.
fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut counts = BTreeMap::new();
    for token in &tokens {
        *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0.0) += 1.0;
    }
    counts
}

/// Most frequent `MAX_FEATURES` terms; ties keep the alphabetically earlier term.
fn cap_vocabulary<'a>(totals: &BTreeMap<&'a str, f64>) -> BTreeSet<&'a str> {
    if totals.len() <= MAX_FEATURES {
        return totals.keys().copied().collect();
    }
    let mut ranked: Vec<(&str, f64)> = totals.iter().map(|(t, c)| (*t, *c)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(MAX_FEATURES).map(|(t, _)| t).collect()
}

fn l2_norm(vector: &BTreeMap<&str, f64>) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_one() {
        let text = "Senior Python engineer building data pipelines with Docker";
        let score = cosine_tfidf(text, text).unwrap();
        assert!((score - 1.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_disjoint_documents_floor() {
        let raw = cosine_tfidf("python pandas numpy", "welding forklift carpentry").unwrap();
        assert_eq!(raw, 0.0);
        assert_eq!(similarity("python pandas numpy", "welding forklift carpentry"), SIMILARITY_FLOOR);
    }

    #[test]
    fn test_empty_against_nonempty_is_floor() {
        assert_eq!(cosine_tfidf("", "Python developer").unwrap(), 0.0);
        assert_eq!(similarity("", "Python developer"), SIMILARITY_FLOOR);
    }

    #[test]
    fn test_empty_vocabulary_is_neutral() {
        assert_eq!(cosine_tfidf("", "   "), Err(SimilarityError::EmptyVocabulary));
        assert_eq!(similarity("the and of", "a an"), NEUTRAL_SIMILARITY);
    }

    #[test]
    fn test_partial_overlap_between_bounds() {
        let resume = "Python developer with SQL and Docker experience";
        let job = "We need a Python engineer who knows AWS and Docker";
        let score = similarity(resume, job);
        assert!(score >= SIMILARITY_FLOOR && score < 1.0, "score was {score}");
    }

    #[test]
    fn test_symmetric() {
        let a = "machine learning engineer python tensorflow";
        let b = "python data scientist with machine learning background";
        let ab = cosine_tfidf(a, b).unwrap();
        let ba = cosine_tfidf(b, a).unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_term_counts_drop_stop_words_before_bigrams() {
        let counts = term_counts("Python and the SQL");
        assert_eq!(counts.get("python sql"), Some(&1.0));
        assert!(!counts.contains_key("and"));
        assert!(!counts.contains_key("python and"));
    }

    #[test]
    fn test_single_char_tokens_ignored() {
        let counts = term_counts("C R Go");
        assert_eq!(counts.len(), 1);
        assert!(counts.contains_key("go"));
    }

    #[test]
    fn test_vocabulary_cap_prefers_frequent_terms() {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        let names: Vec<String> = (0..MAX_FEATURES + 10).map(|i| format!("t{i:05}")).collect();
        for name in &names {
            totals.insert(name.as_str(), 1.0);
        }
        totals.insert("zzz", 9.0);
        let kept = cap_vocabulary(&totals);
        assert_eq!(kept.len(), MAX_FEATURES);
        assert!(kept.contains("zzz"));
        assert!(kept.contains("t00000"));
        assert!(!kept.contains(names.last().unwrap().as_str()));
    }
}
