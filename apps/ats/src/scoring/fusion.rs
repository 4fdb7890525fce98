use serde::{Deserialize, Serialize};

use crate::errors::AtsError;

pub const LLM_FLOOR: f64 = 0.45;
pub const SEMANTIC_FLOOR: f64 = 0.4;
/// Weighted sums below this receive the calibration boost.
pub const BOOST_THRESHOLD: f64 = 0.7;
pub const BOOST_FACTOR: f64 = 0.15;

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub llm: f64,
    pub semantic: f64,
    pub keyword: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            llm: 0.5,
            semantic: 0.3,
            keyword: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Weights must be non-negative and sum to 1.0.
    pub fn new(llm: f64, semantic: f64, keyword: f64) -> Result<Self, AtsError> {
        let weights = [llm, semantic, keyword];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AtsError::Configuration(format!(
                "scoring weights must be non-negative, got llm={llm}, semantic={semantic}, keyword={keyword}"
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(AtsError::Configuration(format!(
                "scoring weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(Self {
            llm,
            semantic,
            keyword,
        })
    }
}

/// Reported sub-scores and final score, as percentages with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FusedScore {
    pub llm_score: f64,
    pub semantic_score: f64,
    pub keyword_overlap_score: f64,
    pub final_score: f64,
}

/// Combines the judge score (0–100) with semantic and keyword signals (0–1).
///
/// Sub-scores are floored, then rounded to two decimals on the 0–100 scale;
/// the final score is computed from those reported values so that
/// `fuse_percentages` on the output reproduces `final_score` exactly.
pub fn fuse(llm_score: u8, semantic: f64, keyword: f64, weights: &ScoringWeights) -> FusedScore {
    let llm = (f64::from(llm_score) / 100.0).clamp(0.0, 1.0).max(LLM_FLOOR);
    let semantic = unit(semantic).max(SEMANTIC_FLOOR);
    let keyword = unit(keyword);

    let llm_score = round2(llm * 100.0);
    let semantic_score = round2(semantic * 100.0);
    let keyword_overlap_score = round2(keyword * 100.0);

    FusedScore {
        llm_score,
        semantic_score,
        keyword_overlap_score,
        final_score: fuse_percentages(llm_score, semantic_score, keyword_overlap_score, weights),
    }
}

/// Final score (0–100) from already-reported percentage sub-scores.
pub fn fuse_percentages(
    llm_pct: f64,
    semantic_pct: f64,
    keyword_pct: f64,
    weights: &ScoringWeights,
) -> f64 {
    let llm = unit(llm_pct / 100.0).max(LLM_FLOOR);
    let semantic = unit(semantic_pct / 100.0).max(SEMANTIC_FLOOR);
    let keyword = unit(keyword_pct / 100.0);

    let weighted = weights.llm * llm + weights.semantic * semantic + weights.keyword * keyword;
    round2(calibrate(weighted) * 100.0)
}

/// Optimistic calibration: sums below `BOOST_THRESHOLD` move 15% of the way toward 1.0.
pub fn calibrate(weighted: f64) -> f64 {
    let weighted = unit(weighted);
    if weighted < BOOST_THRESHOLD {
        (weighted + BOOST_FACTOR * (1.0 - weighted)).min(1.0)
    } else {
        weighted
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.llm + w.semantic + w.keyword - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_validation() {
        assert!(ScoringWeights::new(0.4, 0.3, 0.3).is_ok());
        assert!(matches!(
            ScoringWeights::new(0.5, 0.5, 0.5),
            Err(AtsError::Configuration(_))
        ));
        assert!(matches!(
            ScoringWeights::new(1.2, -0.1, -0.1),
            Err(AtsError::Configuration(_))
        ));
    }

    #[test]
    fn test_floors_hold_for_zero_inputs() {
        let fused = fuse(0, 0.0, 0.0, &ScoringWeights::default());
        assert_eq!(fused.llm_score, 45.0);
        assert_eq!(fused.semantic_score, 40.0);
        assert_eq!(fused.keyword_overlap_score, 0.0);
        // 0.5*0.45 + 0.3*0.4 = 0.345 → 0.345 + 0.15*0.655 = 0.44325
        assert_eq!(fused.final_score, 44.33);
    }

    #[test]
    fn test_high_scores_not_boosted() {
        let fused = fuse(90, 0.8, 0.75, &ScoringWeights::default());
        // 0.45 + 0.24 + 0.15 = 0.84
        assert_eq!(fused.final_score, 84.0);
    }

    #[test]
    fn test_mid_score_boosted() {
        let fused = fuse(60, 0.5, 0.5, &ScoringWeights::default());
        // 0.3 + 0.15 + 0.1 = 0.55 → 0.55 + 0.15*0.45 = 0.6175
        assert_eq!(fused.final_score, 61.75);
    }

    #[test]
    fn test_final_reproducible_from_reported_subscores() {
        let weights = ScoringWeights::default();
        for (llm, sem, kw) in [(72, 0.4137, 0.6667), (45, 0.55555, 0.3333), (100, 1.0, 1.0)] {
            let fused = fuse(llm, sem, kw, &weights);
            let again = fuse_percentages(
                fused.llm_score,
                fused.semantic_score,
                fused.keyword_overlap_score,
                &weights,
            );
            assert_eq!(again, fused.final_score);
        }
    }

    #[test]
    fn test_fuse_is_pure() {
        let weights = ScoringWeights::new(0.4, 0.3, 0.3).unwrap();
        assert_eq!(fuse(67, 0.52, 0.5, &weights), fuse(67, 0.52, 0.5, &weights));
    }

    #[test]
    fn test_boost_monotonic_and_shrinking() {
        let mut previous_boost = f64::INFINITY;
        let mut s = 0.0;
        while s < BOOST_THRESHOLD {
            let boosted = calibrate(s);
            let boost = boosted - s;
            assert!(boosted >= s);
            assert!(boost < previous_boost, "boost did not shrink at {s}");
            previous_boost = boost;
            s += 0.05;
        }
        assert_eq!(calibrate(0.7), 0.7);
        assert_eq!(calibrate(1.0), 1.0);
    }

    #[test]
    fn test_all_scores_within_range() {
        let fused = fuse(100, 1.0, 1.0, &ScoringWeights::default());
        assert_eq!(fused.final_score, 100.0);
        let fused = fuse(255, 7.0, -3.0, &ScoringWeights::default());
        assert!((0.0..=100.0).contains(&fused.llm_score));
        assert!((0.0..=100.0).contains(&fused.semantic_score));
        assert!((0.0..=100.0).contains(&fused.keyword_overlap_score));
        assert!((0.0..=100.0).contains(&fused.final_score));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(61.754999), 61.75);
        assert_eq!(round2(44.325), 44.33);
    }
}
