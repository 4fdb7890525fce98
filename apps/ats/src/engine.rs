//! Orchestrator: the two public operations, `score` and `optimize`.
//!
//! Flow (score): extract resume ∥ extract job → similarity → keyword overlap
//!               → judge → fuse.
//! Flow (optimize): score (fresh gap analysis) → rewrite.
//!
//! Every call is independent; the engine holds no per-request state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::errors::AtsError;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::models::{MatchResult, OptimizedResume, Parsed, SkillProfile};
use crate::optimization::rewriter;
use crate::scoring::extractor::{extract, DocumentRole};
use crate::scoring::fusion::{fuse, ScoringWeights};
use crate::scoring::judge::{judge, Judgement};
use crate::scoring::similarity::similarity;
use crate::scoring::skill_matcher::keyword_overlap;

#[derive(Clone)]
pub struct AtsEngine {
    llm: Arc<dyn TextGenerator>,
    model: String,
    weights: ScoringWeights,
}

/// Full outcome of one scoring pass, including how the verdict was obtained.
struct Analysis {
    result: MatchResult,
    judgement: Judgement,
}

impl AtsEngine {
    pub fn new(llm: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Engine backed by the HTTP provider client described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, AtsError> {
        let client = LlmClient::new(
            config.api_key.clone(),
            &config.api_base,
            config.request_timeout,
        )?;
        info!(
            "LLM client initialized (model: {}, endpoint: {})",
            config.model,
            client.endpoint()
        );
        Ok(Self::new(Arc::new(client), config.model.clone()).with_weights(config.weights))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scores a resume against a job description. Never fails: each stage
    /// degrades to its documented default.
    pub async fn score(&self, resume: &str, job: &str) -> MatchResult {
        self.analyze(resume, job).await.result
    }

    /// Rewrites the resume for the job, guided by a fresh gap analysis.
    pub async fn optimize(&self, resume: &str, job: &str) -> Result<OptimizedResume, AtsError> {
        if resume.trim().is_empty() {
            return Err(AtsError::InvalidInput("Resume not provided".to_string()));
        }

        let analysis = self.analyze(resume, job).await;
        let missing = if analysis.judgement.is_fallback() {
            warn!("Gap analysis unavailable; rewriting without gap guidance");
            None
        } else {
            info!(
                "Gap analysis found {} missing skills",
                analysis.result.missing_skills.len()
            );
            Some(analysis.result.missing_skills)
        };

        rewriter::rewrite(
            resume,
            job,
            missing.as_deref(),
            self.llm.as_ref(),
            &self.model,
        )
        .await
    }

    async fn analyze(&self, resume: &str, job: &str) -> Analysis {
        let (resume_profile, job_profile) = tokio::join!(
            self.extract_or_degrade(resume, DocumentRole::Resume),
            self.extract_or_degrade(job, DocumentRole::JobDescription),
        );

        let semantic = similarity(resume, job);
        let overlap = keyword_overlap(resume_profile.skills(), job_profile.skills());
        debug!("Semantic similarity {:.4}, keyword overlap {:.4}", semantic, overlap);

        let judgement = match judge(&resume_profile, &job_profile, self.llm.as_ref(), &self.model).await
        {
            Ok(judgement) => judgement,
            Err(e) => {
                warn!("Match judge call failed ({}); using default verdict", e);
                Judgement::fallback()
            }
        };

        let fused = fuse(judgement.verdict.score, semantic, overlap, &self.weights);
        info!(
            "ATS score: final={}, llm={}, semantic={}, keyword={}",
            fused.final_score, fused.llm_score, fused.semantic_score, fused.keyword_overlap_score
        );

        let result = MatchResult {
            llm_score: fused.llm_score,
            semantic_score: fused.semantic_score,
            keyword_overlap_score: fused.keyword_overlap_score,
            final_score: fused.final_score,
            resume_skills: resume_profile.skills().to_vec(),
            job_requirements: job_profile.skills().to_vec(),
            matching_skills: judgement.verdict.matching_skills.clone(),
            missing_skills: judgement.verdict.missing_skills.clone(),
            recommendation: judgement.verdict.recommendation.clone(),
        };
        Analysis { result, judgement }
    }

    /// Blank text yields an empty profile without a provider call; a provider
    /// failure yields an empty `ParseFailure`.
    async fn extract_or_degrade(&self, text: &str, role: DocumentRole) -> Parsed<SkillProfile> {
        if text.trim().is_empty() {
            debug!("Empty {} text; skipping extraction", role.label());
            return Parsed::Ok(SkillProfile::default());
        }
        match extract(text, role, self.llm.as_ref(), &self.model).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{} extraction failed ({}); continuing without a profile", role.label(), e);
                Parsed::ParseFailure(String::new())
            }
        }
    }
}
