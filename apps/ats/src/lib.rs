//! ATS resume scoring and optimization engine.
//!
//! `AtsEngine::score` measures how well a resume matches a job description;
//! `AtsEngine::optimize` rewrites the resume for that job using the gap analysis.

pub mod config;
pub mod engine;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod optimization;
pub mod scoring;

pub use config::EngineConfig;
pub use engine::AtsEngine;
pub use errors::{AtsError, OptimizeFailure};
pub use llm_client::{LlmClient, LlmError, TextGenerator};
pub use models::{MatchResult, OptimizedResume};
pub use scoring::fusion::ScoringWeights;
