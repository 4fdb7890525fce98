use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::json_recovery::excerpt;
use crate::llm_client::LlmError;

/// Longest raw-response excerpt carried by a `MalformedOutput` error.
pub const RAW_EXCERPT_CHARS: usize = 500;

/// Engine-level error type.
///
/// Only configuration problems, bad caller input, unrecoverable provider
/// failures in `optimize`, and exhausted parse chains surface as errors. Every
/// other stage failure degrades to a documented default inside the pipeline.
#[derive(Debug, Error)]
pub enum AtsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Response received but unusable: no parser strategy succeeded, or the
    /// parsed document violates a structural invariant.
    #[error("Malformed model output: {reason}")]
    MalformedOutput { reason: String, raw_excerpt: String },
}

impl AtsError {
    pub fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        AtsError::MalformedOutput {
            reason: reason.into(),
            raw_excerpt: excerpt(raw, RAW_EXCERPT_CHARS),
        }
    }
}

/// Serializable `{error, raw_response?}` payload for callers that expose
/// `optimize` failures as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl From<&AtsError> for OptimizeFailure {
    fn from(err: &AtsError) -> Self {
        let raw_response = match err {
            AtsError::MalformedOutput { raw_excerpt, .. } => Some(raw_excerpt.clone()),
            _ => None,
        };
        Self {
            error: err.to_string(),
            raw_response,
        }
    }
}
