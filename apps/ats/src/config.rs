use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AtsError;
use crate::scoring::fusion::ScoringWeights;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Engine configuration loaded from environment variables.
/// Missing credentials are a fatal `AtsError::Configuration` at construction time.
#[derive(Clone)]
pub struct EngineConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub request_timeout: Duration,
    pub weights: ScoringWeights,
    pub rust_log: String,
}

impl EngineConfig {
    /// Explicit construction with default timeout, weights and log level.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AtsError> {
        let api_key = non_blank("API_KEY", api_key.into())?;
        let api_base = non_blank("API_BASE", api_base.into())?;
        let model = non_blank("MODEL_NAME", model.into())?;
        Ok(Self {
            api_key,
            api_base,
            model,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            weights: ScoringWeights::default(),
            rust_log: "info".to_string(),
        })
    }

    pub fn from_env() -> Result<Self, AtsError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AtsError> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| {
                AtsError::Configuration(format!(
                    "Required environment variable '{key}' is not set"
                ))
            })
        };

        let mut config = Self::new(require("API_KEY")?, require("API_BASE")?, require("MODEL_NAME")?)?;

        config.request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let defaults = ScoringWeights::default();
        config.weights = ScoringWeights::new(
            parse_or(&lookup, "ATS_WEIGHT_LLM", defaults.llm)?,
            parse_or(&lookup, "ATS_WEIGHT_SEMANTIC", defaults.semantic)?,
            parse_or(&lookup, "ATS_WEIGHT_KEYWORD", defaults.keyword)?,
        )?;
        if let Some(level) = lookup("RUST_LOG") {
            config.rust_log = level;
        }

        Ok(config)
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("weights", &self.weights)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn non_blank(key: &str, value: String) -> Result<String, AtsError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AtsError::Configuration(format!("'{key}' must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AtsError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            AtsError::Configuration(format!("'{key}' has an invalid value: {raw:?}"))
        }),
        None => Ok(default),
    }
}
