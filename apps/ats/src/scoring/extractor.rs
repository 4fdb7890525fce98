//! Structured Extractor: turns resume or job text into a `SkillProfile`.

use tracing::{debug, warn};

use crate::llm_client::json_recovery::ParserChain;
use crate::llm_client::prompts::{fill_template, json_system};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{Parsed, SkillProfile};
use crate::scoring::prompts::{
    EXTRACTION_GUIDANCE, EXTRACTION_ROLE, JOB_EXTRACTION_TEMPLATE, RESUME_EXTRACTION_TEMPLATE,
    SKILL_PROFILE_FORMAT,
};

pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl DocumentRole {
    pub fn label(self) -> &'static str {
        match self {
            DocumentRole::Resume => "resume",
            DocumentRole::JobDescription => "job description",
        }
    }
}

/// Builds the extraction prompt for `text` in the given role.
pub fn build_prompt(text: &str, role: DocumentRole) -> String {
    let (template, placeholder) = match role {
        DocumentRole::Resume => (RESUME_EXTRACTION_TEMPLATE, "resume_text"),
        DocumentRole::JobDescription => (JOB_EXTRACTION_TEMPLATE, "job_text"),
    };
    fill_template(
        template,
        &[
            ("guidance", EXTRACTION_GUIDANCE),
            ("format", SKILL_PROFILE_FORMAT),
            (placeholder, text),
        ],
    )
}

/// One extraction call. A response no strategy can parse comes back as
/// `Parsed::ParseFailure(raw)`; only provider failures are errors.
pub async fn extract(
    text: &str,
    role: DocumentRole,
    llm: &dyn TextGenerator,
    model: &str,
) -> Result<Parsed<SkillProfile>, LlmError> {
    let system = json_system(EXTRACTION_ROLE);
    let prompt = build_prompt(text, role);
    let raw = llm
        .generate(&system, &prompt, model, EXTRACTION_TEMPERATURE)
        .await?;
    Ok(parse_profile(&raw, role))
}

/// Parses an extraction response, keeping the raw text when every strategy fails.
pub fn parse_profile(raw: &str, role: DocumentRole) -> Parsed<SkillProfile> {
    match ParserChain::<SkillProfile>::json_object().parse(raw) {
        Some(recovered) => {
            debug!(
                "Extracted {} skills from {} via {}",
                recovered.value.skills.len(),
                role.label(),
                recovered.strategy
            );
            Parsed::Ok(recovered.value)
        }
        None => {
            warn!(
                "Could not parse {} extraction; keeping raw response ({} chars)",
                role.label(),
                raw.len()
            );
            Parsed::ParseFailure(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, f32)>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(
            &self,
            _system: &str,
            prompt: &str,
            _model: &str,
            temperature: f32,
        ) -> Result<String, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), temperature));
            self.reply.clone().map_err(|_| LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_prompts_differ_by_role() {
        let resume = build_prompt("Python developer", DocumentRole::Resume);
        let job = build_prompt("Hiring Python developer", DocumentRole::JobDescription);
        assert!(resume.contains("RESUME TEXT:\nPython developer"));
        assert!(job.contains("JOB DESCRIPTION TEXT:\nHiring Python developer"));
        assert!(resume.contains("\"experience_years\""));
        assert!(job.contains("Implied and transferable skills"));
        assert!(!resume.contains("{guidance}"));
    }

    #[test]
    fn test_document_text_with_placeholders_is_literal() {
        let prompt = build_prompt("Skills: {format} and {guidance}", DocumentRole::Resume);
        assert!(prompt.contains("RESUME TEXT:\nSkills: {format} and {guidance}"));
        assert_eq!(prompt.matches(SKILL_PROFILE_FORMAT).count(), 1);
    }

    #[tokio::test]
    async fn test_extract_parses_fenced_profile() {
        let llm = Canned::ok("```json\n{\"skills\": [\"Python\", \"SQL\"], \"experience_years\": \"4 years\"}\n```");
        let parsed = extract("resume", DocumentRole::Resume, &llm, "m")
            .await
            .unwrap();
        let profile = parsed.as_ok().unwrap();
        assert_eq!(profile.skills, vec!["Python", "SQL"]);
        assert_eq!(profile.experience_years, Some(4));

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!((seen[0].1 - EXTRACTION_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_extract_keeps_raw_on_parse_failure() {
        let llm = Canned::ok("Skills: Python, SQL");
        let parsed = extract("resume", DocumentRole::Resume, &llm, "m")
            .await
            .unwrap();
        assert_eq!(parsed, Parsed::ParseFailure("Skills: Python, SQL".to_string()));
    }

    #[tokio::test]
    async fn test_extract_surfaces_provider_error() {
        let llm = Canned {
            reply: Err(()),
            seen: Mutex::new(Vec::new()),
        };
        let err = extract("job", DocumentRole::JobDescription, &llm, "m")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
