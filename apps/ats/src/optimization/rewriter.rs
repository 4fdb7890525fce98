//! Resume Rewriter: produces an `OptimizedResume` steered by the skill-gap list.

use tracing::{info, warn};

use crate::errors::AtsError;
use crate::llm_client::json_recovery::ParserChain;
use crate::llm_client::prompts::{fill_template, json_system, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::models::{OptimizedResume, ResumeDraft};
use crate::optimization::prompts::{
    GAP_GUIDANCE_TEMPLATE, NO_GAP_GUIDANCE, REWRITE_PROMPT_TEMPLATE, REWRITE_ROLE,
};

pub const REWRITE_TEMPERATURE: f32 = 0.0;

/// Builds the rewrite prompt. `missing_skills = None` means no gap analysis
/// was available; an empty list means the analysis found no gaps.
pub fn build_prompt(resume: &str, job_description: &str, missing_skills: Option<&[String]>) -> String {
    let gap_guidance = match missing_skills {
        Some(skills) if !skills.is_empty() => {
            let listed: Vec<String> = skills.iter().map(|s| format!("- {s}")).collect();
            fill_template(GAP_GUIDANCE_TEMPLATE, &[("missing_skills", &listed.join("\n"))])
        }
        Some(_) => "SKILL GAPS TO ADDRESS\nNone identified; focus on keyword alignment and emphasis.".to_string(),
        None => NO_GAP_GUIDANCE.to_string(),
    };

    fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("gap_guidance", &gap_guidance),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("job_description", job_description),
            ("resume", resume),
        ],
    )
}

/// One rewrite call followed by parsing and cardinality validation.
pub async fn rewrite(
    resume: &str,
    job_description: &str,
    missing_skills: Option<&[String]>,
    llm: &dyn TextGenerator,
    model: &str,
) -> Result<OptimizedResume, AtsError> {
    if resume.trim().is_empty() {
        return Err(AtsError::InvalidInput("Resume not provided".to_string()));
    }

    let system = json_system(REWRITE_ROLE);
    let prompt = build_prompt(resume, job_description, missing_skills);
    let raw = llm
        .generate(&system, &prompt, model, REWRITE_TEMPERATURE)
        .await?;

    parse_optimized_resume(&raw)
}

/// Parses a rewrite response. Exhausted strategies and cardinality violations
/// both surface as `AtsError::MalformedOutput` carrying a raw excerpt.
pub fn parse_optimized_resume(raw: &str) -> Result<OptimizedResume, AtsError> {
    let recovered = ParserChain::<ResumeDraft>::json_object()
        .parse(raw)
        .ok_or_else(|| {
            warn!("Rewrite response contained no parseable resume document");
            AtsError::malformed("Could not extract a valid resume JSON document from the response", raw)
        })?;

    let resume = OptimizedResume::try_from(recovered.value).map_err(|violation| {
        warn!("Rewritten resume rejected: {}", violation);
        AtsError::malformed(violation.to_string(), raw)
    })?;

    info!(
        "Optimized resume parsed via {}: {} experiences, {} projects",
        recovered.strategy,
        resume.user_information.experiences.len(),
        resume.projects.len()
    );
    Ok(resume)
}
