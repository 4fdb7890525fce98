// Prompt constants for the scoring stages.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role line for both extraction prompts; combined with `llm_client::prompts::json_system`.
pub const EXTRACTION_ROLE: &str =
    "You are an expert ATS (Applicant Tracking System) analyzer extracting skills and \
    qualifications from free text.";

/// Role line for the match judge.
pub const MATCH_ROLE: &str =
    "You are an expert ATS (Applicant Tracking System) analyzer comparing a candidate \
    against a job's requirements.";

/// Output schema shared by both extraction prompts.
pub const SKILL_PROFILE_FORMAT: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["Python", "SQL", "Stakeholder communication"],
  "experience_years": 5,
  "key_requirements": ["BSc in Computer Science", "Experience running production databases"],
  "domains": ["fintech", "data engineering"]
}

- "skills": every skill found, as short noun phrases
- "experience_years": an integer, or null when the text does not state one
- "key_requirements": qualifications, degrees, certifications and experience statements
- "domains": industries or problem domains"#;

/// Extraction guidance shared by both roles. Over-inclusion is intended.
pub const EXTRACTION_GUIDANCE: &str = "Be generous: a missed skill cannot be recovered later, an extra one is harmless.
Include ALL of the following:
- Technical skills: languages, frameworks, libraries, tools, platforms, databases
- Soft skills: communication, leadership, collaboration, problem solving
- Domain knowledge: industries, business areas, regulatory contexts
- Implied and transferable skills: abilities evidenced by the work described even if not named
- Education and certifications";

/// Resume extraction prompt. Replace `{guidance}`, `{format}` and `{resume_text}`.
pub const RESUME_EXTRACTION_TEMPLATE: &str = r#"Extract the candidate's skills, experience and qualifications from the resume below.

{guidance}

{format}

RESUME TEXT:
{resume_text}"#;

/// Job extraction prompt. Replace `{guidance}`, `{format}` and `{job_text}`.
pub const JOB_EXTRACTION_TEMPLATE: &str = r#"Extract the required and preferred skills, experience requirements and key qualifications from the job description below.

{guidance}

{format}

JOB DESCRIPTION TEXT:
{job_text}"#;

/// Match judging prompt. Replace `{candidate_profile}` and `{job_profile}`.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Compare the candidate's skills and qualifications with the job requirements.
Credit transferable and implied skills, not only exact keyword matches.

CANDIDATE SKILLS AND QUALIFICATIONS:
{candidate_profile}

JOB REQUIREMENTS:
{job_profile}

SCORING RUBRIC:
- 95-100: near-complete coverage of the requirements, including through transferable skills
- 80-94: covers most core and preferred requirements
- 70-79: covers the core requirements and most desired ones
- 50-69: covers the core requirements only, with notable gaps
- 30-49: significant gaps in the requirements
- 0-29: core requirements missing

Return a JSON object with this EXACT schema:
{
  "score": 0,
  "matching_skills": ["skills the candidate has that the job asks for"],
  "missing_skills": ["important job skills the candidate lacks or does not show"],
  "recommendation": "one or two sentences on the candidate's fit",
  "rationale": "brief justification of the score"
}"#;
