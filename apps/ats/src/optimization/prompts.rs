// Prompt constants for the Resume Rewriter.
// The honesty rule comes from llm_client::prompts::NO_FABRICATION_INSTRUCTION.

/// Role line for the rewrite call; combined with `llm_client::prompts::json_system`.
pub const REWRITE_ROLE: &str =
    "You are an expert ATS (Applicant Tracking System) Resume Optimization Specialist.";

/// Rewrite prompt. Replace `{job_description}`, `{resume}`, `{gap_guidance}`
/// and `{no_fabrication}` before sending.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Transform the candidate's existing resume into a version tailored to the job description below, maximizing the chance of passing ATS filters while staying honest and accurate.

## INPUT DATA

### JOB DESCRIPTION:
{job_description}

### CANDIDATE'S CURRENT RESUME:
{resume}

## OPTIMIZATION INSTRUCTIONS

1. ANALYZE THE JOB DESCRIPTION
   - Extract key requirements, skills, qualifications and responsibilities
   - Identify primary and secondary keywords and industry terminology
   - Note the exact phrasing the employer uses

2. EVALUATE THE CURRENT RESUME
   - Compare existing content against the job requirements
   - Identify aligned skills and experience, and where alignment can improve

3. CREATE AN ATS-OPTIMIZED RESUME
   - Write a targeted professional summary
   - Use the job description's exact keywords in context, never as stuffing
   - Prioritize the experience most relevant to the role
   - Quantify achievements with metrics where the resume supports them
   - Drop information that does not support this application
   - List only the 3-4 projects most related to the job

4. ATS FORMATTING RULES
   - Standard section names, no tables, columns, images or special characters
   - Spell out terms alongside acronyms where useful, e.g. "Search Engine Optimization (SEO)"
   - Clear job titles, company names, dates and locations in a consistent format

{gap_guidance}

5. ETHICAL GUIDELINES
{no_fabrication}

## OUTPUT FORMAT

Return ONLY a JSON object with this EXACT structure:
{
  "user_information": {
    "name": "",
    "main_job_title": "",
    "profile_description": "",
    "email": "",
    "linkedin": "",
    "github": "",
    "experiences": [
      {
        "job_title": "",
        "company": "",
        "start_date": "",
        "end_date": "",
        "location": "",
        "four_tasks": ["", "", "", ""]
      }
    ],
    "education": [
      {
        "institution": "",
        "degree": "",
        "location": "",
        "description": "",
        "start_date": "",
        "end_date": ""
      }
    ],
    "skills": {
      "hard_skills": [],
      "soft_skills": []
    },
    "hobbies": []
  },
  "projects": [
    {
      "project_name": "",
      "project_link": "",
      "two_goals_of_the_project": ["", ""],
      "project_end_result": "",
      "tech_stack": []
    }
  ],
  "certificate": [
    {
      "name": "",
      "link": "",
      "institution": "",
      "description": "",
      "date": ""
    }
  ],
  "extra_curricular_activities": [
    {
      "name": "",
      "description": "",
      "start_date": "",
      "end_date": ""
    }
  ]
}

IMPORTANT REQUIREMENTS:
1. "four_tasks" MUST contain EXACTLY 4 non-empty items for every experience
2. "two_goals_of_the_project" MUST contain EXACTLY 2 non-empty items for every project
3. Use one consistent date format (YYYY-MM or MM/YYYY)
4. Fill every field from the resume; use "" or [] when the resume has nothing for it"#;

/// Gap guidance injected when the gap analysis produced missing skills.
/// Replace `{missing_skills}`.
pub const GAP_GUIDANCE_TEMPLATE: &str = r#"SKILL GAPS TO ADDRESS
The job asks for these skills, which the current resume does not clearly show:
{missing_skills}
Surface these if genuinely present in the candidate's background (reworded, or evidenced by existing work). Do NOT add any that are not supported by the resume."#;

/// Used when no gap analysis is available.
pub const NO_GAP_GUIDANCE: &str =
    "SKILL GAPS TO ADDRESS\nNo gap analysis is available; rely on your own comparison of the resume and job description.";
