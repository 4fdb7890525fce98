//! Optimized resume document.
//!
//! `OptimizedResume` can only hold experiences with exactly four highlights and
//! projects with exactly two goals. Model output is first read into the lenient
//! `ResumeDraft` and converted with `TryFrom`, which reports any cardinality
//! violation instead of padding or truncating.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{lenient_string_list, null_as_default};

pub const HIGHLIGHTS_PER_EXPERIENCE: usize = 4;
pub const GOALS_PER_PROJECT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SchemaViolation(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedResume {
    pub user_information: UserInformation,
    pub projects: Vec<Project>,
    pub certificate: Vec<Certificate>,
    pub extra_curricular_activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInformation {
    pub name: String,
    pub main_job_title: String,
    pub profile_description: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Skills,
    pub hobbies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    #[serde(rename = "four_tasks")]
    pub highlights: [String; HIGHLIGHTS_PER_EXPERIENCE],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_name: String,
    pub project_link: String,
    #[serde(rename = "two_goals_of_the_project")]
    pub goals: [String; GOALS_PER_PROJECT],
    pub project_end_result: String,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub hard_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient wire form
// ────────────────────────────────────────────────────────────────────────────

/// Resume as the model emitted it, before cardinality checks.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeDraft {
    pub user_information: DraftUserInformation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<DraftProject>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificate: Vec<Certificate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_curricular_activities: Vec<Activity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftUserInformation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experiences: Vec<DraftExperience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub hobbies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftExperience {
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub four_tasks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftProject {
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub two_goals_of_the_project: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_end_result: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub tech_stack: Vec<String>,
}

impl TryFrom<ResumeDraft> for OptimizedResume {
    type Error = SchemaViolation;

    fn try_from(draft: ResumeDraft) -> Result<Self, Self::Error> {
        let info = draft.user_information;

        let experiences = info
            .experiences
            .into_iter()
            .enumerate()
            .map(|(i, exp)| {
                let highlights = exact::<HIGHLIGHTS_PER_EXPERIENCE>(exp.four_tasks).map_err(
                    |found| {
                        SchemaViolation(format!(
                            "experience {} has {} highlights, expected {}",
                            i + 1,
                            found,
                            HIGHLIGHTS_PER_EXPERIENCE
                        ))
                    },
                )?;
                Ok(Experience {
                    job_title: exp.job_title,
                    company: exp.company,
                    start_date: exp.start_date,
                    end_date: exp.end_date,
                    location: exp.location,
                    highlights,
                })
            })
            .collect::<Result<Vec<_>, SchemaViolation>>()?;

        let projects = draft
            .projects
            .into_iter()
            .enumerate()
            .map(|(i, project)| {
                let goals = exact::<GOALS_PER_PROJECT>(project.two_goals_of_the_project)
                    .map_err(|found| {
                        SchemaViolation(format!(
                            "project {} has {} goals, expected {}",
                            i + 1,
                            found,
                            GOALS_PER_PROJECT
                        ))
                    })?;
                Ok(Project {
                    project_name: project.project_name,
                    project_link: project.project_link,
                    goals,
                    project_end_result: project.project_end_result,
                    tech_stack: project.tech_stack,
                })
            })
            .collect::<Result<Vec<_>, SchemaViolation>>()?;

        Ok(OptimizedResume {
            user_information: UserInformation {
                name: info.name,
                main_job_title: info.main_job_title,
                profile_description: info.profile_description,
                email: info.email,
                linkedin: info.linkedin,
                github: info.github,
                experiences,
                education: info.education,
                skills: info.skills,
                hobbies: info.hobbies,
            },
            projects,
            certificate: draft.certificate,
            extra_curricular_activities: draft.extra_curricular_activities,
        })
    }
}

/// Converts a list into a fixed-size array, or returns the list's length.
/// Blank entries count as missing.
fn exact<const N: usize>(items: Vec<String>) -> Result<[String; N], usize> {
    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    items.try_into().map_err(|rejected: Vec<String>| rejected.len())
}
