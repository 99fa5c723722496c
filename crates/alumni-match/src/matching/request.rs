use serde::Deserialize;

use super::domain::ApplicantProfile;

/// Match query as posted by the search form.
///
/// Keys arrive in snake_case or in the browser form's camelCase.
/// `courses` is the older single-list form; it stands in for both the branch and
/// the desired programs when the newer fields are absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default, alias = "bachelorsBranch")]
    pub bachelors_branch: Option<String>,
    #[serde(default, alias = "mastersPrograms")]
    pub masters_programs: Option<Vec<String>>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
    #[serde(default, alias = "workExperience")]
    pub work_experience: Option<f64>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default, alias = "tenthPercentage")]
    pub tenth_percentage: Option<f64>,
    #[serde(default, alias = "twelfthPercentage")]
    pub twelfth_percentage: Option<f64>,
    #[serde(default, alias = "companySector")]
    pub company_sector: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default, alias = "researchPapers")]
    pub research_papers: Option<u32>,
    #[serde(default)]
    pub publications: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("College is required")]
    MissingCollege,
    #[error("Bachelor's Branch is required")]
    MissingBranch,
    #[error("At least one Master's Program is required")]
    MissingPrograms,
    #[error("Valid work experience (years) is required")]
    InvalidWorkExperience,
    #[error("Valid CGPA (0-10) is required")]
    InvalidCgpa,
    #[error("Valid 10th percentage (0-100) is required")]
    InvalidTenthPercentage,
    #[error("Valid 12th percentage (0-100) is required")]
    InvalidTwelfthPercentage,
}

impl MatchRequest {
    pub fn into_profile(self) -> Result<ApplicantProfile, ProfileValidationError> {
        let college =
            trimmed(self.college.as_deref()).ok_or(ProfileValidationError::MissingCollege)?;

        let courses = trimmed_list(self.courses.as_deref().unwrap_or_default());
        let bachelors_branch = trimmed(self.bachelors_branch.as_deref())
            .or_else(|| courses.first().cloned())
            .ok_or(ProfileValidationError::MissingBranch)?;

        let masters_programs = match self.masters_programs.as_deref() {
            Some(programs) if !programs.is_empty() => trimmed_list(programs),
            _ => courses,
        };
        if masters_programs.is_empty() {
            return Err(ProfileValidationError::MissingPrograms);
        }

        let work_experience = self
            .work_experience
            .filter(|years| years.is_finite() && *years >= 0.0)
            .ok_or(ProfileValidationError::InvalidWorkExperience)?;

        let cgpa = self
            .cgpa
            .filter(|cgpa| (0.0..=10.0).contains(cgpa))
            .ok_or(ProfileValidationError::InvalidCgpa)?;

        let tenth_percentage = percentage(
            self.tenth_percentage,
            ProfileValidationError::InvalidTenthPercentage,
        )?;
        let twelfth_percentage = percentage(
            self.twelfth_percentage,
            ProfileValidationError::InvalidTwelfthPercentage,
        )?;

        Ok(ApplicantProfile {
            college,
            bachelors_branch,
            masters_programs,
            work_experience,
            cgpa,
            tenth_percentage,
            twelfth_percentage,
            company_sector: trimmed(self.company_sector.as_deref()),
            designation: trimmed(self.designation.as_deref()),
            research_papers: self.research_papers,
            publications: trimmed(self.publications.as_deref()),
        })
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn trimmed_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| trimmed(Some(value)))
        .collect()
}

fn percentage(
    value: Option<f64>,
    error: ProfileValidationError,
) -> Result<Option<f64>, ProfileValidationError> {
    match value {
        Some(value) if !(0.0..=100.0).contains(&value) => Err(error),
        other => Ok(other),
    }
}
