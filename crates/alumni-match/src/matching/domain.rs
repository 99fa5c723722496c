use serde::{Deserialize, Serialize};

/// Identifier wrapper for imported alumni rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlumniId(pub String);

/// Query profile submitted by a prospective student. Built per request and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub college: String,
    pub bachelors_branch: String,
    pub masters_programs: Vec<String>,
    pub work_experience: f64,
    pub cgpa: f64,
    #[serde(default)]
    pub tenth_percentage: Option<f64>,
    #[serde(default)]
    pub twelfth_percentage: Option<f64>,
    #[serde(default)]
    pub company_sector: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub research_papers: Option<u32>,
    #[serde(default)]
    pub publications: Option<String>,
}

/// One prior role listed for an alumnus, in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub months: f64,
    pub company: String,
    pub designation: String,
    pub label: String,
}

/// Past admission outcome used as a comparison point.
///
/// `admitted_year` is stored exactly as imported and may hold sheet garbage such
/// as Excel date serials; see [`super::policy::AdmittedYearWindow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub id: AlumniId,
    pub name: String,
    pub college: String,
    pub university: String,
    pub course: Option<String>,
    pub location: Option<String>,
    pub branch: String,
    pub admitted_year: Option<i32>,
    pub cgpa: f64,
    pub work_experience: f64,
    pub tenth_percentage: Option<f64>,
    pub twelfth_percentage: Option<f64>,
    pub company_sector: Option<String>,
    pub designation: Option<String>,
    pub linkedin_profile: Option<String>,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperienceEntry>,
}

/// Destinations whose location does not mention India rank ahead on ties.
pub(crate) fn is_abroad_location(location: Option<&str>) -> bool {
    !location
        .map(|value| value.to_uppercase().contains("INDIA"))
        .unwrap_or(false)
}

/// Inclusive span of validated admission years within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl YearRange {
    pub fn from_years<I>(years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        years.into_iter().fold(Self::default(), |range, year| Self {
            min: Some(range.min.map_or(year, |min| min.min(year))),
            max: Some(range.max.map_or(year, |max| max.max(year))),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}

/// Destination program ranked for an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedGroup {
    pub university: String,
    pub course: Option<String>,
    pub location: Option<String>,
    pub match_percentage: u8,
    pub alumni_count: usize,
    pub admitted_year_range: YearRange,
}

impl MatchedGroup {
    pub fn is_abroad(&self) -> bool {
        is_abroad_location(self.location.as_deref())
    }
}

/// Contributing alumnus exposed alongside a group in detailed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeniorView {
    pub id: AlumniId,
    pub name: String,
    pub branch: String,
    pub cgpa: f64,
    pub work_experience: f64,
    pub admitted_year: Option<i32>,
    pub tenth_percentage: Option<f64>,
    pub twelfth_percentage: Option<f64>,
    pub company_sector: Option<String>,
    pub designation: Option<String>,
    pub linkedin_profile: Option<String>,
    pub work_experiences: Vec<WorkExperienceEntry>,
    pub match_score: u8,
}

/// Group plus the seniors whose scores formed its average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedGroupDetail {
    #[serde(flatten)]
    pub group: MatchedGroup,
    pub seniors: Vec<SeniorView>,
}
