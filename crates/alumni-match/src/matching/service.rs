use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::aggregate::{aggregate_with_members, GroupedMatch};
use super::domain::{
    ApplicantProfile, HistoricalRecord, MatchedGroup, MatchedGroupDetail, SeniorView,
};
use super::policy::{screen_records, AdmittedYearWindow};
use super::repository::{AlumniRepository, RepositoryError, SearchLogEntry, SearchRecorder};

/// Fetches a college's alumni and ranks them for an applicant.
pub struct MatchService<R, S> {
    repository: Arc<R>,
    recorder: Arc<S>,
}

impl<R, S> MatchService<R, S>
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    pub fn new(repository: Arc<R>, recorder: Arc<S>) -> Self {
        Self {
            repository,
            recorder,
        }
    }

    /// Ranked destination programs. No matches is an empty list, not an error.
    pub fn compute_matches(
        &self,
        applicant: &ApplicantProfile,
    ) -> Result<Vec<MatchedGroup>, MatchError> {
        let grouped = self.rank(applicant)?;
        Ok(grouped.into_iter().map(|grouped| grouped.group).collect())
    }

    /// Same ranking, with the contributing seniors attached to each group.
    pub fn compute_detailed_matches(
        &self,
        applicant: &ApplicantProfile,
    ) -> Result<Vec<MatchedGroupDetail>, MatchError> {
        let grouped = self.rank(applicant)?;
        Ok(grouped.into_iter().map(detail_view).collect())
    }

    /// The find-seniors directory: every alumnus after year cleaning and
    /// institution exclusion, most recently imported first.
    pub fn senior_directory(&self) -> Result<Vec<HistoricalRecord>, MatchError> {
        let records = self.repository.all_records()?;
        let mut records = screen_records(records, AdmittedYearWindow::current());
        records.reverse();
        debug!(seniors = records.len(), "listed senior directory");
        Ok(records)
    }

    pub fn recent_searches(&self, limit: usize) -> Vec<SearchLogEntry> {
        self.recorder.recent(limit).unwrap_or_else(|error| {
            warn!(%error, "search log could not be read");
            Vec::new()
        })
    }

    fn rank(&self, applicant: &ApplicantProfile) -> Result<Vec<GroupedMatch>, MatchError> {
        let records = self.repository.records_for_college(&applicant.college)?;
        debug!(
            college = %applicant.college,
            records = records.len(),
            "fetched alumni records"
        );

        let grouped = aggregate_with_members(applicant, records, AdmittedYearWindow::current());
        info!(
            college = %applicant.college,
            branch = %applicant.bachelors_branch,
            groups = grouped.len(),
            "computed matches"
        );

        self.log_search(applicant, &grouped);
        Ok(grouped)
    }

    fn log_search(&self, applicant: &ApplicantProfile, grouped: &[GroupedMatch]) {
        let entry = SearchLogEntry {
            searched_at: Utc::now(),
            college: applicant.college.clone(),
            bachelors_branch: applicant.bachelors_branch.clone(),
            masters_programs: applicant.masters_programs.clone(),
            work_experience: applicant.work_experience,
            cgpa: applicant.cgpa,
            result_count: grouped.len(),
            top_match: grouped.first().map(|top| top.group.university.clone()),
        };

        if let Err(error) = self.recorder.record(entry) {
            warn!(%error, "search was not recorded");
        }
    }
}

fn detail_view(grouped: GroupedMatch) -> MatchedGroupDetail {
    let seniors = grouped
        .members
        .into_iter()
        .map(|member| SeniorView {
            id: member.record.id,
            name: member.record.name,
            branch: member.record.branch,
            cgpa: member.record.cgpa,
            work_experience: member.record.work_experience,
            admitted_year: member.record.admitted_year,
            tenth_percentage: member.record.tenth_percentage,
            twelfth_percentage: member.record.twelfth_percentage,
            company_sector: member.record.company_sector,
            designation: member.record.designation,
            linkedin_profile: member.record.linkedin_profile,
            work_experiences: member.record.work_experiences,
            match_score: member.score,
        })
        .collect();

    MatchedGroupDetail {
        group: grouped.group,
        seniors,
    }
}

/// The only failure a match can have: the alumni store could not be read.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    UpstreamFetch(#[from] RepositoryError),
}
