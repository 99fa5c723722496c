use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{AlumniId, ApplicantProfile, HistoricalRecord};
use crate::matching::repository::{
    AlumniRepository, RecorderError, RepositoryError, SearchLogEntry, SearchRecorder,
};
use crate::matching::{match_router, MatchService};

pub(super) fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        college: "VJTI, Mumbai".to_string(),
        bachelors_branch: "Computer Science".to_string(),
        masters_programs: vec!["MS CS".to_string()],
        work_experience: 3.0,
        cgpa: 8.5,
        tenth_percentage: None,
        twelfth_percentage: None,
        company_sector: None,
        designation: None,
        research_papers: None,
        publications: None,
    }
}

pub(super) fn alumnus(
    id: u32,
    university: &str,
    location: &str,
    admitted_year: Option<i32>,
) -> HistoricalRecord {
    HistoricalRecord {
        id: AlumniId(format!("alum-{id:06}")),
        name: format!("Alumnus {id}"),
        college: "VJTI, Mumbai".to_string(),
        university: university.to_string(),
        course: Some("MS CS".to_string()),
        location: Some(location.to_string()),
        branch: "Computer Science".to_string(),
        admitted_year,
        cgpa: 8.5,
        work_experience: 3.0,
        tenth_percentage: None,
        twelfth_percentage: None,
        company_sector: Some("Technology".to_string()),
        designation: Some("Software Engineer".to_string()),
        linkedin_profile: Some(format!("https://linkedin.com/in/alumnus-{id}")),
        work_experiences: Vec::new(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<HistoricalRecord>>>,
}

impl MemoryRepository {
    pub(super) fn with_records(records: Vec<HistoricalRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl AlumniRepository for MemoryRepository {
    fn records_for_college(&self, college: &str) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.college == college)
            .cloned()
            .collect())
    }

    fn all_records(&self) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl AlumniRepository for UnavailableRepository {
    fn records_for_college(&self, _college: &str) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all_records(&self) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecorder {
    entries: Arc<Mutex<Vec<SearchLogEntry>>>,
}

impl SearchRecorder for MemoryRecorder {
    fn record(&self, entry: SearchLogEntry) -> Result<(), RecorderError> {
        self.entries
            .lock()
            .expect("recorder mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, RecorderError> {
        let guard = self.entries.lock().expect("recorder mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct BrokenRecorder;

impl SearchRecorder for BrokenRecorder {
    fn record(&self, _entry: SearchLogEntry) -> Result<(), RecorderError> {
        Err(RecorderError::Unavailable("disk full".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<SearchLogEntry>, RecorderError> {
        Err(RecorderError::Unavailable("disk full".to_string()))
    }
}

pub(super) fn build_service(
    records: Vec<HistoricalRecord>,
) -> (
    MatchService<MemoryRepository, MemoryRecorder>,
    Arc<MemoryRecorder>,
) {
    let recorder = Arc::new(MemoryRecorder::default());
    let service = MatchService::new(
        Arc::new(MemoryRepository::with_records(records)),
        recorder.clone(),
    );
    (service, recorder)
}

pub(super) fn router_with_records(records: Vec<HistoricalRecord>) -> axum::Router {
    let (service, _) = build_service(records);
    match_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
