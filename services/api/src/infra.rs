use alumni_match::matching::{
    AlumniRepository, HistoricalRecord, RecorderError, RepositoryError, SearchLogEntry,
    SearchRecorder,
};
use alumni_match::waitlist::{WaitlistEntry, WaitlistError, WaitlistOutcome, WaitlistStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

/// Searches kept for the admin listing before the oldest are dropped.
const SEARCH_LOG_CAPACITY: usize = 1_000;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) admin_password: Option<Arc<str>>,
    pub(crate) waitlist: Arc<dyn WaitlistStore>,
    pub(crate) search_log: Arc<dyn SearchRecorder>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlumniRepository {
    records: Arc<RwLock<Vec<HistoricalRecord>>>,
}

impl InMemoryAlumniRepository {
    pub(crate) fn with_records(records: Vec<HistoricalRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl AlumniRepository for InMemoryAlumniRepository {
    fn records_for_college(&self, college: &str) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("alumni store lock poisoned".to_string()))?;
        let college = college.trim();
        Ok(guard
            .iter()
            .filter(|record| record.college.trim().eq_ignore_ascii_case(college))
            .cloned()
            .collect())
    }

    fn all_records(&self) -> Result<Vec<HistoricalRecord>, RepositoryError> {
        self.records
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| RepositoryError::Unavailable("alumni store lock poisoned".to_string()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySearchLog {
    entries: Arc<Mutex<VecDeque<SearchLogEntry>>>,
}

impl SearchRecorder for InMemorySearchLog {
    fn record(&self, entry: SearchLogEntry) -> Result<(), RecorderError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| RecorderError::Unavailable("search log lock poisoned".to_string()))?;
        if guard.len() == SEARCH_LOG_CAPACITY {
            guard.pop_front();
        }
        guard.push_back(entry);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, RecorderError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| RecorderError::Unavailable("search log lock poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryWaitlist {
    entries: Arc<Mutex<Vec<WaitlistEntry>>>,
}

impl WaitlistStore for InMemoryWaitlist {
    fn insert_if_absent(&self, entry: WaitlistEntry) -> Result<WaitlistOutcome, WaitlistError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| WaitlistError::Unavailable("waitlist lock poisoned".to_string()))?;
        if guard.iter().any(|existing| existing.email == entry.email) {
            return Ok(WaitlistOutcome::AlreadyRegistered);
        }
        guard.push(entry);
        Ok(WaitlistOutcome::Added)
    }

    fn entries(&self) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| WaitlistError::Unavailable("waitlist lock poisoned".to_string()))?;
        Ok(guard.iter().rev().cloned().collect())
    }
}
