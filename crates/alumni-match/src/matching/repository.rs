use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::HistoricalRecord;

/// Read access to alumni records. Implementations must return fresh data on every call.
pub trait AlumniRepository: Send + Sync {
    fn records_for_college(&self, college: &str) -> Result<Vec<HistoricalRecord>, RepositoryError>;
    /// Every stored record in insertion order, regardless of college.
    fn all_records(&self) -> Result<Vec<HistoricalRecord>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("alumni store unavailable: {0}")]
    Unavailable(String),
}

/// Summary of a completed search, kept for the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchLogEntry {
    pub searched_at: DateTime<Utc>,
    pub college: String,
    pub bachelors_branch: String,
    pub masters_programs: Vec<String>,
    pub work_experience: f64,
    pub cgpa: f64,
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_match: Option<String>,
}

/// Outbound hook recording searches (e.g. a database table or an audit log).
pub trait SearchRecorder: Send + Sync {
    fn record(&self, entry: SearchLogEntry) -> Result<(), RecorderError>;
    fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, RecorderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("search log unavailable: {0}")]
    Unavailable(String),
}
