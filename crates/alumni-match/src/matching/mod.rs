//! Alumni-to-applicant similarity scoring and per-program aggregation.
//!
//! Records flow fetch → [`policy::screen_records`] → [`scoring::score`] →
//! [`aggregate::aggregate`]. Everything after the fetch is pure.

pub mod aggregate;
pub mod domain;
pub mod normalize;
pub mod policy;
pub mod repository;
pub mod request;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, aggregate_with_members, GroupedMatch, ScoredRecord};
pub use domain::{
    AlumniId, ApplicantProfile, HistoricalRecord, MatchedGroup, MatchedGroupDetail, SeniorView,
    WorkExperienceEntry, YearRange,
};
pub use normalize::fields_match;
pub use policy::{is_excluded_institution, AdmittedYearWindow};
pub use repository::{
    AlumniRepository, RecorderError, RepositoryError, SearchLogEntry, SearchRecorder,
};
pub use request::{MatchRequest, ProfileValidationError};
pub use router::match_router;
pub use scoring::{score, score_breakdown, MatchFactor, ScoreBreakdown, ScoreComponent};
pub use service::{MatchError, MatchService};
