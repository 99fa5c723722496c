use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::domain::{HistoricalRecord, MatchedGroup, MatchedGroupDetail};
use super::request::MatchRequest;
use super::repository::{AlumniRepository, SearchRecorder};
use super::service::MatchService;
use crate::error::AppError;

/// Router builder exposing the match and senior-directory endpoints.
pub fn match_router<R, S>(service: Arc<MatchService<R, S>>) -> Router
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    Router::new()
        .route("/api/v1/match", post(match_handler::<R, S>))
        .route("/api/v2/match", post(detailed_match_handler::<R, S>))
        .route("/api/v2/seniors", get(senior_directory_handler::<R, S>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse<T> {
    success: bool,
    count: usize,
    universities: Vec<T>,
}

impl<T> MatchResponse<T> {
    fn new(universities: Vec<T>) -> Self {
        Self {
            success: true,
            count: universities.len(),
            universities,
        }
    }
}

pub(crate) async fn match_handler<R, S>(
    State(service): State<Arc<MatchService<R, S>>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse<MatchedGroup>>, AppError>
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    let Json(request) = payload?;
    let profile = request.into_profile()?;
    let groups = service.compute_matches(&profile)?;
    Ok(Json(MatchResponse::new(groups)))
}

pub(crate) async fn detailed_match_handler<R, S>(
    State(service): State<Arc<MatchService<R, S>>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse<MatchedGroupDetail>>, AppError>
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    let Json(request) = payload?;
    let profile = request.into_profile()?;
    let groups = service.compute_detailed_matches(&profile)?;
    Ok(Json(MatchResponse::new(groups)))
}

pub(crate) async fn senior_directory_handler<R, S>(
    State(service): State<Arc<MatchService<R, S>>>,
) -> Result<Json<Vec<HistoricalRecord>>, AppError>
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    Ok(Json(service.senior_directory()?))
}
