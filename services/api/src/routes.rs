use crate::infra::AppState;
use alumni_match::error::AppError;
use alumni_match::import::sector_options;
use alumni_match::matching::{match_router, AlumniRepository, MatchService, SearchRecorder};
use alumni_match::waitlist::{self, WaitlistOutcome};
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";
const ADMIN_SEARCH_LIMIT: usize = 100;

pub(crate) fn with_service_routes<R, S>(service: Arc<MatchService<R, S>>) -> Router
where
    R: AlumniRepository + 'static,
    S: SearchRecorder + 'static,
{
    match_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v2/sectors", get(sectors_endpoint))
        .route("/api/waitlist", post(waitlist_endpoint))
        .route("/api/admin/auth", post(admin_auth_endpoint))
        .route("/api/admin/waitlist", get(admin_waitlist_endpoint))
        .route("/api/admin/searches", get(admin_searches_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Choices for the find-seniors sector filter.
pub(crate) async fn sectors_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "sectors": sector_options() }))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WaitlistRequest {
    #[serde(default)]
    pub(crate) email: Option<String>,
}

pub(crate) async fn waitlist_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<WaitlistRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload?;
    let email = request.email.unwrap_or_default();
    let message = match waitlist::join(state.waitlist.as_ref(), &email)? {
        WaitlistOutcome::Added => "Successfully added to waitlist for early access",
        WaitlistOutcome::AlreadyRegistered => "Email already registered for early access",
    };

    Ok(Json(json!({ "success": true, "message": message })))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AdminAuthRequest {
    #[serde(default)]
    pub(crate) password: Option<String>,
}

pub(crate) async fn admin_auth_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AdminAuthRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };

    match check_admin(&state, request.password.as_deref()) {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn admin_waitlist_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = check_admin(&state, admin_header(&headers)) {
        return response;
    }

    match state.waitlist.entries() {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn admin_searches_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = check_admin(&state, admin_header(&headers)) {
        return response;
    }

    match state.search_log.recent(ADMIN_SEARCH_LIMIT) {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => {
            error!(error = %err, "search listing failed");
            internal_error()
        }
    }
}

fn admin_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn check_admin(state: &AppState, supplied: Option<&str>) -> Result<(), Response> {
    let Some(expected) = state.admin_password.as_deref() else {
        warn!("admin request rejected: ADMIN_PASSWORD is not set");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Admin authentication not configured", "success": false })),
        )
            .into_response());
    };

    match supplied {
        Some(password) if !password.is_empty() && password == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid password", "success": false })),
        )
            .into_response()),
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
