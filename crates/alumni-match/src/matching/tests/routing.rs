use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::matching::router::match_handler;
use crate::matching::{MatchRequest, MatchService};

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn query() -> serde_json::Value {
    json!({
        "college": "VJTI, Mumbai",
        "bachelors_branch": "Information Technology",
        "masters_programs": ["MS CS"],
        "work_experience": 3,
        "cgpa": 8.5
    })
}

#[tokio::test]
async fn v1_route_returns_ranked_universities() {
    let mut it_alumnus = alumnus(1, "US University", "US", Some(2019));
    it_alumnus.branch = "IT".to_string();
    let router = router_with_records(vec![
        it_alumnus,
        alumnus(2, "IIIT H", "INDIA", Some(2020)),
    ]);

    let response = router
        .oneshot(post_json("/api/v1/match", query()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["count"], json!(1));
    let first = &payload["universities"][0];
    assert_eq!(first["university"], json!("US University"));
    assert_eq!(first["alumni_count"], json!(1));
    assert_eq!(first["admitted_year_range"], json!({ "min": 2019, "max": 2019 }));
    assert!(first["match_percentage"].as_u64().expect("numeric score") >= 50);
}

#[tokio::test]
async fn v2_route_includes_seniors() {
    let router = router_with_records(vec![alumnus(1, "US University", "US", Some(2019))]);

    let mut body = query();
    body["bachelors_branch"] = json!("Computer Science");
    let response = router
        .oneshot(post_json("/api/v2/match", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let first = &payload["universities"][0];
    assert_eq!(first["university"], json!("US University"));
    assert_eq!(first["seniors"][0]["name"], json!("Alumnus 1"));
    assert_eq!(first["seniors"][0]["match_score"], json!(85));
}

#[tokio::test]
async fn invalid_profile_is_a_bad_request() {
    let router = router_with_records(Vec::new());
    let mut body = query();
    body["cgpa"] = json!(11);

    let response = router
        .oneshot(post_json("/api/v1/match", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("Valid CGPA (0-10) is required"));
}

#[tokio::test]
async fn fetch_failure_is_an_internal_error() {
    let service = Arc::new(MatchService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryRecorder::default()),
    ));
    let request: MatchRequest = serde_json::from_value(query()).expect("request parses");

    let response = match_handler::<UnavailableRepository, MemoryRecorder>(
        State(service),
        Ok(axum::Json(request)),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("database offline"), "{message}");
}

#[tokio::test]
async fn empty_results_are_still_successful() {
    let router = router_with_records(Vec::new());
    let response = router
        .oneshot(post_json("/api/v1/match", query()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], json!(0));
    assert_eq!(payload["universities"], json!([]));
}

#[tokio::test]
async fn camel_case_form_body_is_accepted() {
    let router = router_with_records(vec![alumnus(1, "US University", "US", Some(2019))]);
    let body = json!({
        "college": "VJTI, Mumbai",
        "bachelorsBranch": "Computer Science",
        "mastersPrograms": ["MS CS"],
        "workExperience": 3,
        "cgpa": 8.5
    });

    let response = router
        .oneshot(post_json("/api/v1/match", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], json!(1));
    assert_eq!(payload["universities"][0]["match_percentage"], json!(85));
}

#[tokio::test]
async fn mistyped_field_is_a_json_bad_request() {
    let router = router_with_records(Vec::new());
    let mut body = query();
    body["cgpa"] = json!("8.5");

    let response = router
        .oneshot(post_json("/api/v2/match", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("cgpa"), "{message}");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = router_with_records(Vec::new());
    let request = Request::post("/api/v1/match")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"college\":"))
        .expect("request builds");

    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn senior_directory_lists_screened_records() {
    let router = router_with_records(vec![
        alumnus(1, "US University", "US", Some(44558)),
        alumnus(2, "IIIT Hyderabad", "INDIA", Some(2020)),
        alumnus(3, "Georgia Tech", "US", Some(2021)),
    ]);

    let response = router
        .oneshot(
            Request::get("/api/v2/seniors")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let seniors = payload.as_array().expect("array payload");
    assert_eq!(seniors.len(), 2);
    assert_eq!(seniors[0]["university"], json!("Georgia Tech"));
    assert_eq!(seniors[0]["admitted_year"], json!(2021));
    assert_eq!(seniors[1]["university"], json!("US University"));
    assert_eq!(seniors[1]["admitted_year"], json!(null));
    assert_eq!(seniors[1]["linkedin_profile"], json!("https://linkedin.com/in/alumnus-1"));
}
