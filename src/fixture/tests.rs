use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::error::HarnessError;

use super::*;

async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
    (status, json)
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn users_route_serves_canned_payload() {
    let router = build_router(&FixtureSpec::users_fixture()).expect("build fixture");
    let response = router
        .oneshot(get_request(DEFAULT_USERS_PATH))
        .await
        .expect("users call");

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["users"], DEFAULT_USERS_RESPONSE);
}

#[tokio::test]
async fn empty_users_payload_omits_the_field() {
    let router = build_router(&FixtureSpec::users_fixture_with("")).expect("build fixture");
    let response = router
        .oneshot(get_request(DEFAULT_USERS_PATH))
        .await
        .expect("users call");

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));
}

#[tokio::test]
async fn unregistered_path_yields_json_404() {
    let router = build_router(&FixtureSpec::users_fixture()).expect("build fixture");
    let response = router
        .oneshot(get_request("/missing"))
        .await
        .expect("missing call");

    let (status, json) = response_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "no mock route for GET /missing");
}

#[tokio::test]
async fn bodyless_route_responds_with_empty_body() {
    let spec = FixtureSpec {
        mode: FixtureMode::Test,
        routes: vec![MockRoute {
            method: MockMethod::Delete,
            path: "/users/1".to_string(),
            status: 204,
            body: None,
        }],
    };
    let router = build_router(&spec).expect("build fixture");
    let response = router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("delete call");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn verbose_mode_builds_and_dispatches() {
    let spec = FixtureSpec {
        mode: FixtureMode::Verbose,
        ..FixtureSpec::users_fixture()
    };
    let router = build_router(&spec).expect("build fixture");
    let response = router
        .oneshot(get_request(DEFAULT_USERS_PATH))
        .await
        .expect("users call");
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn rejects_empty_route_set() {
    let spec = FixtureSpec {
        mode: FixtureMode::Test,
        routes: Vec::new(),
    };
    let err = build_router(&spec).unwrap_err();
    match err {
        HarnessError::InvalidFixture { reason } => {
            assert!(reason.contains("at least one route"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_duplicate_routes() {
    let mut spec = FixtureSpec::users_fixture();
    spec.routes.push(spec.routes[0].clone());
    let err = spec.validate().unwrap_err();
    match err {
        HarnessError::InvalidFixture { reason } => {
            assert!(reason.contains("duplicate route"));
            assert!(reason.contains("GET /users"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_relative_paths_and_bad_status_codes() {
    let mut spec = FixtureSpec::users_fixture();
    spec.routes[0].path = "users".to_string();
    assert!(matches!(
        spec.validate(),
        Err(HarnessError::InvalidFixture { .. })
    ));

    let mut spec = FixtureSpec::users_fixture();
    spec.routes[0].status = 1000;
    let err = spec.validate().unwrap_err();
    match err {
        HarnessError::InvalidFixture { reason } => {
            assert!(reason.contains("invalid status code 1000"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn mock_users_round_trips_with_omit_if_empty() {
    let filled = MockUsers::new(DEFAULT_USERS_RESPONSE);
    assert_eq!(
        filled.to_body(),
        serde_json::json!({ "users": "mock response" })
    );

    let empty = MockUsers::default();
    assert_eq!(empty.to_body(), serde_json::json!({}));

    // Absent field decodes back to the default, so the two sides agree.
    let decoded: MockUsers = serde_json::from_str("{}").expect("decode empty object");
    assert_eq!(decoded, empty);
}

#[test]
fn fixture_spec_survives_serde_round_trip() {
    let spec = FixtureSpec::users_fixture();
    let json = serde_json::to_string(&spec).expect("serialize spec");
    let parsed: FixtureSpec = serde_json::from_str(&json).expect("parse spec");
    assert_eq!(parsed, spec);
}
