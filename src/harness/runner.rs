//! Drives declarative cases through freshly built fixture routers.
//!
//! Dispatch is entirely in-memory: the router is invoked through
//! `tower::ServiceExt::oneshot`, so no socket is bound and nothing leaks
//! between cases. Request construction failures are fatal to the case (a
//! malformed test description, per the error taxonomy in `crate::error`);
//! every assertion mismatch after that point is recorded and execution
//! continues.

use axum::body::{to_bytes, Body};
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use tower::ServiceExt;

use crate::config::RunnerConfig;
use crate::error::HarnessError;
use crate::fixture::{build_router, ErrorBody, FixtureSpec};

use super::case::{Expected, RouteCase};
use super::diff::diff_values;
use super::report::{CaseFailure, CaseOutcome, SuiteReport};
use super::suite::CaseSuite;

/// Exercise one case against a freshly built fixture router.
pub async fn run_case(
    fixture: &FixtureSpec,
    case: &RouteCase,
    config: &RunnerConfig,
) -> Result<CaseOutcome, HarnessError> {
    case.validate()?;

    // Fresh router per case: isolation comes from construction, not from
    // resetting shared state.
    let router = build_router(fixture)?;
    let request = build_request(case)?;

    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let mut outcome = CaseOutcome {
        label: case.label(),
        status,
        headers,
        body: Vec::new(),
        decoded: None,
        failures: Vec::new(),
    };

    if status != case.want_status {
        outcome.failures.push(CaseFailure::Status {
            want: case.want_status,
            got: status,
        });
        if config.fail_fast {
            return Ok(outcome);
        }
    }

    match to_bytes(response.into_body(), config.max_body_bytes).await {
        Ok(bytes) => outcome.body = bytes.to_vec(),
        Err(err) => {
            outcome.failures.push(CaseFailure::BodyRead {
                reason: err.to_string(),
            });
            // Nothing left to decode without a body.
            return Ok(outcome);
        }
    }

    check_body(case, &mut outcome);

    tracing::debug!(
        case = %outcome.label,
        status = outcome.status,
        failures = outcome.failures.len(),
        "case finished"
    );

    Ok(outcome)
}

/// Run every case in a suite, each against its own fresh router.
pub async fn run_suite(
    suite: &CaseSuite,
    config: &RunnerConfig,
) -> Result<SuiteReport, HarnessError> {
    let mut outcomes = Vec::with_capacity(suite.cases.len());
    for case in &suite.cases {
        outcomes.push(run_case(&suite.fixture, case, config).await?);
    }
    Ok(SuiteReport { outcomes })
}

fn check_body(case: &RouteCase, outcome: &mut CaseOutcome) {
    match &case.expect {
        Expected::StatusOnly => {}
        Expected::Error { message } => {
            // Never decode into the success shape on the error branch.
            let Some(want) = message else {
                return;
            };
            match serde_json::from_slice::<ErrorBody>(&outcome.body) {
                Ok(error_body) => {
                    outcome.decoded = Some(serde_json::json!({ "error": error_body.error }));
                    if error_body.error != *want {
                        outcome.failures.push(CaseFailure::ErrorShape {
                            want: want.clone(),
                            got: error_body.error,
                        });
                    }
                }
                Err(err) => {
                    outcome.failures.push(CaseFailure::Decode {
                        reason: format!("error shape: {err}"),
                    });
                }
            }
        }
        Expected::Json { value } => {
            match serde_json::from_slice::<serde_json::Value>(&outcome.body) {
                Ok(got) => {
                    if let Some(diff) = diff_values(value, &got) {
                        outcome.failures.push(CaseFailure::BodyMismatch { diff });
                    }
                    outcome.decoded = Some(got);
                }
                Err(err) => {
                    outcome.failures.push(CaseFailure::Decode {
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}

fn build_request(case: &RouteCase) -> Result<Request<Body>, HarnessError> {
    let builder = Request::builder()
        .method(case.method.as_str())
        .uri(&case.path);

    let result = match &case.body {
        Some(value) => {
            let bytes = serde_json::to_vec(value)
                .map_err(|err| HarnessError::request_build(err.to_string()))?;
            builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))
        }
        None => builder.body(Body::empty()),
    };

    result.map_err(|err| HarnessError::request_build(err.to_string()))
}
