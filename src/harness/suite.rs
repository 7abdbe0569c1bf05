//! JSON catalog of route cases.
//!
//! A suite bundles a fixture spec with the cases to run against it, so a
//! whole contract check can live in one hand-editable file. Parsing
//! validates invariants up front and reports descriptive errors instead of
//! failing mid-run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::HarnessError;
use crate::fixture::{FixtureSpec, DEFAULT_USERS_PATH, DEFAULT_USERS_RESPONSE};

use super::case::RouteCase;

/// Machine-readable catalog containing a fixture and its cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSuite {
    pub version: u32,
    /// Fixture served to every case; defaults to the canonical users fixture.
    #[serde(default)]
    pub fixture: FixtureSpec,
    pub cases: Vec<RouteCase>,
}

impl CaseSuite {
    /// Parse suite contents from JSON and validate invariants.
    pub fn from_json(data: &str) -> Result<Self, HarnessError> {
        let suite: CaseSuite = serde_json::from_str(data).map_err(|err| {
            HarnessError::suite_load(format!("failed to parse suite JSON: {err}"))
        })?;
        suite.validate()?;
        Ok(suite)
    }

    /// Load a suite from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarnessError> {
        let contents = std::fs::read_to_string(&path).map_err(|err| {
            HarnessError::suite_load(format!(
                "failed to read {}: {err}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// The built-in smoke suite: the literal users scenario plus the
    /// negative unregistered-path scenario.
    pub fn users_smoke() -> Self {
        Self {
            version: 1,
            fixture: FixtureSpec::users_fixture(),
            cases: vec![
                RouteCase::get(DEFAULT_USERS_PATH)
                    .expect_json(serde_json::json!({ "users": DEFAULT_USERS_RESPONSE })),
                RouteCase::get("/missing")
                    .want_status(404)
                    .expect_error("no mock route for GET /missing"),
            ],
        }
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.version == 0 {
            return Err(HarnessError::suite_load("suite version must be > 0"));
        }
        if self.cases.is_empty() {
            return Err(HarnessError::suite_load(
                "suite must contain at least one case",
            ));
        }
        self.fixture.validate()?;

        let mut seen = HashSet::new();
        for case in &self.cases {
            case.validate()?;
            if !seen.insert(case.label()) {
                return Err(HarnessError::suite_load(format!(
                    "duplicate case label detected: {}",
                    case.label()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::case::Expected;

    fn sample_suite_json() -> String {
        serde_json::json!({
            "version": 1,
            "cases": [
                {
                    "method": "GET",
                    "path": "/users",
                    "want_status": 200,
                    "expect": {
                        "kind": "json",
                        "value": {"users": "mock response"}
                    }
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn parses_valid_suite_with_default_fixture() {
        let suite = CaseSuite::from_json(&sample_suite_json()).unwrap();
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.fixture, FixtureSpec::users_fixture());
        assert_eq!(suite.cases[0].label(), "GET /users");
        assert!(matches!(suite.cases[0].expect, Expected::Json { .. }));
    }

    #[test]
    fn rejects_zero_version() {
        let json = serde_json::json!({
            "version": 0,
            "cases": [
                {"method": "GET", "path": "/users", "want_status": 200,
                 "expect": {"kind": "status_only"}}
            ]
        })
        .to_string();
        let err = CaseSuite::from_json(&json).unwrap_err();
        match err {
            HarnessError::SuiteLoad { reason } => assert!(reason.contains("version")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_case_list() {
        let json = serde_json::json!({"version": 1, "cases": []}).to_string();
        let err = CaseSuite::from_json(&json).unwrap_err();
        match err {
            HarnessError::SuiteLoad { reason } => {
                assert!(reason.contains("at least one case"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_case_labels() {
        let case = serde_json::json!({
            "method": "GET", "path": "/users", "want_status": 200,
            "expect": {"kind": "status_only"}
        });
        let json = serde_json::json!({"version": 1, "cases": [case.clone(), case]}).to_string();
        let err = CaseSuite::from_json(&json).unwrap_err();
        match err {
            HarnessError::SuiteLoad { reason } => {
                assert!(reason.contains("duplicate case label"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_broken_fixture_in_suite() {
        let json = serde_json::json!({
            "version": 1,
            "fixture": {"routes": []},
            "cases": [
                {"method": "GET", "path": "/users", "want_status": 200,
                 "expect": {"kind": "status_only"}}
            ]
        })
        .to_string();
        assert!(matches!(
            CaseSuite::from_json(&json),
            Err(HarnessError::InvalidFixture { .. })
        ));
    }

    #[test]
    fn smoke_suite_is_valid_and_round_trips() {
        let suite = CaseSuite::users_smoke();
        suite.validate().expect("smoke suite validates");
        let json = serde_json::to_string(&suite).expect("serialize suite");
        let parsed = CaseSuite::from_json(&json).expect("reparse suite");
        assert_eq!(parsed, suite);
    }
}
