//! Declarative description of a fixture router.
//!
//! Suites carry their fixture inline as JSON, so everything here derives
//! serde with defaults chosen to keep hand-written suite files short. The
//! canonical fixture — one `GET /users` route answering 200 with a
//! [`MockUsers`] payload — is what the built-in smoke suite exercises.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::HarnessError;

/// Path of the canonical mocked route.
pub const DEFAULT_USERS_PATH: &str = "/users";

/// Payload string served by the canonical mocked route.
pub const DEFAULT_USERS_RESPONSE: &str = "mock response";

/// Operating mode for the fixture router.
///
/// Passed explicitly through the spec instead of flipping a process-wide
/// switch, so fixtures built in parallel never observe each other's mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureMode {
    /// Quiet mode for automated tests; no per-request logging layer.
    #[default]
    Test,
    /// Logs every request/response pair through `tracing`.
    Verbose,
}

/// HTTP methods the fixture knows how to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MockMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl MockMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MockMethod::Get => "GET",
            MockMethod::Post => "POST",
            MockMethod::Put => "PUT",
            MockMethod::Delete => "DELETE",
            MockMethod::Patch => "PATCH",
        }
    }
}

/// One canned route served by the fixture router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockRoute {
    pub method: MockMethod,
    pub path: String,
    #[serde(default = "default_status")]
    pub status: u16,
    /// Canned JSON body; `None` responds with an empty body.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_status() -> u16 {
    200
}

/// Full description of a fixture router instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSpec {
    #[serde(default)]
    pub mode: FixtureMode,
    pub routes: Vec<MockRoute>,
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self::users_fixture()
    }
}

impl FixtureSpec {
    /// The canonical single-route fixture: `GET /users` answering 200 with
    /// `{"users": "mock response"}`.
    pub fn users_fixture() -> Self {
        Self::users_fixture_with(DEFAULT_USERS_RESPONSE)
    }

    /// Canonical fixture with an overridden `users` payload string.
    pub fn users_fixture_with(users: impl Into<String>) -> Self {
        let payload = MockUsers {
            users: users.into(),
        };
        Self {
            mode: FixtureMode::Test,
            routes: vec![MockRoute {
                method: MockMethod::Get,
                path: DEFAULT_USERS_PATH.to_string(),
                status: 200,
                body: Some(payload.to_body()),
            }],
        }
    }

    /// Validate invariants the router builder relies on.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.routes.is_empty() {
            return Err(HarnessError::invalid_fixture(
                "fixture must register at least one route",
            ));
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !route.path.starts_with('/') {
                return Err(HarnessError::invalid_fixture(format!(
                    "route path {:?} must start with '/'",
                    route.path
                )));
            }
            if StatusCode::from_u16(route.status).is_err() {
                return Err(HarnessError::invalid_fixture(format!(
                    "route {} {} has invalid status code {}",
                    route.method.as_str(),
                    route.path,
                    route.status
                )));
            }
            if !seen.insert((route.method, route.path.clone())) {
                return Err(HarnessError::invalid_fixture(format!(
                    "duplicate route registered: {} {}",
                    route.method.as_str(),
                    route.path
                )));
            }
        }
        Ok(())
    }
}

/// Payload shape of the canonical mocked handler.
///
/// `users` is omitted from serialized output when empty and an absent field
/// deserializes back to the empty string, so "field absent" and "field
/// present but empty" compare equal through this typed slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockUsers {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub users: String,
}

impl MockUsers {
    pub fn new(users: impl Into<String>) -> Self {
        Self {
            users: users.into(),
        }
    }

    /// Serialize into the JSON value a [`MockRoute`] carries as its body.
    pub fn to_body(&self) -> serde_json::Value {
        // A struct of one string field cannot fail to serialize.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
