//! Declarative description of one request/response expectation.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::fixture::MockMethod;

/// Expected outcome for the response body of a [`RouteCase`].
///
/// The original harness carried a want-error flag next to a want-value
/// slot and relied on convention to keep them mutually exclusive; here the
/// branch is structural, so a case can only ever drive one assertion path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expected {
    /// Decode the body as JSON and structurally compare it against `value`.
    Json { value: serde_json::Value },
    /// The route answers with the `{"error": ...}` shape. When `message`
    /// is set the decoded error text must match it exactly; without one
    /// only the status code is asserted.
    Error {
        #[serde(default)]
        message: Option<String>,
    },
    /// Only the status code is asserted; the body is ignored.
    StatusOnly,
}

/// Declarative description of one HTTP interaction under test.
///
/// Constructed immutably by the test author; the runner never mutates a
/// case, it reports what it observed through a `CaseOutcome` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCase {
    /// Identifier used in reports; defaults to `METHOD path`.
    #[serde(default)]
    pub id: Option<String>,
    pub method: MockMethod,
    pub path: String,
    /// Optional JSON request body sent with the synthetic request.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
    pub want_status: u16,
    pub expect: Expected,
}

impl RouteCase {
    /// A GET case expecting 200 with no body assertion.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            id: None,
            method: MockMethod::Get,
            path: path.into(),
            body: None,
            want_status: 200,
            expect: Expected::StatusOnly,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_method(mut self, method: MockMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn want_status(mut self, status: u16) -> Self {
        self.want_status = status;
        self
    }

    /// Expect the body to decode to exactly `value`.
    pub fn expect_json(mut self, value: serde_json::Value) -> Self {
        self.expect = Expected::Json { value };
        self
    }

    /// Expect the `{"error": ...}` shape with the given message.
    pub fn expect_error(mut self, message: impl Into<String>) -> Self {
        self.expect = Expected::Error {
            message: Some(message.into()),
        };
        self
    }

    /// Label used when reporting this case.
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{} {}", self.method.as_str(), self.path),
        }
    }

    /// Reject cases the runner cannot build a request from.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if !self.path.starts_with('/') {
            return Err(HarnessError::request_build(format!(
                "case path {:?} must start with '/'",
                self.path
            )));
        }
        Ok(())
    }
}
