// Error types for the route harness
//
// Everything in this module is fatal to the test case that triggered it:
// a malformed fixture spec, an unbuildable synthetic request, or an
// unreadable suite file. Assertion failures observed while exercising a
// case are deliberately NOT errors; they are recorded as
// `harness::CaseFailure` values so a single run can report all of them.

use std::fmt;

/// Fatal harness failures.
///
/// These indicate a broken test description, not a failure of the router
/// under test, so callers abort the affected case instead of recording a
/// non-fatal assertion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The fixture spec cannot be turned into a router.
    InvalidFixture { reason: String },

    /// A synthetic request could not be constructed from the case.
    RequestBuild { reason: String },

    /// A case suite file could not be read or parsed.
    SuiteLoad { reason: String },
}

impl HarnessError {
    pub fn invalid_fixture(reason: impl Into<String>) -> Self {
        HarnessError::InvalidFixture {
            reason: reason.into(),
        }
    }

    pub fn request_build(reason: impl Into<String>) -> Self {
        HarnessError::RequestBuild {
            reason: reason.into(),
        }
    }

    pub fn suite_load(reason: impl Into<String>) -> Self {
        HarnessError::SuiteLoad {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::InvalidFixture { reason } => {
                write!(f, "invalid fixture spec: {}", reason)
            }
            HarnessError::RequestBuild { reason } => {
                write!(f, "couldn't create request: {}", reason)
            }
            HarnessError::SuiteLoad { reason } => {
                write!(f, "failed to load case suite: {}", reason)
            }
        }
    }
}

impl std::error::Error for HarnessError {}
