//! Outcome and report types produced by the exercise runner.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// One recorded, non-fatal assertion failure.
///
/// The runner keeps going after recording one of these so a single pass
/// surfaces every problem with a case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseFailure {
    /// Response status differed from the expectation.
    Status { want: u16, got: u16 },
    /// Response body could not be read into memory.
    BodyRead { reason: String },
    /// Response body could not be decoded as JSON.
    Decode { reason: String },
    /// The `{"error": ...}` shape carried an unexpected message.
    ErrorShape { want: String, got: String },
    /// Decoded body structurally differed from the expected value.
    BodyMismatch { diff: String },
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseFailure::Status { want, got } => {
                write!(f, "expected response code {} got {}", want, got)
            }
            CaseFailure::BodyRead { reason } => {
                write!(f, "error reading response body: {}", reason)
            }
            CaseFailure::Decode { reason } => {
                write!(f, "error decoding response: {}", reason)
            }
            CaseFailure::ErrorShape { want, got } => {
                write!(f, "expected error message {:?} got {:?}", want, got)
            }
            CaseFailure::BodyMismatch { diff } => {
                write!(f, "response mismatch (want/got)\n{}", diff)
            }
        }
    }
}

/// Everything the runner observed while exercising one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    /// Case label, for report readability.
    pub label: String,
    /// Captured response status code.
    pub status: u16,
    /// Captured response headers (duplicates collapse to the last value).
    pub headers: BTreeMap<String, String>,
    /// Raw response body; kept out of serialized reports.
    #[serde(skip)]
    pub body: Vec<u8>,
    /// Body decoded as JSON, when the case's expectation called for it.
    pub decoded: Option<serde_json::Value>,
    /// All non-fatal failures recorded for this case.
    pub failures: Vec<CaseFailure>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Decode the captured body into a concrete type.
    ///
    /// This is the typed alternative to the value-level structural diff:
    /// optional fields modeled with serde defaults (as `MockUsers` does)
    /// make "absent" and "default" compare equal under `PartialEq`.
    pub fn decode_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Panic with every recorded failure; for use inside tests.
    #[track_caller]
    pub fn assert_passed(&self) {
        if !self.passed() {
            let details: Vec<String> = self.failures.iter().map(|f| f.to_string()).collect();
            panic!("case {} failed:\n{}", self.label, details.join("\n"));
        }
    }
}

/// Aggregated results for a whole suite run.
#[derive(Debug, Serialize)]
pub struct SuiteReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    /// Print a per-case PASS/FAIL table to stdout.
    pub fn print_table(&self) {
        for outcome in &self.outcomes {
            if outcome.passed() {
                println!("PASS {} (status {})", outcome.label, outcome.status);
            } else {
                println!("FAIL {} (status {})", outcome.label, outcome.status);
                for failure in &outcome.failures {
                    println!("  - {failure}");
                }
            }
        }
        println!(
            "{} passed, {} failed",
            self.outcomes.len() - self.failed_count(),
            self.failed_count()
        );
    }

    /// Print the whole report as pretty JSON to stdout.
    pub fn print_json(&self) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}
