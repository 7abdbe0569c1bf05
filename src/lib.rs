// Route Harness - contract tests for mock HTTP routes
// Declarative fixture routers driven by an in-memory exercise runner

// Module declarations
pub mod config;
pub mod error;
pub mod fixture;
pub mod harness;

// Re-exports for convenience
pub use config::RunnerConfig;
pub use error::HarnessError;
pub use fixture::{build_router, FixtureMode, FixtureSpec, MockRoute, MockUsers};
pub use harness::{
    diff_values, run_case, run_suite, CaseOutcome, CaseSuite, Expected, RouteCase, SuiteReport,
};
