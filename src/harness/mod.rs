//! Route exercise runner.
//!
//! Takes a declarative [`RouteCase`], builds a fresh fixture router for it,
//! drives a synthetic request through the router entirely in memory via
//! `tower::ServiceExt::oneshot`, and checks the captured response against
//! the case's expectations. Assertion mismatches are accumulated as
//! non-fatal [`CaseFailure`]s so one run reports everything wrong with a
//! case; only a malformed case description aborts early.

mod case;
mod diff;
mod report;
mod runner;
mod suite;


pub use case::{Expected, RouteCase};
pub use diff::diff_values;
pub use report::{CaseFailure, CaseOutcome, SuiteReport};
pub use runner::{run_case, run_suite};
pub use suite::CaseSuite;
