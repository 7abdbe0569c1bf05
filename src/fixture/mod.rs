//! Router fixture builder.
//!
//! A fixture is an in-memory, test-only axum router described entirely by
//! data: a [`FixtureSpec`] lists the mock routes to register and the
//! operating mode to build them under. Construction validates the spec and
//! fails fast with a descriptive error, so a broken test description never
//! surfaces as a confusing request-time failure. No listening socket is
//! bound unless [`run_fixture_server`] is called explicitly.

mod routes;
mod spec;

#[cfg(test)]
mod tests;

pub use routes::{build_router, run_fixture_server, ErrorBody};
pub use spec::{
    FixtureMode, FixtureSpec, MockMethod, MockRoute, MockUsers, DEFAULT_USERS_PATH,
    DEFAULT_USERS_RESPONSE,
};
