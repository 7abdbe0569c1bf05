use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::Request;
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, patch, post, put, MethodRouter};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::error::HarnessError;

use super::spec::{FixtureMode, FixtureSpec, MockMethod, MockRoute};

/// Error shape emitted by the fixture for anything it did not register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build the axum router described by a [`FixtureSpec`].
///
/// The spec is validated first so malformed test descriptions fail here,
/// at construction, rather than as puzzling request-time behavior. The
/// returned router holds no external resources; dropping it is cleanup
/// enough.
pub fn build_router(spec: &FixtureSpec) -> Result<Router, HarnessError> {
    spec.validate()?;

    let mut router = Router::new();
    for route in &spec.routes {
        router = router.route(&route.path, method_router(route));
    }
    router = router.fallback(unknown_route);

    if spec.mode == FixtureMode::Verbose {
        router = router.layer(middleware::from_fn(trace_request));
    }

    Ok(router)
}

/// Serve a fixture router on a real listener until `shutdown` fires.
///
/// The exercise runner never needs this; it exists so a fixture can be
/// poked manually with curl while authoring suites.
pub async fn run_fixture_server(
    spec: &FixtureSpec,
    addr: SocketAddr,
    shutdown: oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let router = build_router(spec)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding fixture listener")?;
    tracing::info!(%addr, routes = spec.routes.len(), "fixture router listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.await;
        })
        .await
        .context("serving fixture router")?;
    Ok(())
}

fn method_router(route: &MockRoute) -> MethodRouter {
    let reply = CannedReply {
        // Validated by FixtureSpec::validate before we get here.
        status: StatusCode::from_u16(route.status).unwrap_or(StatusCode::OK),
        body: route.body.clone(),
    };
    let handler = move || async move { reply.into_response() };
    match route.method {
        MockMethod::Get => get(handler),
        MockMethod::Post => post(handler),
        MockMethod::Put => put(handler),
        MockMethod::Delete => delete(handler),
        MockMethod::Patch => patch(handler),
    }
}

/// Fixed response baked into a registered route's handler closure.
#[derive(Debug, Clone)]
struct CannedReply {
    status: StatusCode,
    body: Option<serde_json::Value>,
}

impl IntoResponse for CannedReply {
    fn into_response(self) -> Response {
        match self.body {
            Some(value) => (self.status, Json(value)).into_response(),
            None => self.status.into_response(),
        }
    }
}

async fn unknown_route(method: Method, uri: Uri) -> Response {
    let body = ErrorBody {
        error: format!("no mock route for {} {}", method, uri.path()),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

async fn trace_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::debug!(%method, %uri, status = %response.status(), "fixture handled request");
    response
}
