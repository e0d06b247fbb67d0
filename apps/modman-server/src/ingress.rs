use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{HeaderName, HeaderValue, Request};
use axum::{routing::get, Json, Router};
use modman_bootstrap::ServerConfig;
use modules_management::ModulesManagementModule;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a UUID v4 request id when the client did not send one.
#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Health route plus every module's routes, wrapped in the middleware stack.
pub fn build_router(server: &ServerConfig, modules: &ModulesManagementModule) -> Result<Router> {
    check_timeouts(server, modules.updater_timeout());

    let router = Router::new().route("/health", get(health_check));
    let router = modules.register_rest(router)?;
    Ok(apply_middleware_stack(router, server))
}

/// A request timeout shorter than the updater's budget answers 408 before the
/// updater's result or error arrives. Returns false (and warns) in that case.
fn check_timeouts(server: &ServerConfig, updater_timeout: Option<Duration>) -> bool {
    let request_timeout = Duration::from_secs(server.timeout_sec);
    match updater_timeout {
        Some(updater) if server.timeout_sec > 0 && request_timeout < updater => {
            tracing::warn!(
                timeout_sec = server.timeout_sec,
                updater_timeout_secs = updater.as_secs(),
                "server.timeout_sec is shorter than the updater timeout; slow updates will end in 408"
            );
            false
        }
        _ => true,
    }
}

/// Middleware order, outermost first:
/// SetRequestId -> PropagateRequestId -> Trace -> Timeout -> BodyLimit -> routes
fn apply_middleware_stack(mut router: Router, server: &ServerConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router = router.layer(RequestBodyLimitLayer::new(server.body_limit_bytes));

    if server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(server.timeout_sec)));
    }

    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis() as u64);
                },
            ),
    );

    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(router: Router, bind_addr: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", bind_addr))?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
