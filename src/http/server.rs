//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with page, health and metrics handlers
//! - Wire up middleware (tracing, timeout, request ID, security headers)
//! - Serve the initial document for every page request
//! - Drain in-flight requests on shutdown

use std::future::{Future, IntoFuture};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::{error_response, page_response, redirect_response};
use crate::lifecycle::{Shutdown, Site};
use crate::observability::metrics;
use crate::security::apply_security_headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Site,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server for `site`. `metrics` enables the `/metrics` endpoint.
    pub fn new(site: Site, metrics: Option<PrometheusHandle>) -> Self {
        let state = AppState { site, metrics };
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.site.config();
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let security_headers = config.security.enable_headers;

        let router = Router::new()
            .route("/healthz", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id(request),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid));

        if security_headers {
            apply_security_headers(router)
        } else {
            router
        }
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` triggers, then drain for its grace period.
    ///
    /// A trigger that lands before the returned future is first polled still
    /// stops the server.
    pub fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> impl Future<Output = Result<(), std::io::Error>> + Send + 'static {
        let stop = shutdown.wait();
        let deadline = shutdown.wait();
        let grace = shutdown.grace();
        let router = self.router;

        async move {
            let addr = listener.local_addr()?;
            tracing::info!(address = %addr, "HTTP server starting");

            let serve = axum::serve(listener, router)
                .with_graceful_shutdown(stop)
                .into_future();

            tokio::select! {
                result = serve => result?,
                _ = async {
                    deadline.await;
                    tokio::time::sleep(grace).await;
                } => {
                    tracing::warn!(grace_secs = grace.as_secs(), "Grace period elapsed, dropping open connections");
                }
            }

            tracing::info!("HTTP server stopped");
            Ok(())
        }
    }
}

/// Serve the document for any site path.
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start = Instant::now();
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let response = match state.site.render_document(target) {
        Ok((page, html)) => match &page.redirected_from {
            Some(from) => {
                tracing::debug!(from = %from, to = %page.state.path, "Redirecting");
                metrics::record_redirect();
                redirect_response(&page.state.path, uri.query())
            }
            None => page_response(&page, html),
        },
        Err(error) => {
            tracing::error!(path = %uri.path(), error = %error, "Render failed");
            error_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start);
    response
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
