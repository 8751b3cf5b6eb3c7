//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): HTTP requests by status
//! - `site_render_duration_seconds` (histogram): server render latency
//! - `site_navigations_total` (counter): client navigations by outcome
//! - `site_redirects_total` (counter): redirects answered by the server

use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record one served page request.
pub fn record_request(status: u16, start: Instant) {
    let status = status.to_string();
    metrics::counter!("site_requests_total", "status" => status.clone()).increment(1);
    metrics::histogram!("site_render_duration_seconds", "status" => status)
        .record(start.elapsed().as_secs_f64());
}

/// Record a redirect answered at the HTTP boundary.
pub fn record_redirect() {
    metrics::counter!("site_redirects_total").increment(1);
}

/// Record a committed client navigation.
pub fn record_navigation(not_found: bool) {
    let outcome = if not_found { "not_found" } else { "matched" };
    metrics::counter!("site_navigations_total", "outcome" => outcome).increment(1);
}
