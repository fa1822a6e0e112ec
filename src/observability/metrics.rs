//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resource_service_requests_total` (counter): requests by method, status
//! - `resource_service_request_duration_seconds` (histogram): latency by method
//!
//! Recording is a no-op until a recorder is installed, so handlers and tests
//! run the same code whether or not the exporter is enabled.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "resource_service_requests_total";
pub const REQUEST_DURATION: &str = "resource_service_request_duration_seconds";

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start_time: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// Middleware recording one counter and one latency sample per request.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;

    record_request(&method, response.status().as_u16(), start_time);
    response
}
