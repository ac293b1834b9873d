//! # HTTP Metrics
//!
//! Prometheus counters and latency histogram for every routed request.
//!
//! ```text
//! request ──► track_metrics ──► handler ──► response
//!                  │                            │
//!                  └── start timer              ├── http_requests_total{method,endpoint,status} += 1
//!                                               └── http_request_duration_seconds.record(elapsed)
//! ```
//!
//! `endpoint` is the route template (`/api/products/{id}`), not the raw
//! path, so label cardinality stays bounded.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Installs the global Prometheus recorder. Call once, from `main`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe();
    Ok(handle)
}

/// A handle that renders an empty registry without touching the global
/// recorder. Used by tests that build several routers.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn describe() {
    describe_counter!(REQUESTS_TOTAL, "Total HTTP requests");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "HTTP request latency");
}

/// Route template for the request, `None` when no route matched.
///
/// Raw paths carry ids and user ids, so they are never used as labels.
pub fn endpoint_label(req: &Request) -> Option<String> {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
}

/// Middleware recording request count and latency for matched routes.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let Some(endpoint) = endpoint_label(&req) else {
        return next.run(req).await;
    };

    let start = Instant::now();
    let method = req.method().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(REQUESTS_TOTAL, "method" => method, "endpoint" => endpoint, "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION).record(start.elapsed().as_secs_f64());

    response
}
