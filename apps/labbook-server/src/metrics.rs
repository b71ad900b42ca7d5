//! Prometheus metrics for labbook-server.
//!
//! Rendered in Prometheus format at the `/metrics` endpoint.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    describe_counter!(
        "labbook_requests_total",
        "Total number of API requests processed"
    );
    describe_histogram!(
        "labbook_request_duration_seconds",
        "Duration of API requests in seconds"
    );
    describe_counter!(
        "labbook_errors_total",
        "Total number of API errors by error kind"
    );

    handle
}

/// Record a successful request.
pub fn record_request(op: &'static str, duration: std::time::Duration) {
    counter!("labbook_requests_total", "op" => op, "status" => "ok").increment(1);
    histogram!("labbook_request_duration_seconds", "op" => op).record(duration.as_secs_f64());
}

/// Record a failed request.
pub fn record_request_error(op: &'static str, kind: &'static str) {
    counter!("labbook_requests_total", "op" => op, "status" => "error").increment(1);
    counter!("labbook_errors_total", "op" => op, "kind" => kind).increment(1);
}
