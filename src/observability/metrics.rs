//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, outcome
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//!
//! `outcome` is one of `preflight`, `forwarded`, `config_error`,
//! `validation_error`, `upstream_error`.
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, outcome: &'static str, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();

    metrics::counter!(
        "gateway_requests_total",
        "method" => method.clone(),
        "status" => status.clone(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method,
        "status" => status,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
