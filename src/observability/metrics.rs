//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, latency, store misses)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `member_groups_requests_total` (counter): requests by operation, status
//! - `member_groups_request_duration_seconds` (histogram): latency distribution
//! - `member_groups_store_misses_total` (counter): lookups that found nothing, by store
//!
//! Recording before [`init_metrics`] is a no-op, so handlers and tests do not
//! need an exporter installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    ::metrics::counter!(
        "member_groups_requests_total",
        "operation" => operation,
        "status" => status.clone()
    )
    .increment(1);
    ::metrics::histogram!(
        "member_groups_request_duration_seconds",
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a lookup that found nothing in `store`.
pub fn record_store_miss(store: &'static str) {
    ::metrics::counter!("member_groups_store_misses_total", "store" => store).increment(1);
}
