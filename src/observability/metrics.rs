//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_exception_bypass_total` (counter): bypass decisions by `outcome`
//!   (`bypassed` or `validated`)
//! - `gateway_validation_rejected_total` (counter): requests refused by the
//!   validation stage

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const BYPASS_DECISIONS: &str = "gateway_exception_bypass_total";
pub const VALIDATION_REJECTED: &str = "gateway_validation_rejected_total";

/// Start the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Count one bypass decision.
pub fn record_bypass_decision(bypassed: bool) {
    let outcome = if bypassed { "bypassed" } else { "validated" };
    ::metrics::counter!(BYPASS_DECISIONS, "outcome" => outcome).increment(1);
}

pub fn record_validation_rejected() {
    ::metrics::counter!(VALIDATION_REJECTED).increment(1);
}
