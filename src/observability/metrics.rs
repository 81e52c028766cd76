//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_upstream_fetches_total` (counter): upstream fetches by outcome
//! - `catalog_upstream_fetch_duration_seconds` (histogram): fetch + rewrite latency
//! - `catalog_brands` (gauge): brands known to the catalog
//! - `catalog_model_entries` (gauge): (brand, model) pairs with known generations
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter and serve it on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one upstream fetch.
pub fn record_fetch(outcome: &'static str, start_time: Instant) {
    counter!("catalog_upstream_fetches_total", "outcome" => outcome).increment(1);
    histogram!("catalog_upstream_fetch_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

/// Record the current catalog size.
pub fn record_catalog_size(brands: usize, model_entries: usize) {
    gauge!("catalog_brands").set(brands as f64);
    gauge!("catalog_model_entries").set(model_entries as f64);
}
