//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monitor_probes_total` (counter): probes by host and outcome
//! - `monitor_host_availability_percent` (gauge): cumulative availability per host
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until a
//!   recorder is installed
//! - Prometheus exposition is opt-in

use std::net::SocketAddr;

use ::metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(host: &str, available: bool) {
    let outcome = if available { "success" } else { "fail" };
    counter!("monitor_probes_total", "host" => host.to_string(), "outcome" => outcome).increment(1);
}

pub fn record_availability(host: &str, percent: u8) {
    gauge!("monitor_host_availability_percent", "host" => host.to_string()).set(f64::from(percent));
}
