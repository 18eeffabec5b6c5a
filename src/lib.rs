//! HTTP availability monitor library.
//!
//! Probes a configured list of endpoints on a fixed interval and reports,
//! per host, the cumulative percentage of probes that returned 2xx.

pub mod config;
pub mod error;
pub mod health;
pub mod lifecycle;
pub mod observability;

pub use config::{EndpointConfig, MonitorConfig};
pub use error::MonitorError;
pub use health::{HttpProber, RoundRunner, Scheduler};
pub use lifecycle::{Shutdown, ShutdownSignal};

/// Build the HTTP monitor for `endpoints` and run it until `shutdown` fires.
pub async fn run_monitor(
    endpoints: Vec<EndpointConfig>,
    config: &MonitorConfig,
    shutdown: ShutdownSignal,
) -> Result<(), MonitorError> {
    let prober = HttpProber::new(config.probe_timeout())?;
    let runner = RoundRunner::new(endpoints, prober)?;
    let mut scheduler = Scheduler::new(runner, config.interval());
    scheduler.run(shutdown).await
}
