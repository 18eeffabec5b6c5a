//! HTTP availability monitor.
//!
//! ```text
//!   endpoints.yaml ──▶ config ──▶ health::aggregator (hosts + counters)
//!                                        │
//!   SIGINT/SIGTERM ──▶ lifecycle ──▶ health::scheduler ──▶ health::round ──▶ health::probe ──▶ endpoints
//!                                        │
//!                                        ▼
//!                      stdout: "<host> has <pct>% availability percentage."
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use availability_monitor::config::{load_endpoints, MonitorConfig};
use availability_monitor::lifecycle::{signals, Shutdown};
use availability_monitor::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "availability-monitor")]
#[command(about = "Periodically probes HTTP endpoints and reports availability per host", long_about = None)]
struct Cli {
    /// Endpoint file (YAML sequence, or TOML with an [[endpoints]] array)
    config: PathBuf,

    /// Seconds between the end of one round and the start of the next
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Per-probe timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,
}

impl Cli {
    fn monitor_config(&self) -> MonitorConfig {
        let mut config = MonitorConfig::default();
        if let Some(secs) = self.interval_secs {
            config.interval_secs = secs;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout_ms = ms;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging();

    tracing::info!(filename = %cli.config.display(), "availability-monitor starting");

    let config = cli.monitor_config();
    let endpoints = load_endpoints(&cli.config).map_err(|e| {
        tracing::error!(filename = %cli.config.display(), error = %e, "Failed to load endpoints");
        e
    })?;

    tracing::info!(
        endpoints = endpoints.len(),
        interval_secs = config.interval_secs,
        timeout_ms = config.timeout_ms,
        "Configuration loaded"
    );

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown).map_err(|e| {
        tracing::error!(error = %e, "Failed to register signal handlers");
        e
    })?;

    if let Err(e) = availability_monitor::run_monitor(endpoints, &config, signal).await {
        tracing::error!(filename = %cli.config.display(), error = %e, "Monitor stopped");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
