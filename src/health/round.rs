//! One polling round.
//!
//! # Responsibilities
//! - Probe every endpoint once, in declaration order
//! - Classify each outcome and update the owning host's counter
//! - Produce the per-host availability report
//!
//! # Design Decisions
//! - Probes run sequentially; worst-case round time is endpoints × timeout
//! - Probe failures are absorbed as failed probes, never abort the round
//! - Only an unknown endpoint URL (construction bug) is fatal

use std::io::{self, Write};

use reqwest::StatusCode;

use crate::config::EndpointConfig;
use crate::health::aggregator::{EndpointError, HostAggregator, HostKey, InvariantError};
use crate::health::probe::{Probe, ProbeError};
use crate::observability::metrics;

/// A probe counts as available only for a 2xx status.
pub fn is_available(outcome: &Result<StatusCode, ProbeError>) -> bool {
    matches!(outcome, Ok(status) if status.is_success())
}

/// Cumulative availability of one host after a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReport {
    pub host: HostKey,
    pub success: u64,
    pub fail: u64,
    /// `None` while the host has no recorded probes.
    pub availability: Option<u8>,
}

/// Write one line per host with a computed percentage.
pub fn write_report<W: Write>(out: &mut W, reports: &[HostReport]) -> io::Result<()> {
    for report in reports {
        if let Some(percent) = report.availability {
            writeln!(out, "{} has {}% availability percentage.", report.host, percent)?;
        }
    }
    out.flush()
}

/// Owns the endpoint list, the counters and the prober.
pub struct RoundRunner<P> {
    endpoints: Vec<EndpointConfig>,
    aggregator: HostAggregator,
    prober: P,
    rounds: u64,
}

impl<P: Probe> RoundRunner<P> {
    /// Build the host aggregation for `endpoints` and wrap it with `prober`.
    pub fn new(endpoints: Vec<EndpointConfig>, prober: P) -> Result<Self, EndpointError> {
        let aggregator = HostAggregator::build(&endpoints)?;
        tracing::debug!(aggregation = %aggregator.to_json(), "Aggregation maps built");
        Ok(Self::from_parts(endpoints, aggregator, prober))
    }

    /// Assemble a runner from an already built aggregator.
    pub fn from_parts(endpoints: Vec<EndpointConfig>, aggregator: HostAggregator, prober: P) -> Self {
        Self {
            endpoints,
            aggregator,
            prober,
            rounds: 0,
        }
    }

    /// Endpoints in probe order.
    pub fn endpoints(&self) -> &[EndpointConfig] {
        &self.endpoints
    }

    /// Host counters and URL lookup.
    pub fn aggregator(&self) -> &HostAggregator {
        &self.aggregator
    }

    /// Number of completed rounds.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Probe every endpoint once and return the per-host report.
    pub async fn run_round(&mut self) -> Result<Vec<HostReport>, InvariantError> {
        let round = self.rounds + 1;
        tracing::info!(round, endpoints = self.endpoints.len(), "Round started");

        for endpoint in &self.endpoints {
            let outcome = self.prober.probe(endpoint).await;
            let available = is_available(&outcome);

            match &outcome {
                Ok(status) if !available => {
                    tracing::warn!(name = %endpoint.name, url = %endpoint.url, %status, "Probe failed: non-success status");
                }
                Err(e) => {
                    tracing::warn!(name = %endpoint.name, url = %endpoint.url, error = %e, "Probe failed");
                }
                Ok(_) => {}
            }

            let host = self.aggregator.record(&endpoint.url, available)?;
            metrics::record_probe(host, available);
        }

        self.rounds = round;

        let reports: Vec<HostReport> = self
            .aggregator
            .counters()
            .map(|(host, counter)| HostReport {
                host: host.clone(),
                success: counter.success(),
                fail: counter.fail(),
                availability: counter.availability(),
            })
            .collect();

        for report in &reports {
            if let Some(percent) = report.availability {
                metrics::record_availability(&report.host, percent);
            }
        }

        tracing::info!(round, hosts = reports.len(), "Round finished");
        tracing::debug!(aggregation = %self.aggregator.to_json(), "Counters after round");
        Ok(reports)
    }
}
