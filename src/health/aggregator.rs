//! Per-host success/fail aggregation.
//!
//! # Responsibilities
//! - Group endpoints by the host component of their URL
//! - Own one cumulative counter per host
//! - Resolve an endpoint URL to its host without re-parsing
//!
//! # Design Decisions
//! - Counters are cumulative since startup, never reset or windowed
//! - Hosts are kept sorted so per-round output is stable
//! - Duplicate URLs share one entry and count once per occurrence per round

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::EndpointConfig;

/// Grouping key: the URL authority as written (`host` or `host:port`), without userinfo.
pub type HostKey = String;

/// An endpoint URL that cannot be grouped by host. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("malformed URL {url}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL {url} has no host")]
    MissingHost { url: String },
}

/// A URL was probed that the aggregator was never built with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no host registered for endpoint URL {url}")]
pub struct InvariantError {
    pub url: String,
}

/// Derive the host key of an endpoint URL.
///
/// The URL must parse and carry a host; the key is the authority exactly as
/// written (case, port and non-ASCII labels preserved), minus any userinfo.
pub fn host_key(raw: &str) -> Result<HostKey, EndpointError> {
    let url = Url::parse(raw).map_err(|source| EndpointError::MalformedUrl {
        url: raw.to_string(),
        source,
    })?;

    let missing = || EndpointError::MissingHost {
        url: raw.to_string(),
    };

    if url.host_str().map_or(true, str::is_empty) {
        return Err(missing());
    }

    written_authority(raw).map(str::to_string).ok_or_else(missing)
}

fn written_authority(raw: &str) -> Option<&str> {
    let (_, rest) = raw.trim().split_once("://")?;
    let end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    (!host.is_empty()).then_some(host)
}

/// Cumulative probe outcomes for one host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    success: u64,
    fail: u64,
}

impl Counter {
    /// Record one classified probe.
    pub fn record(&mut self, available: bool) {
        if available {
            self.success += 1;
        } else {
            self.fail += 1;
        }
    }

    /// Probes classified as available.
    pub fn success(&self) -> u64 {
        self.success
    }

    /// Probes classified as unavailable.
    pub fn fail(&self) -> u64 {
        self.fail
    }

    /// All recorded probes.
    pub fn total(&self) -> u64 {
        self.success + self.fail
    }

    /// Rounded percentage of successful probes, half away from zero.
    ///
    /// `None` until at least one probe has been recorded.
    pub fn availability(&self) -> Option<u8> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let percent = (200 * self.success + total) / (2 * total);
        Some(percent as u8)
    }
}

/// Host counters plus the URL → host lookup, built once from the endpoint list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostAggregator {
    counters: BTreeMap<HostKey, Counter>,
    url_to_host: HashMap<String, HostKey>,
}

impl HostAggregator {
    /// Build fresh zeroed counters for every distinct host in `endpoints`.
    pub fn build(endpoints: &[EndpointConfig]) -> Result<Self, EndpointError> {
        let mut aggregator = Self::default();

        for endpoint in endpoints {
            let host = host_key(&endpoint.url)?;
            aggregator.counters.entry(host.clone()).or_default();
            aggregator.url_to_host.insert(endpoint.url.clone(), host);
        }

        tracing::debug!(
            hosts = aggregator.counters.len(),
            urls = aggregator.url_to_host.len(),
            "Host aggregator built"
        );

        Ok(aggregator)
    }

    /// Host key an endpoint URL resolves to.
    pub fn host_for(&self, url: &str) -> Option<&str> {
        self.url_to_host.get(url).map(String::as_str)
    }

    /// Record a classified probe against the host owning `url`.
    pub fn record(&mut self, url: &str, available: bool) -> Result<&HostKey, InvariantError> {
        let host = self
            .url_to_host
            .get(url)
            .ok_or_else(|| InvariantError { url: url.to_string() })?;

        let counter = self
            .counters
            .get_mut(host)
            .ok_or_else(|| InvariantError { url: url.to_string() })?;
        counter.record(available);

        Ok(host)
    }

    /// Counter for one host, if configured.
    pub fn counter(&self, host: &str) -> Option<&Counter> {
        self.counters.get(host)
    }

    /// All host counters, sorted by host.
    pub fn counters(&self) -> impl Iterator<Item = (&HostKey, &Counter)> {
        self.counters.iter()
    }

    /// Number of distinct hosts.
    pub fn host_count(&self) -> usize {
        self.counters.len()
    }

    /// JSON dump of both maps for debug logging.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
