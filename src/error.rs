//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::health::{EndpointError, InvariantError};

/// Anything that stops the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
