//! Configuration schema definitions.
//!
//! Endpoint records are deserialized from the endpoint file; monitor timing
//! settings come from defaults overridden on the command line.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One HTTP endpoint under observation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Informational name, used only in logs.
    pub name: String,

    /// Absolute URL to probe.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Headers set on every probe request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Raw request body.
    #[serde(default)]
    pub body: String,
}

impl EndpointConfig {
    /// Create a GET endpoint with no headers or body.
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: default_method(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// Wrapper for TOML endpoint files, which cannot hold a top-level array.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EndpointFile {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// Scheduler and probe timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Delay between the end of one round and the start of the next, in seconds.
    pub interval_secs: u64,

    /// Client-wide probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl MonitorConfig {
    /// Scheduler interval.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Per-probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            timeout_ms: 500,
        }
    }
}
