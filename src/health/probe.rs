//! Probe execution.
//!
//! # Responsibilities
//! - Build one request per endpoint (method, URL, headers, body)
//! - Send it with a bounded client-wide timeout
//! - Surface any completed response's status, whatever its class
//!
//! # Design Decisions
//! - No retries: one probe is one request
//! - Construction and transport failures are both `ProbeError`
//! - Success/fail classification happens in the round runner

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;

use crate::config::EndpointConfig;

/// Why a probe produced no status code.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid method {0:?}")]
    InvalidMethod(String),

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Something that can probe a single endpoint.
pub trait Probe {
    fn probe(
        &self,
        endpoint: &EndpointConfig,
    ) -> impl Future<Output = Result<StatusCode, ProbeError>> + Send;
}

/// HTTP prober backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    /// Create a prober whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("availability-monitor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Client-wide request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_request(&self, endpoint: &EndpointConfig) -> Result<reqwest::Request, ProbeError> {
        let method = Method::from_bytes(endpoint.method.as_bytes())
            .map_err(|_| ProbeError::InvalidMethod(endpoint.method.clone()))?;

        let headers = build_headers(endpoint)?;

        self.client
            .request(method, &endpoint.url)
            .headers(headers)
            .body(endpoint.body.clone())
            .build()
            .map_err(ProbeError::Transport)
    }
}

fn build_headers(endpoint: &EndpointConfig) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &endpoint.headers {
        let invalid = || ProbeError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

impl Probe for HttpProber {
    async fn probe(&self, endpoint: &EndpointConfig) -> Result<StatusCode, ProbeError> {
        let request = self.build_request(endpoint)?;
        tracing::debug!(
            name = %endpoint.name,
            method = %request.method(),
            url = %request.url(),
            headers = ?request.headers(),
            "Sending probe request"
        );

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(self.timeout)
            } else {
                ProbeError::Transport(e)
            }
        })?;

        tracing::debug!(
            name = %endpoint.name,
            status = %response.status(),
            headers = ?response.headers(),
            "Probe response received"
        );

        Ok(response.status())
    }
}
