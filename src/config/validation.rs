//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every endpoint URL must parse and carry a host
//! - At least one endpoint must be configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: &[EndpointConfig] → Result<(), Vec<ValidationError>>
//! - Runs before the host aggregator is built

use thiserror::Error;

use crate::config::schema::EndpointConfig;
use crate::health::aggregator::host_key;

/// A single semantic problem in the endpoint list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no endpoints configured")]
    Empty,

    #[error("endpoint {index} ({name}): {reason}")]
    Endpoint {
        index: usize,
        name: String,
        reason: String,
    },
}

/// Check every endpoint and collect all problems.
pub fn validate_endpoints(endpoints: &[EndpointConfig]) -> Result<(), Vec<ValidationError>> {
    if endpoints.is_empty() {
        return Err(vec![ValidationError::Empty]);
    }

    let errors: Vec<ValidationError> = endpoints
        .iter()
        .enumerate()
        .filter_map(|(index, endpoint)| {
            host_key(&endpoint.url).err().map(|e| ValidationError::Endpoint {
                index,
                name: endpoint.name.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
