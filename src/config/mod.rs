//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! endpoint file (YAML/TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Vec<EndpointConfig> (validated, immutable)
//!     → handed to the health subsystem once at startup
//! ```
//!
//! # Design Decisions
//! - Endpoints are immutable once loaded; there is no reload
//! - Optional endpoint fields have defaults (method defaults to GET)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_endpoints, ConfigError};
pub use schema::{EndpointConfig, MonitorConfig};
