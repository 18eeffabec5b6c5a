//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! health subsystem produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (probe counters, availability gauges)
//! ```

pub mod logging;
pub mod metrics;
