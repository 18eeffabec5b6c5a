//! Availability checking subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Vec<EndpointConfig>
//!     → aggregator.rs (host counters + URL → host map, built once)
//!
//! Every tick (scheduler.rs):
//!     round.rs probes each endpoint via probe.rs
//!     → classify 2xx as success, everything else as failure
//!     → increment the host counter
//!     → report cumulative availability per host
//! ```
//!
//! # Design Decisions
//! - Availability is per host, not per endpoint
//! - Counters are owned by the round runner; no shared global state
//! - One round at a time, probes in declaration order

pub mod aggregator;
pub mod probe;
pub mod round;
pub mod scheduler;

pub use aggregator::{Counter, EndpointError, HostAggregator, HostKey, InvariantError};
pub use probe::{HttpProber, Probe, ProbeError};
pub use round::{HostReport, RoundRunner};
pub use scheduler::Scheduler;
