//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every ShutdownSignal resolves
//!     → scheduler exits at the next round boundary
//! ```
//!
//! # Design Decisions
//! - Stop is cooperative: in-flight rounds always complete
//! - Startup is fail fast: any configuration error is fatal

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
