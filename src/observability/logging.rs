//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr; stdout carries only availability lines
//! - Level from `RUST_LOG`, else `LOG_LEVEL` (DEBUG/INFO/WARN/ERROR), else info

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `LOG_LEVEL` value to a filter directive.
pub fn level_directive(level: Option<&str>) -> &'static str {
    match level {
        Some("DEBUG") => "debug",
        Some("INFO") => "info",
        Some("WARN") => "warn",
        Some("ERROR") => "error",
        _ => "info",
    }
}

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").ok();
        EnvFilter::new(level_directive(level.as_deref()))
    })
}

/// Install the global subscriber.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(build_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
