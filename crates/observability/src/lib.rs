//! Process-wide tracing setup shared by the binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// `LOG_FORMAT=pretty` switches to human-readable output. This is safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::LogFormat;
