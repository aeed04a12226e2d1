//! Structured logging initialization.
//!
//! JSON output for production, pretty output for development. Level comes
//! from `RUST_LOG` with an `info` default. Hosts that install their own
//! subscriber can skip this entirely; `init` is idempotent.

use tracing_subscriber::EnvFilter;

/// Output format for the process log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for development.
    Pretty,
    /// Machine-parseable JSON lines, for production.
    Json,
}

/// Install the global tracing subscriber. A second call is a no-op.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    // Already-set subscriber is fine; logging must never fail the host.
    let _ = result;
}
