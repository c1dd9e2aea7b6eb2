//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the binary. The library
//! itself only emits events and never installs a subscriber.

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}', expected text or json", other)),
        }
    }
}

/// Build the event filter from `RUST_LOG`, falling back to `default_filter`
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize the global subscriber
///
/// Calling this twice is harmless: the second installation is ignored.
pub fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(DEFAULT_LOG_FILTER))
        .with_target(false)
        .with_thread_ids(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
