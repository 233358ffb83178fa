//! Global `tracing` subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `log_level` is an [`EnvFilter`] directive (e.g. `info` or
/// `minilink=debug,tower_http=info`). `log_format` is `text` or `json`;
/// anything else falls back to text.
///
/// # Errors
///
/// Returns an error if the directive does not parse or a subscriber is
/// already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level)
        .map_err(|e| anyhow!("Invalid log filter '{log_level}': {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    let result = if log_format == "json" {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
