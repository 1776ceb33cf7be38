//! Log output for `cse-encrypt`.
//!
//! Events are emitted as one JSON object per line on stderr, leaving stdout
//! for the token. Library code only records counts, lengths, and version
//! tags; field values, AES keys, and tokens are never logged.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the process-wide JSON log subscriber.
///
/// The filter comes from `RUST_LOG` if it parses, else from `default_level`.
/// Fails if a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let json_to_stderr = fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(std::io::stderr);

    Registry::default()
        .with(filter)
        .with(json_to_stderr)
        .try_init()
        .context("a global tracing subscriber is already installed")
}
