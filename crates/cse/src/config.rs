//! Configuration loading and validation for the `cse-encrypt` binary.
//!
//! All values are read from `CSE_`-prefixed environment variables at startup.
//! The process exits with a clear error message if any required variable is
//! missing or invalid.

use anyhow::{Context, Result};
use common::protocol::VERSION_0_1_25;
use serde::Deserialize;

use crate::keys::DEFAULT_PUBLIC_EXPONENT;

/// Validated `cse-encrypt` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Hex-encoded RSA modulus published by the gateway. **Required.**
    pub public_key: String,

    /// RSA public exponent.
    #[serde(default = "default_public_exponent")]
    pub public_exponent: u32,

    /// Protocol version tag embedded in the token.
    #[serde(default = "default_version")]
    pub version: String,

    /// Group the `number` field into 4-digit blocks before encrypting.
    #[serde(default = "default_format_card")]
    pub format_card: bool,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_public_exponent() -> u32 {
    DEFAULT_PUBLIC_EXPONENT
}
fn default_version() -> String {
    VERSION_0_1_25.into()
}
fn default_format_card() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CSE").try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.public_key, "CSE_PUBLIC_KEY")?;
        ensure_non_empty(&self.version, "CSE_VERSION")?;

        if self.public_exponent < 2 {
            anyhow::bail!("CSE_PUBLIC_EXPONENT must be greater than 1");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
