//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type returned by the encryption engine.
///
/// Variants map to process exit codes used by the `cse-encrypt` binary:
/// - [`CseError::KeyFormat`] → 2
/// - [`CseError::Entropy`] → 3
/// - [`CseError::Serialization`] → 4
/// - [`CseError::Encryption`] → 5
/// - [`CseError::KeyWrap`] → 6
///
/// None of these are retried internally. A failed call never yields a
/// partial token.
#[derive(Debug, Error)]
pub enum CseError {
    /// The recipient public key could not be parsed (empty, zero, or an
    /// exponent the RSA layer rejects).
    #[error("invalid public key: {0}")]
    KeyFormat(String),

    /// The OS random source could not supply enough bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// The field map could not be encoded as JSON.
    #[error("payload serialization failed: {0}")]
    Serialization(String),

    /// The symmetric cipher could not be initialised or failed to seal,
    /// including the case where no valid 32-byte key is loaded.
    #[error("encryption failure: {0}")]
    Encryption(String),

    /// Wrapping the symmetric key under the RSA public key failed.
    #[error("key wrap failure: {0}")]
    KeyWrap(String),
}

impl CseError {
    /// Short machine-readable error code (e.g. `"key_wrap"`).
    pub fn code(&self) -> &'static str {
        match self {
            CseError::KeyFormat(_) => "key_format",
            CseError::Entropy(_) => "entropy",
            CseError::Serialization(_) => "serialization",
            CseError::Encryption(_) => "encryption",
            CseError::KeyWrap(_) => "key_wrap",
        }
    }

    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CseError::KeyFormat(_) => 2,
            CseError::Entropy(_) => 3,
            CseError::Serialization(_) => 4,
            CseError::Encryption(_) => 5,
            CseError::KeyWrap(_) => 6,
        }
    }
}

impl From<serde_json::Error> for CseError {
    fn from(e: serde_json::Error) -> Self {
        CseError::Serialization(e.to_string())
    }
}
