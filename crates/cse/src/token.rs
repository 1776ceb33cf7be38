//! The `adyenjs_` token: rendering and parsing.
//!
//! ```text
//! adyenjs_<version>$<base64(wrapped key)>$<base64(nonce || ciphertext || tag)>
//! ```
//!
//! Both payload segments use the standard base64 alphabet **with** padding.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::{TOKEN_PREFIX, TOKEN_SEPARATOR};
use thiserror::Error;

/// Errors produced when parsing a token string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The string does not start with [`TOKEN_PREFIX`].
    #[error("token does not start with {TOKEN_PREFIX}")]
    MissingPrefix,

    /// The string does not have exactly three `$`-separated segments.
    #[error("token must have three {TOKEN_SEPARATOR}-separated segments")]
    InvalidFormat,

    /// A payload segment is not valid padded base64.
    #[error("token segment is not valid base64")]
    InvalidBase64,
}

/// A parsed or freshly built token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Opaque protocol version tag, e.g. `0_1_25`.
    pub version: String,
    /// RSA-wrapped AES key; as long as the modulus.
    pub wrapped_key: Vec<u8>,
    /// `nonce || ciphertext || tag`.
    pub sealed: Vec<u8>,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TOKEN_PREFIX}{}{TOKEN_SEPARATOR}{}{TOKEN_SEPARATOR}{}",
            self.version,
            STANDARD.encode(&self.wrapped_key),
            STANDARD.encode(&self.sealed),
        )
    }
}

impl FromStr for Token {
    type Err = TokenError;

    /// Parse a token string back into its parts.
    ///
    /// The version is everything between the prefix and the second-to-last
    /// separator; base64 never contains `$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix(TOKEN_PREFIX).ok_or(TokenError::MissingPrefix)?;

        let mut parts = rest.rsplitn(3, TOKEN_SEPARATOR);
        let (Some(sealed), Some(wrapped_key), Some(version)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::InvalidFormat);
        };
        if version.is_empty() || wrapped_key.is_empty() || sealed.is_empty() {
            return Err(TokenError::InvalidFormat);
        }

        Ok(Self {
            version: version.to_owned(),
            wrapped_key: STANDARD
                .decode(wrapped_key)
                .map_err(|_| TokenError::InvalidBase64)?,
            sealed: STANDARD
                .decode(sealed)
                .map_err(|_| TokenError::InvalidBase64)?,
        })
    }
}
