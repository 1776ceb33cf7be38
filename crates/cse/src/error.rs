//! Conversions from layer-specific errors into [`CseError`].

use common::CseError;

use crate::crypto::{cipher::CipherError, wrap::WrapError};
use crate::keys::KeyError;

impl From<KeyError> for CseError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::Format(msg) => CseError::KeyFormat(msg),
            KeyError::Entropy(err) => CseError::Entropy(err.to_string()),
            // An engine without a usable 32-byte key must refuse to encrypt.
            KeyError::NotInitialised | KeyError::InvalidLength(_) => {
                CseError::Encryption(e.to_string())
            }
        }
    }
}

impl From<CipherError> for CseError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::Entropy(err) => CseError::Entropy(err.to_string()),
            other => CseError::Encryption(other.to_string()),
        }
    }
}

impl From<WrapError> for CseError {
    fn from(e: WrapError) -> Self {
        CseError::KeyWrap(e.to_string())
    }
}
