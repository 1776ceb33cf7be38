//! RSA PKCS#1 v1.5 wrapping of the symmetric key.
//!
//! The padding is randomised on every call, so wrapping the same key twice
//! yields different ciphertexts.

use rand_core::{CryptoRng, OsRng, RngCore};
use rsa::{traits::PublicKeyParts, Pkcs1v15Encrypt, RsaPublicKey};
use thiserror::Error;

/// Bytes of PKCS#1 v1.5 encryption padding overhead.
pub const PKCS1_V15_OVERHEAD: usize = 11;

/// Errors produced by the key-wrap layer.
#[derive(Debug, Error)]
pub enum WrapError {
    /// The key does not fit the modulus once padding is accounted for.
    #[error("key of {len} bytes exceeds the {max}-byte capacity of the RSA modulus")]
    MessageTooLong { len: usize, max: usize },

    /// The RSA layer rejected the operation.
    #[error("rsa encryption failed: {0}")]
    Rsa(#[from] rsa::Error),
}

/// Maximum plaintext length `public_key` can wrap with PKCS#1 v1.5.
pub fn capacity(public_key: &RsaPublicKey) -> usize {
    public_key.size().saturating_sub(PKCS1_V15_OVERHEAD)
}

/// Wrap `key` under `public_key` using the OS CSPRNG for padding.
///
/// # Errors
///
/// Returns [`WrapError::MessageTooLong`] if the modulus is too small for
/// `key`, or [`WrapError::Rsa`] if the RSA operation itself fails.
pub fn wrap_key(public_key: &RsaPublicKey, key: &[u8]) -> Result<Vec<u8>, WrapError> {
    wrap_key_with_rng(public_key, key, &mut OsRng)
}

/// Wrap `key` under `public_key`, drawing padding bytes from `rng`.
pub fn wrap_key_with_rng<R: CryptoRng + RngCore>(
    public_key: &RsaPublicKey,
    key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, WrapError> {
    let max = capacity(public_key);
    if key.len() > max {
        return Err(WrapError::MessageTooLong {
            len: key.len(),
            max,
        });
    }
    Ok(public_key.encrypt(rng, Pkcs1v15Encrypt, key)?)
}
