//! [`KeyMaterial`]: RSA public key plus the regenerable AES key.

use rand_core::{CryptoRng, OsRng, RngCore};
use rsa::{BigUint, RsaPublicKey};
use thiserror::Error;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::KEY_LEN;

/// Public exponent assumed when the gateway publishes only a modulus.
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// Errors produced by the key layer.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The public key input is empty, zero, not hex, or otherwise rejected.
    #[error("invalid public key: {0}")]
    Format(String),

    /// The random source failed while generating a symmetric key.
    #[error("failed to generate symmetric key: {0}")]
    Entropy(rand_core::Error),

    /// No symmetric key has been generated yet.
    #[error("symmetric key not yet initialised")]
    NotInitialised,

    /// Supplied key material has an unexpected length.
    #[error("symmetric key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-size AES key buffer holding exactly [`KEY_LEN`] bytes.
///
/// The memory is overwritten with zeroes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// The recipient's RSA public key and the session's AES key.
///
/// Owned by exactly one engine. Mutation (`reset`, `install`) takes
/// `&mut self`, so a rotation can never interleave with an encryption that
/// borrows the key.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    public_key: RsaPublicKey,
    symmetric_key: Option<SymmetricKey>,
}

impl KeyMaterial {
    /// Parse a public key from its big-endian modulus and optional exponent.
    ///
    /// `exponent` defaults to [`DEFAULT_PUBLIC_EXPONENT`]. Any modulus size is
    /// accepted. No symmetric key is loaded; call [`reset`](Self::reset)
    /// before use.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Format`] if `modulus` is empty or encodes zero, or
    /// if the pair is not a well-formed RSA key (even modulus, even exponent,
    /// or an exponent not below the modulus).
    pub fn from_modulus(modulus: &[u8], exponent: Option<u32>) -> Result<Self, KeyError> {
        if modulus.is_empty() {
            return Err(KeyError::Format("modulus is empty".into()));
        }
        if modulus.iter().all(|b| *b == 0) {
            return Err(KeyError::Format("modulus must be a positive integer".into()));
        }

        let n = BigUint::from_bytes_be(modulus);
        let e = BigUint::from(exponent.unwrap_or(DEFAULT_PUBLIC_EXPONENT));
        // No upper bound on modulus size; whether the key fits is checked at
        // wrap time.
        let max_bits = n.bits();
        let public_key = RsaPublicKey::new_with_max_size(n, e, max_bits)
            .map_err(|e| KeyError::Format(e.to_string()))?;

        Ok(Self {
            public_key,
            symmetric_key: None,
        })
    }

    /// Parse a hex-encoded modulus, the form the gateway publishes.
    ///
    /// Surrounding whitespace is ignored; case is not significant.
    pub fn from_hex(modulus_hex: &str, exponent: Option<u32>) -> Result<Self, KeyError> {
        let modulus = hex::decode(modulus_hex.trim())
            .map_err(|e| KeyError::Format(format!("modulus is not valid hex: {e}")))?;
        Self::from_modulus(&modulus, exponent)
    }

    /// The recipient's RSA public key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Returns `true` if a symmetric key is currently loaded.
    pub fn is_ready(&self) -> bool {
        self.symmetric_key.is_some()
    }

    /// Replace the symmetric key with 32 fresh bytes from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Entropy`] if the random source fails. The previous
    /// key, if any, is left in place.
    pub fn reset(&mut self) -> Result<(), KeyError> {
        self.reset_with_rng(&mut OsRng)
    }

    /// Replace the symmetric key with 32 bytes drawn from `rng`.
    pub fn reset_with_rng<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<(), KeyError> {
        let mut buf = [0u8; KEY_LEN];
        rng.try_fill_bytes(&mut buf).map_err(KeyError::Entropy)?;
        self.symmetric_key = Some(SymmetricKey(buf));
        buf.zeroize();
        debug!("symmetric key regenerated");
        Ok(())
    }

    /// Load (or replace) the symmetric key from fixed bytes.
    ///
    /// Returns [`KeyError::InvalidLength`] if `key_bytes` is not exactly
    /// [`KEY_LEN`] bytes; the current key is left in place.
    #[cfg(test)]
    pub(crate) fn install(&mut self, key_bytes: &[u8]) -> Result<(), KeyError> {
        if key_bytes.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(key_bytes.len()));
        }
        let mut buf = [0u8; KEY_LEN];
        buf.copy_from_slice(key_bytes);
        self.symmetric_key = Some(SymmetricKey(buf));
        buf.zeroize();
        Ok(())
    }

    /// Borrow the current symmetric key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotInitialised`] if no key has been generated yet.
    pub fn symmetric_key(&self) -> Result<&SymmetricKey, KeyError> {
        self.symmetric_key.as_ref().ok_or(KeyError::NotInitialised)
    }
}
