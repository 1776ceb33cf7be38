//! AES-256-CCM sealing and opening of the JSON payload.
//!
//! **Tag length:** the gateway expects an 8-byte CCM tag, not the 16 bytes
//! most AEAD APIs default to. This is a fixed protocol constant required for
//! interoperability. Do not "upgrade" it; tokens with a 16-byte tag are
//! rejected by the gateway.
//!
//! No associated data is authenticated.

use aes::Aes256;
use ccm::{
    aead::{
        consts::{U12, U8},
        generic_array::GenericArray,
        Aead, KeyInit,
    },
    Ccm,
};
use rand_core::{CryptoRng, OsRng, RngCore};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the CCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the truncated CCM authentication tag.
pub const TAG_LEN: usize = 8;

/// AES-256-CCM with an 8-byte tag and 12-byte nonce.
type Aes256Ccm8 = Ccm<Aes256, U8, U12>;

/// A sealed payload: the nonce plus ciphertext with its trailing tag.
///
/// The byte representation is `nonce || ciphertext || tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedPayload {
    /// Concatenate the nonce and ciphertext into one buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split `nonce || ciphertext || tag` back into its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Truncated`] if `bytes` is too short to hold a
    /// nonce and a tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(bytes.len()));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid AES key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The random source could not produce a nonce.
    #[error("nonce generation failed: {0}")]
    Entropy(rand_core::Error),

    /// AES-CCM sealing or opening failed.
    #[error("aead operation failed")]
    AeadFailure,

    /// A sealed buffer is shorter than nonce + tag.
    #[error("sealed payload too short: {0} bytes")]
    Truncated(usize),
}

/// Seal `plaintext` under `key` with a fresh nonce from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes,
/// [`CipherError::Entropy`] if no nonce could be drawn, and
/// [`CipherError::AeadFailure`] if CCM refuses the input (e.g. a plaintext
/// beyond the length the 3-byte CCM length field can encode).
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<SealedPayload, CipherError> {
    seal_with_rng(plaintext, key, &mut OsRng)
}

/// Seal `plaintext` under `key`, drawing the nonce from `rng`.
pub fn seal_with_rng<R: CryptoRng + RngCore>(
    plaintext: &[u8],
    key: &[u8],
    rng: &mut R,
) -> Result<SealedPayload, CipherError> {
    let cipher = build_cipher(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce).map_err(CipherError::Entropy)?;

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(SealedPayload { nonce, ciphertext })
}

/// Open a [`SealedPayload`] back to plaintext bytes.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::AeadFailure`] if authentication fails (wrong key or tampered data).
pub fn open(sealed: &SealedPayload, key: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key)?;
    cipher
        .decrypt(GenericArray::from_slice(&sealed.nonce), sealed.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)
}

fn build_cipher(key: &[u8]) -> Result<Aes256Ccm8, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Ccm8::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingRng;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn seal_open_round_trip() {
        let key = random_key();
        let plaintext = br#"{"number":"4111111111111111"}"#;
        let sealed = seal(plaintext, &key).unwrap();
        let opened = open(&sealed, &key).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn tag_is_eight_bytes() {
        let key = random_key();
        let sealed = seal(b"0123456789", &key).unwrap();
        assert_eq!(sealed.ciphertext.len(), 10 + TAG_LEN);
    }

    #[test]
    fn nonce_is_fresh_per_call() {
        let key = random_key();
        let a = seal(b"same", &key).unwrap();
        let b = seal(b"same", &key).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_open() {
        let sealed = seal(b"secret", &random_key()).unwrap();
        assert!(matches!(
            open(&sealed, &random_key()),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn nonce_entropy_failure_is_reported() {
        let result = seal_with_rng(b"x", &random_key(), &mut FailingRng);
        let err = match result {
            Err(e @ CipherError::Entropy(_)) => e,
            other => panic!("expected Entropy, got {other:?}"),
        };
        assert_eq!(common::CseError::from(err).code(), "entropy");
    }

    #[test]
    fn invalid_key_length_rejected() {
        assert!(matches!(
            seal(b"x", &[0u8; 16]),
            Err(CipherError::InvalidKeyLength)
        ));
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = random_key();
        let mut sealed = seal(b"tamper me", &key).unwrap();
        sealed.ciphertext[0] ^= 0xFF;
        assert!(open(&sealed, &key).is_err());
    }

    #[test]
    fn bytes_round_trip_keeps_nonce_prefix() {
        let key = random_key();
        let sealed = seal(b"hello", &key).unwrap();
        let bytes = sealed.to_bytes();
        assert_eq!(&bytes[..NONCE_LEN], &sealed.nonce);
        assert_eq!(SealedPayload::from_bytes(&bytes).unwrap(), sealed);
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        assert!(matches!(
            SealedPayload::from_bytes(&[0u8; NONCE_LEN + TAG_LEN - 1]),
            Err(CipherError::Truncated(19))
        ));
    }
}
