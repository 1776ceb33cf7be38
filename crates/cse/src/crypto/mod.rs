//! Symmetric sealing and asymmetric key wrapping.
//!
//! This module is free of JSON, time, and token-format concerns. It provides
//! the two primitives the engine composes:
//!
//! - [`cipher`]: AES-256-CCM with a 12-byte nonce and an **8-byte** tag.
//! - [`wrap`]: RSA PKCS#1 v1.5 encryption of the 32-byte AES key.
//!
//! # Sealed payload layout
//!
//! ```text
//! nonce (12 bytes) || ciphertext || tag (8 bytes)
//! ```
//!
//! The nonce is a bare prefix; there is no length framing.

pub mod cipher;
pub mod wrap;

pub use cipher::{KEY_LEN, NONCE_LEN, TAG_LEN};
