//! Client-side encryption of payment card fields into `adyenjs_` tokens.
//!
//! An [`Encrypter`] owns a [`KeyMaterial`] (the gateway's RSA public key and
//! a per-session AES-256 key). Each call serialises the fields to JSON,
//! seals them with AES-CCM, wraps the AES key with RSA PKCS#1 v1.5, and
//! renders the token:
//!
//! ```text
//! adyenjs_<version>$<base64(wrapped key)>$<base64(nonce || ciphertext || tag)>
//! ```
//!
//! [`card`] holds the optional brand detection and formatting helpers.

pub mod card;
pub mod config;
pub mod crypto;
pub mod encrypter;
mod error;
pub mod keys;
pub mod telemetry;
#[cfg(test)]
mod test_support;
pub mod token;

pub use common::CseError;
pub use encrypter::{Encrypter, GenerationTimeFn};
pub use keys::KeyMaterial;
pub use token::Token;
