//! Recipient public key and per-session AES key.
//!
//! # Lifecycle
//!
//! 1. [`KeyMaterial::from_modulus`] / [`KeyMaterial::from_hex`] parse the
//!    gateway's RSA public key. No AES key is loaded yet.
//! 2. [`KeyMaterial::reset`] draws 32 fresh bytes from the OS CSPRNG.
//!    Calling it again replaces the key wholesale (rotation).
//! 3. The engine borrows the key via [`KeyMaterial::symmetric_key`] for
//!    the duration of one token.
//!
//! # Security invariants
//!
//! - The AES key is **never** serialised, logged, or included in traces.
//! - Key bytes are zeroed when replaced or dropped.

pub mod material;

pub use material::{KeyError, KeyMaterial, SymmetricKey, DEFAULT_PUBLIC_EXPONENT};
