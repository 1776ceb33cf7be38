//! Shared error taxonomy, wire constants, and request types for `adyen-cse`.

pub mod error;
pub mod protocol;

pub use error::CseError;
