//! Card-number helpers applied before encryption.
//!
//! Both submodules are pure functions with no dependency on the engine, and
//! the engine does not call them; callers decide whether to format values
//! before handing them to [`crate::Encrypter`].

pub mod brand;
pub mod format;

pub use brand::{detect_brand, CardBrand};
pub use format::{format_card_number, format_expiry};
