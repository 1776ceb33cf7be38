//! [`Encrypter`]: builds the JSON payload, seals it, wraps the key, and
//! renders the token.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use common::protocol::{
    FIELD_CVC, FIELD_EXPIRY_MONTH, FIELD_EXPIRY_YEAR, FIELD_NUMBER, GENERATION_TIME_FIELD,
};
use common::CseError;
use tracing::debug;

use crate::crypto::{cipher, wrap};
use crate::keys::KeyMaterial;
use crate::token::Token;

/// `strftime` pattern for `generationtime`: millisecond precision and a
/// numeric offset, e.g. `2024-05-01T12:00:00.000+00:00`.
pub const GENERATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Supplies the timestamp written to the `generationtime` field.
pub type GenerationTimeFn = Box<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// Render `time` in the gateway's `generationtime` format.
pub fn format_generation_time(time: &DateTime<FixedOffset>) -> String {
    time.format(GENERATION_TIME_FORMAT).to_string()
}

fn wall_clock() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

/// Encrypts field maps into `adyenjs_` tokens for one recipient key.
///
/// Each call draws a fresh nonce and fresh RSA padding, so identical input
/// never produces the same token twice. The AES key only changes on an
/// explicit [`reset`](Self::reset).
///
/// Encryption takes `&self`; rotation takes `&mut self`. Share one instance
/// across threads behind a lock, or build one per thread.
pub struct Encrypter {
    version: String,
    keys: KeyMaterial,
    generation_time: GenerationTimeFn,
}

impl Encrypter {
    /// Build an encrypter and generate its first AES key.
    ///
    /// `version` is embedded verbatim; it is not checked against any list.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::Entropy`] if the key cannot be generated.
    pub fn new(version: impl Into<String>, mut keys: KeyMaterial) -> Result<Self, CseError> {
        keys.reset()?;
        Ok(Self {
            version: version.into(),
            keys,
            generation_time: Box::new(wall_clock),
        })
    }

    /// Replace the `generationtime` source (default: current UTC time).
    pub fn with_generation_time<F>(mut self, source: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.generation_time = Box::new(source);
        self
    }

    /// The protocol version tag embedded in every token.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The key material this encrypter owns.
    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Rotate the AES key. Tokens issued afterwards use the new key.
    ///
    /// # Errors
    ///
    /// Returns [`CseError::Entropy`] if the random source fails; the previous
    /// key stays in use.
    pub fn reset(&mut self) -> Result<(), CseError> {
        self.keys.reset()?;
        Ok(())
    }

    /// Encrypt `fields` and return the token string.
    ///
    /// A `generationtime` entry in `fields` is kept as-is; otherwise one is
    /// added from the configured time source.
    ///
    /// # Errors
    ///
    /// - [`CseError::Serialization`] if the payload cannot be encoded.
    /// - [`CseError::Encryption`] if no key is loaded or sealing fails.
    /// - [`CseError::Entropy`] if the nonce cannot be drawn.
    /// - [`CseError::KeyWrap`] if the modulus is too small or RSA fails.
    pub fn encrypt_fields(&self, fields: &BTreeMap<String, String>) -> Result<String, CseError> {
        Ok(self.encrypt_token(fields)?.to_string())
    }

    /// Same as [`encrypt_fields`](Self::encrypt_fields) but returns the
    /// unrendered [`Token`].
    pub fn encrypt_token(&self, fields: &BTreeMap<String, String>) -> Result<Token, CseError> {
        let payload = self.build_payload(fields);
        let plaintext = serde_json::to_vec(&payload)?;

        let key = self.keys.symmetric_key()?;
        let sealed = cipher::seal(&plaintext, key.as_bytes())?;
        let wrapped_key = wrap::wrap_key(self.keys.public_key(), key.as_bytes())?;

        debug!(
            version = %self.version,
            fields = payload.len(),
            plaintext_len = plaintext.len(),
            "fields encrypted"
        );

        Ok(Token {
            version: self.version.clone(),
            wrapped_key,
            sealed: sealed.to_bytes(),
        })
    }

    /// Encrypt a single `name: value` pair.
    pub fn encrypt_single_field(&self, name: &str, value: &str) -> Result<String, CseError> {
        let mut fields = BTreeMap::new();
        fields.insert(name.to_owned(), value.to_owned());
        self.encrypt_fields(&fields)
    }

    /// Encrypt card data under the canonical `number`, `cvc`, `expiryMonth`
    /// and `expiryYear` field names.
    ///
    /// Values are used as given; see [`crate::card`] for the formatting the
    /// gateway expects.
    pub fn encrypt_card_fields(
        &self,
        number: &str,
        security_code: &str,
        month: &str,
        year: &str,
    ) -> Result<String, CseError> {
        let fields = BTreeMap::from([
            (FIELD_NUMBER.to_owned(), number.to_owned()),
            (FIELD_CVC.to_owned(), security_code.to_owned()),
            (FIELD_EXPIRY_MONTH.to_owned(), month.to_owned()),
            (FIELD_EXPIRY_YEAR.to_owned(), year.to_owned()),
        ]);
        self.encrypt_fields(&fields)
    }

    /// Copy `fields`, adding `generationtime` only when it is absent.
    fn build_payload(&self, fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut payload = fields.clone();
        if !payload.contains_key(GENERATION_TIME_FIELD) {
            let now = (self.generation_time)();
            payload.insert(GENERATION_TIME_FIELD.to_owned(), format_generation_time(&now));
        }
        payload
    }
}

impl fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encrypter")
            .field("version", &self.version)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
