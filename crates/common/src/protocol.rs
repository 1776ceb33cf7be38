//! Wire constants and JSON bodies exchanged with callers.
//!
//! The token format itself is rendered by the engine; this module only holds
//! the fixed strings it is built from so that both the encrypting side and
//! any test harness playing the gateway agree on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Token format
// ---------------------------------------------------------------------------

/// Prefix of every token, immediately followed by the version tag.
pub const TOKEN_PREFIX: &str = "adyenjs_";

/// Separator between the version, wrapped key, and sealed payload.
pub const TOKEN_SEPARATOR: char = '$';

/// Reserved payload field carrying the issuance timestamp.
pub const GENERATION_TIME_FIELD: &str = "generationtime";

/// Protocol version tag `0_1_18`.
pub const VERSION_0_1_18: &str = "0_1_18";

/// Protocol version tag `0_1_21`.
pub const VERSION_0_1_21: &str = "0_1_21";

/// Protocol version tag `0_1_25`.
pub const VERSION_0_1_25: &str = "0_1_25";

// ---------------------------------------------------------------------------
// Card field names
// ---------------------------------------------------------------------------

/// Card number field.
pub const FIELD_NUMBER: &str = "number";
/// Two-digit expiry month field.
pub const FIELD_EXPIRY_MONTH: &str = "expiryMonth";
/// Four-digit expiry year field.
pub const FIELD_EXPIRY_YEAR: &str = "expiryYear";
/// Card security code field.
pub const FIELD_CVC: &str = "cvc";

// ---------------------------------------------------------------------------
// CLI bodies
// ---------------------------------------------------------------------------

/// Request body read by `cse-encrypt` from stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Field name to plaintext value. A `generationtime` entry, if present,
    /// is used verbatim.
    pub fields: BTreeMap<String, String>,
}

/// Successful response body written by `cse-encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// The complete `adyenjs_...` token.
    pub token: String,
}

/// Error body written by `cse-encrypt` when the engine fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"key_wrap"`).
    pub code: String,
    /// Human-readable description. Never contains field values.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::CseError> for ErrorResponse {
    fn from(e: &crate::CseError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Browser fingerprint
// ---------------------------------------------------------------------------

/// The gateway's `browserInfo` object, sent alongside tokens for 3-D Secure.
///
/// Plain data; nothing here is encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    /// Value of the browser's `Accept` header.
    pub accept_header: String,
    /// `screen.colorDepth` in bits per pixel.
    pub color_depth: u32,
    pub java_enabled: bool,
    /// Omitted when unknown; the gateway then assumes `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_script_enabled: Option<bool>,
    /// `navigator.language`.
    pub language: String,
    pub screen_height: u32,
    pub screen_width: u32,
    /// Difference between UTC and browser local time, in minutes.
    pub time_zone_offset: i32,
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encrypt_request_from_json() {
        let req: EncryptRequest =
            serde_json::from_value(json!({"fields": {"number": "4111111111111111"}})).unwrap();
        assert_eq!(req.fields["number"], "4111111111111111");
    }

    #[test]
    fn error_response_from_cse_error() {
        let e = crate::CseError::KeyFormat("empty modulus".into());
        let body = ErrorResponse::from(&e);
        assert_eq!(body.code, "key_format");
        assert!(body.message.contains("empty modulus"));
    }

    #[test]
    fn browser_info_uses_camel_case() {
        let info = BrowserInfo {
            accept_header: "*/*".into(),
            color_depth: 24,
            language: "en-US".into(),
            screen_height: 1080,
            screen_width: 1920,
            time_zone_offset: -60,
            user_agent: "Mozilla/5.0".into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["acceptHeader"], "*/*");
        assert_eq!(v["timeZoneOffset"], -60);
        assert!(v.get("javaScriptEnabled").is_none());
    }

    #[test]
    fn browser_info_keeps_explicit_javascript_flag() {
        let info = BrowserInfo {
            java_script_enabled: Some(false),
            ..Default::default()
        };
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["javaScriptEnabled"], false);
    }
}
