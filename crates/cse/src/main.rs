//! `cse-encrypt`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from `CSE_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Build the [`Encrypter`] from the configured public key.
//! 4. Read one `{"fields": {...}}` request from stdin and write the token
//!    (or an error body) to stdout.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use adyen_cse::card::{detect_brand, format_card_number};
use adyen_cse::config::Config;
use adyen_cse::{telemetry, CseError, Encrypter, KeyMaterial};
use anyhow::{Context, Result};
use common::protocol::{EncryptRequest, EncryptResponse, ErrorResponse, FIELD_NUMBER};
use tracing::{debug, info, warn};

fn main() -> Result<ExitCode> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        protocol_version = %cfg.version,
        "cse-encrypt starting"
    );

    // -----------------------------------------------------------------------
    // 3. Request
    // -----------------------------------------------------------------------
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let mut req: EncryptRequest =
        serde_json::from_str(&input).context("stdin is not a valid encrypt request")?;

    if let Some(number) = req.fields.get_mut(FIELD_NUMBER) {
        let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        debug!(brand = %detect_brand(&digits).gateway_code(), "card number present");
        if cfg.format_card {
            *number = format_card_number(number);
        }
    }

    // -----------------------------------------------------------------------
    // 4. Encryption
    // -----------------------------------------------------------------------
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match encrypt(&cfg, &req) {
        Ok(token) => {
            serde_json::to_writer(&mut out, &EncryptResponse { token })?;
            writeln!(out)?;
            info!(fields = req.fields.len(), "token issued");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(error = %e, code = e.code(), "encryption failed");
            serde_json::to_writer(&mut out, &ErrorResponse::from(&e))?;
            writeln!(out)?;
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            Ok(ExitCode::from(code))
        }
    }
}

fn encrypt(cfg: &Config, req: &EncryptRequest) -> Result<String, CseError> {
    let keys = KeyMaterial::from_hex(&cfg.public_key, Some(cfg.public_exponent))?;
    let encrypter = Encrypter::new(cfg.version.clone(), keys)?;
    encrypter.encrypt_fields(&req.fields)
}
