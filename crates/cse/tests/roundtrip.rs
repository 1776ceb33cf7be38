//! Gateway-side round trip: unwrap the AES key with the RSA private key,
//! open the CCM payload, and check the JSON.

use std::collections::BTreeMap;

use adyen_cse::crypto::cipher::{self, SealedPayload};
use adyen_cse::crypto::{KEY_LEN, NONCE_LEN, TAG_LEN};
use adyen_cse::encrypter::GENERATION_TIME_FORMAT;
use adyen_cse::{Encrypter, KeyMaterial, Token};
use chrono::{DateTime, TimeZone, Utc};
use rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use serde_json::Value;

fn key_pair() -> (RsaPrivateKey, KeyMaterial) {
    let private_key = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
    let public_key = RsaPublicKey::from(&private_key);
    let keys = KeyMaterial::from_modulus(&public_key.n().to_bytes_be(), None).unwrap();
    (private_key, keys)
}

/// Decrypt a token the way the gateway does.
fn decrypt(private_key: &RsaPrivateKey, token: &str) -> Value {
    let token: Token = token.parse().unwrap();
    let aes_key = private_key.decrypt(Pkcs1v15Encrypt, &token.wrapped_key).unwrap();
    assert_eq!(aes_key.len(), KEY_LEN);

    let sealed = SealedPayload::from_bytes(&token.sealed).unwrap();
    let plaintext = cipher::open(&sealed, &aes_key).unwrap();
    serde_json::from_slice(&plaintext).unwrap()
}

#[test]
fn card_number_round_trip() {
    let (private_key, keys) = key_pair();
    let enc = Encrypter::new("0_1_18", keys).unwrap();

    let token = enc.encrypt_single_field("number", "4111111111111111").unwrap();
    assert!(token.starts_with("adyenjs_0_1_18$"));

    let payload = decrypt(&private_key, &token);
    assert_eq!(payload["number"], "4111111111111111");

    let generation_time = payload["generationtime"].as_str().unwrap();
    assert!(DateTime::parse_from_str(generation_time, GENERATION_TIME_FORMAT).is_ok());
    assert_eq!(payload.as_object().unwrap().len(), 2);
}

#[test]
fn card_fields_use_canonical_names() {
    let (private_key, keys) = key_pair();
    let enc = Encrypter::new("0_1_25", keys).unwrap();

    let token = enc
        .encrypt_card_fields("4111 1111 1111 1111", "737", "03", "2030")
        .unwrap();
    let payload = decrypt(&private_key, &token);

    assert_eq!(payload["number"], "4111 1111 1111 1111");
    assert_eq!(payload["cvc"], "737");
    assert_eq!(payload["expiryMonth"], "03");
    assert_eq!(payload["expiryYear"], "2030");
    assert!(payload["generationtime"].is_string());
}

#[test]
fn repeated_calls_differ_but_decrypt_equivalently() {
    let (private_key, keys) = key_pair();
    let fixed = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().fixed_offset();
    let enc = Encrypter::new("0_1_21", keys)
        .unwrap()
        .with_generation_time(move || fixed);

    let a = enc.encrypt_single_field("number", "5123459046058920").unwrap();
    let b = enc.encrypt_single_field("number", "5123459046058920").unwrap();
    assert_ne!(a, b);

    let pa = decrypt(&private_key, &a);
    let pb = decrypt(&private_key, &b);
    assert_eq!(pa, pb);
    assert_eq!(pa["generationtime"], "2024-05-01T12:00:00.000+00:00");
}

#[test]
fn explicit_generation_time_survives_encryption() {
    let (private_key, keys) = key_pair();
    let enc = Encrypter::new("0_1_25", keys).unwrap();

    let fields = BTreeMap::from([
        ("number".to_owned(), "4111111111111111".to_owned()),
        (
            "generationtime".to_owned(),
            "2017-07-17T13:42:40.428+01:00".to_owned(),
        ),
    ]);
    let payload = decrypt(&private_key, &enc.encrypt_fields(&fields).unwrap());
    assert_eq!(payload["generationtime"], "2017-07-17T13:42:40.428+01:00");
}

#[test]
fn sealed_segment_layout() {
    let (_, keys) = key_pair();
    let fixed = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().fixed_offset();
    let enc = Encrypter::new("0_1_25", keys)
        .unwrap()
        .with_generation_time(move || fixed);

    let token: Token = enc
        .encrypt_single_field("cvc", "737")
        .unwrap()
        .parse()
        .unwrap();
    let plaintext = br#"{"cvc":"737","generationtime":"2024-05-01T12:00:00.000+00:00"}"#;
    assert_eq!(token.sealed.len(), NONCE_LEN + plaintext.len() + TAG_LEN);
    assert_eq!(token.wrapped_key.len(), 128);
}

#[test]
fn reset_changes_the_wrapped_key() {
    let (private_key, keys) = key_pair();
    let mut enc = Encrypter::new("0_1_25", keys).unwrap();

    let before: Token = enc.encrypt_single_field("cvc", "737").unwrap().parse().unwrap();
    enc.reset().unwrap();
    let after: Token = enc.encrypt_single_field("cvc", "737").unwrap().parse().unwrap();

    let key_before = private_key.decrypt(Pkcs1v15Encrypt, &before.wrapped_key).unwrap();
    let key_after = private_key.decrypt(Pkcs1v15Encrypt, &after.wrapped_key).unwrap();
    assert_ne!(key_before, key_after);
}
