//! Tests for claims serialization into signable payloads

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use cryypt_token::{Claims, JwtError, Registered, TokenSigner, HS256};
use serde::Serialize;
use serde_json::{json, Value};

fn payload_of(token: &[u8]) -> Value {
    let segment = token.split(|&b| b == b'.').nth(1).unwrap();
    serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
}

#[test]
fn test_registered_claims_round_trip() {
    let registered = Registered::new()
        .issuer("test-issuer")
        .subject("test-user")
        .audience(vec!["api".to_string(), "web".to_string()])
        .issued_now()
        .expires_in(Duration::hours(1))
        .not_before(Utc::now())
        .jwt_id("unique-id-123");

    let token = registered
        .to_claims()
        .unwrap()
        .hmac_sign(HS256, b"secret")
        .unwrap();
    let payload = payload_of(&token);

    assert_eq!(payload["iss"], "test-issuer");
    assert_eq!(payload["sub"], "test-user");
    assert_eq!(payload["aud"], json!(["api", "web"]));
    assert_eq!(payload["jti"], "unique-id-123");
    assert!(payload["exp"].as_i64().unwrap() > payload["iat"].as_i64().unwrap());

    let back: Registered = serde_json::from_value(payload).unwrap();
    assert_eq!(back, registered);
}

#[test]
fn test_unset_claims_are_omitted() {
    let claims = Registered::new().subject("only-sub").to_claims().unwrap();
    assert_eq!(claims.raw, br#"{"sub":"only-sub"}"#);
    assert_eq!(claims.key_id, None);
}

#[test]
fn test_custom_claims_are_flattened() {
    let claims = Registered::new()
        .subject("custom-data-test")
        .claim("role", json!("admin"))
        .claim("permissions", json!(["read", "write", "delete"]))
        .to_claims()
        .unwrap();

    let payload: Value = serde_json::from_slice(&claims.raw).unwrap();
    assert_eq!(payload["role"], "admin");
    assert_eq!(payload["permissions"], json!(["read", "write", "delete"]));
    assert!(payload.get("custom").is_none());
}

#[test]
fn test_raw_payload_is_opaque() {
    // not JSON at all; the engine encodes whatever it is given
    let claims = Claims::new(vec![0xff, 0x00, b'.', 0x7f]);
    let token = claims.hmac_sign(HS256, b"secret").unwrap();
    let segment = token.split(|&b| b == b'.').nth(1).unwrap();
    assert_eq!(URL_SAFE_NO_PAD.decode(segment).unwrap(), claims.raw);
}

#[test]
fn test_signer_serializes_any_claims_type() {
    #[derive(Serialize)]
    struct Session<'a> {
        sid: &'a str,
        scopes: &'a [&'a str],
    }

    let signer = TokenSigner::hmac(HS256, b"secret".to_vec()).unwrap();
    let session = Session {
        sid: "abc",
        scopes: &["read"],
    };
    let token = signer.sign_json(&session).unwrap();
    assert_eq!(payload_of(&token), json!({"sid": "abc", "scopes": ["read"]}));
    assert_eq!(token, Claims::from_json(&session).unwrap().hmac_sign(HS256, b"secret").unwrap());
}

#[test]
fn test_unserializable_claims_fail() {
    use std::collections::BTreeMap;

    // JSON object keys must be strings
    let mut bad = BTreeMap::new();
    bad.insert(vec![1u8], 1);
    assert!(matches!(Claims::from_json(&bad), Err(JwtError::Serialization(_))));
}
