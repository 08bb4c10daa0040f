//! Token claims: the serialized payload plus the key id that goes into the header.

use crate::buffer::TokenBuffer;
use crate::error::JwtResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Payload and header inputs for one token.
///
/// `raw` is opaque: it is base64url-encoded as given and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    /// Serialized payload, normally a JSON object
    pub raw: Vec<u8>,
    /// Key id for the `kid` header; empty is the same as absent
    pub key_id: Option<String>,
}

impl Claims {
    /// Claims over an already-serialized payload
    #[must_use]
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: raw.into(),
            key_id: None,
        }
    }

    /// Serialize `claims` into the payload.
    ///
    /// # Errors
    /// Returns [`crate::JwtError::Serialization`] if `claims` cannot be represented as JSON.
    pub fn from_json<T: Serialize + ?Sized>(claims: &T) -> JwtResult<Self> {
        Ok(Self::new(serde_json::to_vec(claims)?))
    }

    /// Set the `kid` header
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// Key id when set and non-empty
    #[inline]
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref().filter(|kid| !kid.is_empty())
    }

    /// Build `header "." payload` without a signature, for keys held elsewhere.
    ///
    /// `alg` is written to the header as given. The result has one spare byte of
    /// capacity for the delimiter the external signer appends.
    ///
    /// # Errors
    /// Returns a serialization error when the header JSON cannot be written.
    pub fn format_without_sign(&self, alg: &str) -> JwtResult<Vec<u8>> {
        TokenBuffer::new(alg, self.key_id(), &self.raw, 0).map(TokenBuffer::into_unsigned)
    }
}

/// Registered claim names (RFC 7519 §4.1) with custom claims flattened alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registered {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Vec<String>>,
    /// Expiry (unix seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not before (unix seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Issued at (unix seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Custom claims
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

impl Registered {
    /// Empty claim set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer (iss) claim.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the subject (sub) claim.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the audience (aud) claim.
    #[must_use]
    pub fn audience(mut self, aud: Vec<String>) -> Self {
        self.aud = Some(aud);
        self
    }

    /// Set the issued-at time to now.
    #[must_use]
    pub fn issued_now(mut self) -> Self {
        self.iat = Some(Utc::now().timestamp());
        self
    }

    /// Set the expiry relative to now.
    #[must_use]
    pub fn expires_in(mut self, dur: Duration) -> Self {
        self.exp = Some((Utc::now() + dur).timestamp());
        self
    }

    /// Set the not-before (nbf) claim.
    #[must_use]
    pub fn not_before(mut self, nbf: DateTime<Utc>) -> Self {
        self.nbf = Some(nbf.timestamp());
        self
    }

    /// Set the JWT ID (jti) claim.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Add a custom claim.
    #[must_use]
    pub fn claim(mut self, k: impl Into<String>, v: Value) -> Self {
        self.custom.insert(k.into(), v);
        self
    }

    /// Serialize into signable [`Claims`].
    ///
    /// # Errors
    /// Returns [`crate::JwtError::Serialization`] when a custom claim cannot be serialized.
    pub fn to_claims(&self) -> JwtResult<Claims> {
        Claims::from_json(self)
    }
}
