//! Configured signer: one algorithm, one key, optional key id.
//!
//! ```no_run
//! use cryypt_token::{Registered, TokenSigner, HS256};
//!
//! # fn main() -> cryypt_token::JwtResult<()> {
//! let signer = TokenSigner::hmac(HS256, b"my-secret".to_vec())?.with_key_id("2024-01");
//! let token = signer.sign_json(&Registered::new().subject("alice").issued_now())?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

use crate::algorithms::{lookup, Family, EDDSA};
use crate::claims::Claims;
use crate::error::{JwtError, JwtResult};
use crate::sign::{self, EcdsaKey};
use rsa::RsaPrivateKey;
use serde::Serialize;
use zeroize::Zeroizing;

enum KeyMaterial {
    Hmac(Zeroizing<Vec<u8>>),
    Rsa(Box<RsaPrivateKey>),
    Ecdsa(EcdsaKey),
    Ed25519(ed25519_dalek::SigningKey),
}

/// Signs payloads with a fixed algorithm and key.
///
/// The algorithm and key are checked against each other once, at construction.
/// The signer holds no mutable state and can be shared across threads.
pub struct TokenSigner {
    alg: &'static str,
    key: KeyMaterial,
    key_id: Option<String>,
}

impl TokenSigner {
    /// HMAC signer for HS256, HS384 or HS512.
    ///
    /// # Errors
    /// [`JwtError::SecretRequired`] for an empty secret, [`JwtError::Alg`] for a
    /// non-HMAC algorithm.
    pub fn hmac(alg: &str, secret: impl Into<Vec<u8>>) -> JwtResult<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(JwtError::SecretRequired);
        }
        let alg = lookup(alg, Family::Mac)?.name;
        Ok(Self::with_key(alg, KeyMaterial::Hmac(secret)))
    }

    /// RSA signer for RS256..RS512 (PKCS#1 v1.5) or PS256..PS512 (PSS).
    ///
    /// # Errors
    /// [`JwtError::Alg`] for a non-RSA algorithm.
    pub fn rsa(alg: &str, key: RsaPrivateKey) -> JwtResult<Self> {
        let alg = lookup(alg, Family::Rsa)?.name;
        Ok(Self::with_key(alg, KeyMaterial::Rsa(Box::new(key))))
    }

    /// ECDSA signer for ES256, ES384 or ES512.
    ///
    /// # Errors
    /// [`JwtError::Alg`] for a non-ECDSA algorithm, [`JwtError::CurveMismatch`] when
    /// the key is not on the algorithm's curve.
    pub fn ecdsa(alg: &str, key: impl Into<EcdsaKey>) -> JwtResult<Self> {
        let key = key.into();
        sign::check_curve(alg, &key)?;
        let alg = lookup(alg, Family::Ec)?.name;
        Ok(Self::with_key(alg, KeyMaterial::Ecdsa(key)))
    }

    /// EdDSA signer over Ed25519.
    #[must_use]
    pub fn eddsa(key: ed25519_dalek::SigningKey) -> Self {
        Self::with_key(EDDSA, KeyMaterial::Ed25519(key))
    }

    fn with_key(alg: &'static str, key: KeyMaterial) -> Self {
        Self {
            alg,
            key,
            key_id: None,
        }
    }

    /// Put `kid` in the header of every token this signer produces.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// Algorithm identifier written to the header
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        self.alg
    }

    /// Configured key id, if any
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref().filter(|kid| !kid.is_empty())
    }

    /// Sign an already-serialized payload.
    ///
    /// # Errors
    /// Signing primitive failures, returned unchanged.
    pub fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        self.sign_with(self.key_id(), payload)
    }

    /// Sign `claims`. A key id on the claims takes precedence over the signer's.
    ///
    /// # Errors
    /// See [`TokenSigner::sign`].
    pub fn sign_claims(&self, claims: &Claims) -> JwtResult<Vec<u8>> {
        self.sign_with(claims.key_id().or(self.key_id()), &claims.raw)
    }

    /// Serialize `claims` to JSON and sign the result.
    ///
    /// # Errors
    /// [`JwtError::Serialization`] when `claims` cannot be serialized, otherwise as
    /// [`TokenSigner::sign`].
    pub fn sign_json<T: Serialize + ?Sized>(&self, claims: &T) -> JwtResult<Vec<u8>> {
        let payload = serde_json::to_vec(claims)?;
        self.sign(&payload)
    }

    fn sign_with(&self, key_id: Option<&str>, payload: &[u8]) -> JwtResult<Vec<u8>> {
        let result = match &self.key {
            KeyMaterial::Hmac(secret) => sign::hmac_sign(self.alg, key_id, payload, secret),
            KeyMaterial::Rsa(key) => sign::rsa_sign(self.alg, key_id, payload, key),
            KeyMaterial::Ecdsa(key) => sign::ecdsa_sign(self.alg, key_id, payload, key),
            KeyMaterial::Ed25519(key) => sign::eddsa_sign(key_id, payload, key),
        };
        match &result {
            Ok(token) => tracing::debug!(alg = self.alg, token_len = token.len(), "signed token"),
            Err(e) => tracing::warn!(
                alg = self.alg,
                primitive = e.is_signature_primitive(),
                error = %e,
                "token signing failed"
            ),
        }
        result
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("alg", &self.alg)
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}
