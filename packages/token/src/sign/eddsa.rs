//! Ed25519 signatures (EdDSA)

use crate::algorithms::EDDSA;
use crate::buffer::TokenBuffer;
use crate::claims::Claims;
use crate::codec;
use crate::error::JwtResult;
use ed25519_dalek::{Signer, SigningKey, SIGNATURE_LENGTH};

/// Sign `payload` with Ed25519 directly over `header "." payload`.
pub(crate) fn sign(key_id: Option<&str>, payload: &[u8], key: &SigningKey) -> JwtResult<Vec<u8>> {
    let buffer = TokenBuffer::new(EDDSA, key_id, payload, codec::encoded_len(SIGNATURE_LENGTH))?;
    let sig = key.sign(buffer.unsigned_prefix()).to_bytes();
    buffer.finish_with(&sig)
}

impl Claims {
    /// Sign with EdDSA over Ed25519. Output is deterministic for a given key.
    ///
    /// # Errors
    /// Only header serialization or internal encoding errors; Ed25519 signing is infallible.
    pub fn eddsa_sign(&self, key: &SigningKey) -> JwtResult<Vec<u8>> {
        sign(self.key_id(), &self.raw, key)
    }
}
