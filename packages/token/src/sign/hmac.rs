//! HMAC-SHA2 signatures (HS256, HS384, HS512)

use crate::algorithms::{lookup, Family, HashAlgorithm};
use crate::buffer::TokenBuffer;
use crate::claims::Claims;
use crate::codec;
use crate::error::{JwtError, JwtResult};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Sign `payload` with an HMAC over `header "." payload`.
pub(crate) fn sign(
    alg: &str,
    key_id: Option<&str>,
    payload: &[u8],
    secret: &[u8],
) -> JwtResult<Vec<u8>> {
    if secret.is_empty() {
        return Err(JwtError::SecretRequired);
    }
    let hash = lookup(alg, Family::Mac)?.hash;
    let mac_len = hash.output_size();

    let buffer = TokenBuffer::new(alg, key_id, payload, codec::encoded_len(mac_len))?;
    let message = buffer.unsigned_prefix();
    let mac = match hash {
        HashAlgorithm::Sha256 => authenticate::<HmacSha256>(secret, message)?,
        HashAlgorithm::Sha384 => authenticate::<HmacSha384>(secret, message)?,
        HashAlgorithm::Sha512 => authenticate::<HmacSha512>(secret, message)?,
    };
    buffer.finish(mac_len, |tail| {
        tail.copy_from_slice(&mac[..mac_len]);
        Ok(())
    })
}

/// Tag of `message` under `secret`, in a 64-byte array wide enough for SHA-512
#[inline]
fn authenticate<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> JwtResult<[u8; 64]> {
    // HMAC keys of any length are accepted; only the empty secret, rejected by the
    // caller, counts as missing
    let mut mac = <M as KeyInit>::new_from_slice(secret).map_err(|_| JwtError::SecretRequired)?;
    mac.update(message);
    let tag = mac.finalize().into_bytes();

    let mut out = [0u8; 64];
    out[..tag.len()].copy_from_slice(&tag);
    Ok(out)
}

impl Claims {
    /// Sign with an HMAC algorithm.
    ///
    /// # Errors
    /// [`JwtError::SecretRequired`] for an empty secret, checked first;
    /// [`JwtError::Alg`] when `alg` is not HS256, HS384 or HS512.
    pub fn hmac_sign(&self, alg: &str, secret: &[u8]) -> JwtResult<Vec<u8>> {
        sign(alg, self.key_id(), &self.raw, secret)
    }
}
