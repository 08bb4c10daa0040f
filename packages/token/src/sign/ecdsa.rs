//! ECDSA signatures over the NIST prime curves (ES256, ES384, ES512)
//!
//! The signature segment is the RFC 7518 §3.4 form: `r` and `s` as big-endian
//! unsigned integers, each left-padded with zeros to the curve's field width and
//! concatenated. The DER `SEQUENCE` encoding used by X.509 never appears here.

use crate::algorithms::{lookup, Family};
use crate::buffer::TokenBuffer;
use crate::claims::Claims;
use crate::codec;
use crate::error::{JwtError, JwtResult};
use p256::ecdsa::signature::RandomizedSigner;
use rand_core::OsRng;

/// Private key for one of the three ECDSA curves
#[derive(Clone)]
pub enum EcdsaKey {
    /// P-256, serves ES256
    P256(p256::ecdsa::SigningKey),
    /// P-384, serves ES384
    P384(p384::ecdsa::SigningKey),
    /// P-521, serves ES512
    P521(p521::ecdsa::SigningKey),
}

impl EcdsaKey {
    /// Curve name as used by JWK `crv`
    #[must_use]
    pub fn curve(&self) -> &'static str {
        match self {
            EcdsaKey::P256(_) => "P-256",
            EcdsaKey::P384(_) => "P-384",
            EcdsaKey::P521(_) => "P-521",
        }
    }

    /// Byte width of each signature integer: `ceil(bits / 8)`
    #[must_use]
    pub fn param_len(&self) -> usize {
        match self {
            EcdsaKey::P256(_) => 32,
            EcdsaKey::P384(_) => 48,
            EcdsaKey::P521(_) => 66,
        }
    }
}

impl std::fmt::Debug for EcdsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EcdsaKey").field(&self.curve()).finish()
    }
}

impl From<p256::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        EcdsaKey::P256(key)
    }
}

impl From<p384::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        EcdsaKey::P384(key)
    }
}

impl From<p521::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        EcdsaKey::P521(key)
    }
}

/// Fail unless `key` is on the curve `alg` is defined over.
pub(crate) fn check_curve(alg: &str, key: &EcdsaKey) -> JwtResult<()> {
    let descriptor = lookup(alg, Family::Ec)?;
    if descriptor.param_len == Some(key.param_len()) {
        Ok(())
    } else {
        Err(JwtError::CurveMismatch {
            algorithm: alg.to_string(),
            curve: key.curve(),
        })
    }
}

/// Sign `payload` with a randomized ECDSA signature.
///
/// Each curve hashes with the function ES256/ES384/ES512 assign to it, so a
/// matching key implies the catalog's hash.
pub(crate) fn sign(
    alg: &str,
    key_id: Option<&str>,
    payload: &[u8],
    key: &EcdsaKey,
) -> JwtResult<Vec<u8>> {
    check_curve(alg, key)?;
    let raw_len = 2 * key.param_len();

    let buffer = TokenBuffer::new(alg, key_id, payload, codec::encoded_len(raw_len))?;
    let message = buffer.unsigned_prefix();
    match key {
        EcdsaKey::P256(key) => {
            let sig: p256::ecdsa::Signature = key.try_sign_with_rng(&mut OsRng, message)?;
            let (r, s) = sig.split_bytes();
            buffer.finish(raw_len, |tail| pack_pair(tail, &r, &s))
        }
        EcdsaKey::P384(key) => {
            let sig: p384::ecdsa::Signature = key.try_sign_with_rng(&mut OsRng, message)?;
            let (r, s) = sig.split_bytes();
            buffer.finish(raw_len, |tail| pack_pair(tail, &r, &s))
        }
        EcdsaKey::P521(key) => {
            let sig: p521::ecdsa::Signature = key.try_sign_with_rng(&mut OsRng, message)?;
            let (r, s) = sig.split_bytes();
            buffer.finish(raw_len, |tail| pack_pair(tail, &r, &s))
        }
    }
}

/// Write `r ‖ s` into `tail`, each taking half. `s` goes in first, at the high end.
fn pack_pair(tail: &mut [u8], r: &[u8], s: &[u8]) -> JwtResult<()> {
    let (r_field, s_field) = tail.split_at_mut(tail.len() / 2);
    pack_fixed_width(s_field, s)?;
    pack_fixed_width(r_field, r)
}

/// Right-justify the big-endian `magnitude` in `dst`, zero-filling the leading bytes.
///
/// # Errors
/// [`JwtError::SignatureOverflow`] when the significant bytes do not fit.
pub(crate) fn pack_fixed_width(dst: &mut [u8], magnitude: &[u8]) -> JwtResult<()> {
    let first = magnitude
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(magnitude.len());
    let digits = &magnitude[first..];
    let Some(pad) = dst.len().checked_sub(digits.len()) else {
        return Err(JwtError::SignatureOverflow {
            param_len: dst.len(),
        });
    };
    dst[..pad].fill(0);
    dst[pad..].copy_from_slice(digits);
    Ok(())
}

impl Claims {
    /// Sign with an ECDSA algorithm.
    ///
    /// Signing draws from the OS random source, so two calls over the same claims
    /// give different signatures.
    ///
    /// # Errors
    /// [`JwtError::Alg`] when `alg` is not ES256, ES384 or ES512;
    /// [`JwtError::CurveMismatch`] when `key` is on another curve;
    /// [`JwtError::Ecdsa`] when the signing primitive fails.
    pub fn ecdsa_sign(&self, alg: &str, key: &EcdsaKey) -> JwtResult<Vec<u8>> {
        sign(alg, self.key_id(), &self.raw, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use proptest::prelude::*;

    #[test]
    fn short_magnitude_is_left_padded() {
        let mut field = [0xffu8; 8];
        pack_fixed_width(&mut field, &hex!("0000 01 02 03")).unwrap();
        assert_eq!(field, hex!("0000000000 010203"));
    }

    #[test]
    fn wide_magnitude_overflows() {
        let mut field = [0u8; 2];
        assert!(matches!(
            pack_fixed_width(&mut field, &hex!("010000")),
            Err(JwtError::SignatureOverflow { param_len: 2 })
        ));
        pack_fixed_width(&mut field, &hex!("00 00 ff ff")).unwrap();
        assert_eq!(field, hex!("ffff"));
    }

    #[test]
    fn pair_order_is_r_then_s() {
        let mut tail = [0xaau8; 8];
        pack_pair(&mut tail, &hex!("0102"), &hex!("00000000 0a0b0c0d")).unwrap();
        assert_eq!(tail, hex!("00000102 0a0b0c0d"));
    }

    #[test]
    fn curve_must_match_algorithm() {
        let key = EcdsaKey::from(p256::ecdsa::SigningKey::random(&mut OsRng));
        assert!(check_curve("ES256", &key).is_ok());
        assert!(matches!(
            check_curve("ES384", &key),
            Err(JwtError::CurveMismatch { curve: "P-256", .. })
        ));
        assert!(matches!(check_curve("RS256", &key), Err(JwtError::Alg { .. })));
    }

    proptest! {
        #[test]
        fn packing_preserves_value(value in proptest::collection::vec(any::<u8>(), 0..=66), extra in 0usize..8) {
            let mut field = vec![0x55u8; value.len() + extra];
            pack_fixed_width(&mut field, &value).unwrap();

            let pad = field.len() - value.len();
            prop_assert!(field[..pad].iter().all(|&b| b == 0));
            prop_assert_eq!(&field[pad..], value.as_slice());
        }
    }
}
