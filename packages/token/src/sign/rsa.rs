//! RSA signatures: PKCS#1 v1.5 (RS256, RS384, RS512) and PSS (PS256, PS384, PS512)

use crate::algorithms::{lookup, Family, HashAlgorithm};
use crate::buffer::TokenBuffer;
use crate::claims::Claims;
use crate::codec;
use crate::error::JwtResult;
use rand_core::OsRng;
use rsa::pkcs8::AssociatedOid;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey};
use sha2::digest::DynDigest;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Sign `payload` with `key`; a leading `P` in `alg` selects PSS padding.
pub(crate) fn sign(
    alg: &str,
    key_id: Option<&str>,
    payload: &[u8],
    key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    let hash = lookup(alg, Family::Rsa)?.hash;
    let pss = alg.starts_with('P');
    let sig_len = key.size();

    let buffer = TokenBuffer::new(alg, key_id, payload, codec::encoded_len(sig_len))?;
    let message = buffer.unsigned_prefix();
    let sig = match hash {
        HashAlgorithm::Sha256 => sign_digest::<Sha256>(key, message, pss)?,
        HashAlgorithm::Sha384 => sign_digest::<Sha384>(key, message, pss)?,
        HashAlgorithm::Sha512 => sign_digest::<Sha512>(key, message, pss)?,
    };
    buffer.finish_with(&sig)
}

/// Hash `message` with `D` and sign the digest. The blinding RNG does not make
/// PKCS#1 v1.5 output random; PSS draws its salt from it.
fn sign_digest<D>(key: &RsaPrivateKey, message: &[u8], pss: bool) -> rsa::Result<Vec<u8>>
where
    D: Digest + DynDigest + AssociatedOid + Send + Sync + 'static,
{
    let digest = D::digest(message);
    if pss {
        key.sign_with_rng(&mut OsRng, Pss::new::<D>(), &digest)
    } else {
        key.sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<D>(), &digest)
    }
}

impl Claims {
    /// Sign with an RSA algorithm.
    ///
    /// The signature segment length follows from the modulus size of `key`.
    ///
    /// # Errors
    /// [`crate::JwtError::Alg`] when `alg` is not in the RSA family;
    /// [`crate::JwtError::Rsa`] when the key cannot produce the signature.
    pub fn rsa_sign(&self, alg: &str, key: &RsaPrivateKey) -> JwtResult<Vec<u8>> {
        sign(alg, self.key_id(), &self.raw, key)
    }
}
