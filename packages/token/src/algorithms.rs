//! Algorithm catalog: the JWA identifiers accepted per signature family

use crate::error::{JwtError, JwtResult};

/// HMAC using SHA-256
pub const HS256: &str = "HS256";
/// HMAC using SHA-384
pub const HS384: &str = "HS384";
/// HMAC using SHA-512
pub const HS512: &str = "HS512";
/// RSASSA-PKCS1-v1_5 using SHA-256
pub const RS256: &str = "RS256";
/// RSASSA-PKCS1-v1_5 using SHA-384
pub const RS384: &str = "RS384";
/// RSASSA-PKCS1-v1_5 using SHA-512
pub const RS512: &str = "RS512";
/// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
pub const PS256: &str = "PS256";
/// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
pub const PS384: &str = "PS384";
/// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
pub const PS512: &str = "PS512";
/// ECDSA using P-256 and SHA-256
pub const ES256: &str = "ES256";
/// ECDSA using P-384 and SHA-384
pub const ES384: &str = "ES384";
/// ECDSA using P-521 and SHA-512
pub const ES512: &str = "ES512";
/// Edwards-curve signatures (Ed25519)
pub const EDDSA: &str = "EdDSA";

/// MAC family identifiers
pub const HMAC_ALGS: [&str; 3] = [HS256, HS384, HS512];
/// RSA family identifiers
pub const RSA_ALGS: [&str; 6] = [RS256, RS384, RS512, PS256, PS384, PS512];
/// Elliptic-curve family identifiers
pub const ECDSA_ALGS: [&str; 3] = [ES256, ES384, ES512];
/// Edwards-curve family identifiers
pub const EDDSA_ALGS: [&str; 1] = [EDDSA];

/// Signature family; groups identifiers sharing a signing primitive shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Symmetric message authentication code
    Mac,
    /// RSA with PKCS#1 v1.5 or PSS padding
    Rsa,
    /// ECDSA over the NIST prime curves
    Ec,
    /// Ed25519
    EdDsa,
}

/// Hash primitive selected by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest width in bytes
    #[inline]
    #[must_use]
    pub const fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

/// Static description of one algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    /// JWA identifier as it appears in the header
    pub name: &'static str,
    /// Family the identifier belongs to
    pub family: Family,
    /// Hash primitive. For EdDSA this is the hash Ed25519 applies internally.
    pub hash: HashAlgorithm,
    /// Fixed byte width of each signature integer; EC family only
    pub param_len: Option<usize>,
}

impl AlgorithmDescriptor {
    const fn new(name: &'static str, family: Family, hash: HashAlgorithm) -> Self {
        Self {
            name,
            family,
            hash,
            param_len: None,
        }
    }

    const fn curve(name: &'static str, hash: HashAlgorithm, param_len: usize) -> Self {
        Self {
            name,
            family: Family::Ec,
            hash,
            param_len: Some(param_len),
        }
    }
}

/// Every supported algorithm, read-only for the lifetime of the process
pub static ALGORITHMS: [AlgorithmDescriptor; 13] = [
    AlgorithmDescriptor::new(HS256, Family::Mac, HashAlgorithm::Sha256),
    AlgorithmDescriptor::new(HS384, Family::Mac, HashAlgorithm::Sha384),
    AlgorithmDescriptor::new(HS512, Family::Mac, HashAlgorithm::Sha512),
    AlgorithmDescriptor::new(RS256, Family::Rsa, HashAlgorithm::Sha256),
    AlgorithmDescriptor::new(RS384, Family::Rsa, HashAlgorithm::Sha384),
    AlgorithmDescriptor::new(RS512, Family::Rsa, HashAlgorithm::Sha512),
    AlgorithmDescriptor::new(PS256, Family::Rsa, HashAlgorithm::Sha256),
    AlgorithmDescriptor::new(PS384, Family::Rsa, HashAlgorithm::Sha384),
    AlgorithmDescriptor::new(PS512, Family::Rsa, HashAlgorithm::Sha512),
    AlgorithmDescriptor::curve(ES256, HashAlgorithm::Sha256, 32),
    AlgorithmDescriptor::curve(ES384, HashAlgorithm::Sha384, 48),
    AlgorithmDescriptor::curve(ES512, HashAlgorithm::Sha512, 66),
    AlgorithmDescriptor::new(EDDSA, Family::EdDsa, HashAlgorithm::Sha512),
];

/// Resolve `alg` within `family`.
///
/// # Errors
/// Returns [`JwtError::Alg`] when `alg` is not one of the family's identifiers.
pub fn lookup(alg: &str, family: Family) -> JwtResult<&'static AlgorithmDescriptor> {
    ALGORITHMS
        .iter()
        .find(|d| d.family == family && d.name == alg)
        .ok_or_else(|| JwtError::alg(alg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_partition_the_table() {
        let sets: [(Family, &[&str]); 4] = [
            (Family::Mac, &HMAC_ALGS),
            (Family::Rsa, &RSA_ALGS),
            (Family::Ec, &ECDSA_ALGS),
            (Family::EdDsa, &EDDSA_ALGS),
        ];
        for (family, names) in sets {
            for name in names {
                assert_eq!(lookup(name, family).map(|d| d.name).ok(), Some(*name));
            }
        }
        let total: usize = sets.iter().map(|(_, names)| names.len()).sum();
        assert_eq!(total, ALGORITHMS.len());
    }

    #[test]
    fn cross_family_lookup_fails() {
        assert!(matches!(
            lookup(HS256, Family::Rsa),
            Err(JwtError::Alg { algorithm }) if algorithm == HS256
        ));
        assert!(lookup(ES256, Family::Mac).is_err());
        assert!(lookup(EDDSA, Family::Ec).is_err());
        assert!(lookup("hs256", Family::Mac).is_err());
        assert!(lookup("", Family::EdDsa).is_err());
    }

    #[test]
    fn curve_widths() {
        let widths: Vec<_> = ECDSA_ALGS
            .iter()
            .map(|alg| lookup(alg, Family::Ec).ok().and_then(|d| d.param_len))
            .collect();
        assert_eq!(widths, [Some(32), Some(48), Some(66)]);
        assert_eq!(lookup(HS512, Family::Mac).ok().and_then(|d| d.param_len), None);
    }
}
