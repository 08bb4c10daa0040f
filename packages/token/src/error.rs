//! Token signing error types

use thiserror::Error;

/// Result type for token operations
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors surfaced while building or signing a token.
///
/// Every variant is terminal for the call that produced it: no partial token is
/// ever returned and nothing is retried internally.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Algorithm identifier is not a member of the required family
    #[error("algorithm {algorithm:?} not in the required family")]
    Alg {
        /// The rejected identifier
        algorithm: String,
    },

    /// An HMAC signature was requested with an empty secret
    #[error("HMAC secret required")]
    SecretRequired,

    /// RSA signing primitive failure
    #[error(transparent)]
    Rsa(#[from] rsa::Error),

    /// ECDSA or EdDSA signing primitive failure
    #[error(transparent)]
    Ecdsa(#[from] p256::ecdsa::Error),

    /// An elliptic-curve signature integer does not fit its fixed-width field
    #[error("signature integer exceeds {param_len} bytes")]
    SignatureOverflow {
        /// Field width of the curve in bytes
        param_len: usize,
    },

    /// The elliptic-curve key cannot serve the requested algorithm
    #[error("{curve} key cannot sign {algorithm}")]
    CurveMismatch {
        /// Requested algorithm identifier
        algorithm: String,
        /// Curve of the supplied key
        curve: &'static str,
    },

    /// Destination for a base64url segment was mis-sized
    #[error("base64url encoding: {0}")]
    Encoding(#[from] base64::EncodeSliceError),

    /// Claims or header JSON serialization failed
    #[error("JSON serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JwtError {
    /// Create an algorithm error
    #[inline]
    #[must_use]
    pub fn alg(algorithm: &str) -> Self {
        JwtError::Alg {
            algorithm: algorithm.to_string(),
        }
    }

    /// Whether the failure came from the underlying signature primitive
    #[must_use]
    pub fn is_signature_primitive(&self) -> bool {
        matches!(self, JwtError::Rsa(_) | JwtError::Ecdsa(_))
    }
}
