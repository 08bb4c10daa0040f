//! Compact JWT construction and signing
//!
//! Tokens are produced as `base64url(header) "." base64url(payload) "." base64url(signature)`
//! for the JWA algorithm families:
//! - HMAC: HS256, HS384, HS512
//! - RSA: RS256, RS384, RS512 (PKCS#1 v1.5) and PS256, PS384, PS512 (PSS)
//! - ECDSA: ES256, ES384, ES512 with fixed-width `r ‖ s` signatures
//! - EdDSA: Ed25519
//!
//! Each sign call allocates the token once at its final size; the raw signature is
//! staged in the reserved tail and expanded into base64url in place.
//!
//! ```no_run
//! use cryypt_token::{Claims, HS256};
//!
//! # fn main() -> cryypt_token::JwtResult<()> {
//! let claims = Claims::new(br#"{"sub":"alice"}"#.to_vec()).with_key_id("k1");
//! let token = claims.hmac_sign(HS256, b"secret")?;
//! assert_eq!(token.split(|&b| b == b'.').count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod buffer;
mod claims;
pub mod codec;
mod error;
pub mod header;
mod sign;
mod signer;

pub use algorithms::{
    lookup, AlgorithmDescriptor, Family, HashAlgorithm, EDDSA, ES256, ES384, ES512, HS256, HS384,
    HS512, PS256, PS384, PS512, RS256, RS384, RS512,
};
pub use claims::{Claims, Registered};
pub use error::*;
pub use sign::EcdsaKey;
pub use signer::TokenSigner;

// Key types accepted by the signing entry points
pub use ed25519_dalek;
pub use p256;
pub use p384;
pub use p521;
pub use rsa;
