//! Signature engines
//!
//! Each engine plans a [`crate::buffer::TokenBuffer`] for its exact encoded
//! signature length, signs the unsigned prefix and expands the raw signature in
//! place. The `Claims::*_sign` methods live next to their engine.

mod ecdsa;
mod eddsa;
mod hmac;
mod rsa;

pub use self::ecdsa::EcdsaKey;

pub(crate) use self::ecdsa::check_curve;
pub(crate) use self::ecdsa::sign as ecdsa_sign;
pub(crate) use self::eddsa::sign as eddsa_sign;
pub(crate) use self::hmac::sign as hmac_sign;
pub(crate) use self::rsa::sign as rsa_sign;
