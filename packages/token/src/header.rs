//! Header segment encoding
//!
//! Almost every token carries one of thirteen well-known headers, so the encoded form
//! of `{"alg":"<ALG>"}` is kept as a constant per algorithm. Anything else (a key id,
//! an unknown identifier) goes through JSON construction.

use crate::algorithms::{
    EDDSA, ES256, ES384, ES512, HS256, HS384, HS512, PS256, PS384, PS512, RS256, RS384, RS512,
};
use crate::codec;
use crate::error::JwtResult;

/// Encoded `{"alg":"<ALG>"}` for each known algorithm
#[must_use]
pub fn fixed_header(alg: &str) -> Option<&'static str> {
    let fixed = match alg {
        EDDSA => "eyJhbGciOiJFZERTQSJ9",
        ES256 => "eyJhbGciOiJFUzI1NiJ9",
        ES384 => "eyJhbGciOiJFUzM4NCJ9",
        ES512 => "eyJhbGciOiJFUzUxMiJ9",
        HS256 => "eyJhbGciOiJIUzI1NiJ9",
        HS384 => "eyJhbGciOiJIUzM4NCJ9",
        HS512 => "eyJhbGciOiJIUzUxMiJ9",
        PS256 => "eyJhbGciOiJQUzI1NiJ9",
        PS384 => "eyJhbGciOiJQUzM4NCJ9",
        PS512 => "eyJhbGciOiJQUzUxMiJ9",
        RS256 => "eyJhbGciOiJSUzI1NiJ9",
        RS384 => "eyJhbGciOiJSUzM4NCJ9",
        RS512 => "eyJhbGciOiJSUzUxMiJ9",
        _ => return None,
    };
    Some(fixed)
}

/// Header segment ready to be written into a token buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSegment {
    /// Precomputed encoded header
    Fixed(&'static str),
    /// Header JSON still to be encoded
    Json(Vec<u8>),
}

impl HeaderSegment {
    /// Select the header for `alg`, with `key_id` when non-empty.
    ///
    /// # Errors
    /// Returns [`crate::JwtError::Serialization`] if a JSON string cannot be written.
    pub fn new(alg: &str, key_id: Option<&str>) -> JwtResult<Self> {
        let key_id = key_id.filter(|kid| !kid.is_empty());
        if key_id.is_none() {
            if let Some(fixed) = fixed_header(alg) {
                return Ok(HeaderSegment::Fixed(fixed));
            }
        }
        header_json(alg, key_id).map(HeaderSegment::Json)
    }

    /// Encoded length of the segment
    #[inline]
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            HeaderSegment::Fixed(fixed) => fixed.len(),
            HeaderSegment::Json(json) => codec::encoded_len(json.len()),
        }
    }

    /// Write the encoded segment into `dst`, which must be `encoded_len()` long.
    ///
    /// # Errors
    /// Returns [`crate::JwtError::Encoding`] when `dst` is too short.
    pub fn write_into(&self, dst: &mut [u8]) -> JwtResult<usize> {
        match self {
            HeaderSegment::Fixed(fixed) => {
                let out = dst
                    .get_mut(..fixed.len())
                    .ok_or(base64::EncodeSliceError::OutputSliceTooSmall)?;
                out.copy_from_slice(fixed.as_bytes());
                Ok(fixed.len())
            }
            HeaderSegment::Json(json) => codec::encode(dst, json),
        }
    }

    /// Encoded segment as owned bytes
    ///
    /// # Errors
    /// Propagates [`HeaderSegment::write_into`] failures.
    pub fn to_vec(&self) -> JwtResult<Vec<u8>> {
        let mut out = vec![0u8; self.encoded_len()];
        self.write_into(&mut out)?;
        Ok(out)
    }
}

/// `{"kid":<kid>,"alg":<alg>}` or `{"alg":<alg>}`, no whitespace
fn header_json(alg: &str, key_id: Option<&str>) -> JwtResult<Vec<u8>> {
    let mut json = Vec::with_capacity(19 + alg.len() + key_id.map_or(0, str::len));
    match key_id {
        Some(kid) => {
            json.extend_from_slice(br#"{"kid":"#);
            serde_json::to_writer(&mut json, kid)?;
            json.extend_from_slice(br#","alg":"#);
        }
        None => json.extend_from_slice(br#"{"alg":"#),
    }
    serde_json::to_writer(&mut json, alg)?;
    json.push(b'}');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ALGORITHMS;

    #[test]
    fn fixed_table_matches_json_path() {
        for descriptor in &ALGORITHMS {
            let json = header_json(descriptor.name, None).unwrap();
            let slow = HeaderSegment::Json(json).to_vec().unwrap();
            let fast = fixed_header(descriptor.name).unwrap();
            assert_eq!(fast.as_bytes(), slow.as_slice(), "{}", descriptor.name);
        }
    }

    #[test]
    fn key_id_disables_fast_path() {
        let header = HeaderSegment::new(HS256, Some("k1")).unwrap();
        assert_eq!(
            header,
            HeaderSegment::Json(br#"{"kid":"k1","alg":"HS256"}"#.to_vec())
        );
        assert_eq!(
            HeaderSegment::new(HS256, Some("")).unwrap(),
            HeaderSegment::Fixed("eyJhbGciOiJIUzI1NiJ9")
        );
    }

    #[test]
    fn short_destination_is_an_error() {
        let mut dst = [0u8; 3];
        for header in [
            HeaderSegment::new(HS256, None).unwrap(),
            HeaderSegment::new(HS256, Some("k1")).unwrap(),
        ] {
            assert!(matches!(
                header.write_into(&mut dst),
                Err(crate::JwtError::Encoding(_))
            ));
        }
    }

    #[test]
    fn unknown_algorithm_is_quoted() {
        let header = HeaderSegment::new("none", None).unwrap();
        assert_eq!(header, HeaderSegment::Json(br#"{"alg":"none"}"#.to_vec()));
    }

    #[test]
    fn key_id_is_escaped() {
        let header = HeaderSegment::new(ES256, Some("a\"b\\c\n")).unwrap();
        assert_eq!(
            header,
            HeaderSegment::Json(br#"{"kid":"a\"b\\c\n","alg":"ES256"}"#.to_vec())
        );
    }
}
