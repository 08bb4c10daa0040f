//! Token buffer planning and assembly
//!
//! A token is built in one `Vec<u8>` whose capacity is fixed before the first
//! write: `header "." payload` occupies the logical length and the capacity behind
//! it holds `"." signature`. Engines stage raw signature bytes at the far end of
//! that reserve and expand them forward into base64url.

use crate::codec;
use crate::error::JwtResult;
use crate::header::HeaderSegment;

/// Token under construction, unsigned prefix written and signature space reserved
#[derive(Debug)]
pub struct TokenBuffer {
    bytes: Vec<u8>,
    enc_sig_len: usize,
}

impl TokenBuffer {
    /// Plan and write the unsigned prefix for a signature of `enc_sig_len` encoded bytes.
    ///
    /// # Errors
    /// Returns a serialization error for the header JSON or an encoding error if the
    /// computed lengths are inconsistent.
    pub fn new(
        alg: &str,
        key_id: Option<&str>,
        payload: &[u8],
        enc_sig_len: usize,
    ) -> JwtResult<Self> {
        let header = HeaderSegment::new(alg, key_id)?;
        let header_len = header.encoded_len();
        let prefix_len = header_len + 1 + codec::encoded_len(payload.len());
        let capacity = prefix_len + 1 + enc_sig_len;
        tracing::trace!(alg, prefix_len, capacity, "planned token buffer");

        let mut bytes = Vec::with_capacity(capacity);
        bytes.resize(prefix_len, 0);
        header.write_into(&mut bytes[..header_len])?;
        bytes[header_len] = b'.';
        codec::encode(&mut bytes[header_len + 1..], payload)?;

        Ok(Self { bytes, enc_sig_len })
    }

    /// Bytes fed to the signature primitive: `header "." payload`
    #[inline]
    #[must_use]
    pub fn unsigned_prefix(&self) -> &[u8] {
        &self.bytes
    }

    /// Total reserved capacity; the final token length when signed
    #[inline]
    #[must_use]
    pub fn planned_len(&self) -> usize {
        self.bytes.len() + 1 + self.enc_sig_len
    }

    /// The unsigned prefix alone, with room kept for an externally appended signature
    #[must_use]
    pub fn into_unsigned(self) -> Vec<u8> {
        self.bytes
    }

    /// Append `"." base64url(raw)` where `stage` writes the `raw_len` raw signature bytes.
    ///
    /// `stage` receives the last `raw_len` bytes of the reserved space. Nothing outside
    /// the initial allocation is touched.
    ///
    /// # Errors
    /// Propagates the staging error unchanged; fails with an encoding error if the
    /// reservation does not match `raw_len`.
    pub fn finish<F>(mut self, raw_len: usize, stage: F) -> JwtResult<Vec<u8>>
    where
        F: FnOnce(&mut [u8]) -> JwtResult<()>,
    {
        debug_assert_eq!(codec::encoded_len(raw_len), self.enc_sig_len);
        let total = self.planned_len();
        let sig_start = self.bytes.len() + 1;
        self.bytes.push(b'.');
        self.bytes.resize(total, 0);

        let raw_start = total.saturating_sub(raw_len).max(sig_start);
        stage(&mut self.bytes[raw_start..])?;
        codec::expand_in_place(&mut self.bytes, sig_start, raw_start, total - raw_start)?;
        Ok(self.bytes)
    }

    /// Append `"." base64url(raw)` for a signature already in hand.
    ///
    /// # Errors
    /// See [`TokenBuffer::finish`].
    pub fn finish_with(self, raw: &[u8]) -> JwtResult<Vec<u8>> {
        self.finish(raw.len(), |tail| {
            tail.copy_from_slice(raw);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{HS256, RS256};

    #[test]
    fn prefix_layout() {
        let buffer = TokenBuffer::new(HS256, None, br#"{"sub":"x"}"#, 43).unwrap();
        assert_eq!(
            buffer.unsigned_prefix(),
            b"eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ4In0"
        );
        assert_eq!(buffer.planned_len(), buffer.unsigned_prefix().len() + 44);
    }

    #[test]
    fn capacity_is_planned_up_front() {
        let buffer = TokenBuffer::new(RS256, Some("key-7"), b"{}", codec::encoded_len(256)).unwrap();
        let planned = buffer.planned_len();
        let token = buffer.finish_with(&[0xa5; 256]).unwrap();
        assert_eq!(token.len(), planned);
        assert_eq!(token.capacity(), planned);
    }

    #[test]
    fn finish_encodes_staged_signature() {
        let buffer = TokenBuffer::new(HS256, None, b"{}", codec::encoded_len(4)).unwrap();
        let token = buffer.finish_with(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert_eq!(token, b"eyJhbGciOiJIUzI1NiJ9.e30.3q2-7w");
    }

    #[test]
    fn unsigned_keeps_delimiter_room() {
        let buffer = TokenBuffer::new("none", None, b"{}", 0).unwrap();
        let prefix = buffer.into_unsigned();
        assert_eq!(prefix, b"eyJhbGciOiJub25lIn0.e30");
        assert!(prefix.capacity() > prefix.len());
    }

    #[test]
    fn staging_error_yields_no_token() {
        let buffer = TokenBuffer::new(HS256, None, b"{}", 43).unwrap();
        let result = buffer.finish(32, |_| Err(crate::JwtError::SecretRequired));
        assert!(matches!(result, Err(crate::JwtError::SecretRequired)));
    }
}
