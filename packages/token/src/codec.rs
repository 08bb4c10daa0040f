//! Base64url primitives (RFC 4648 §5, no padding)
//!
//! Segment encoding goes through the `base64` engine. [`expand_in_place`] adds the
//! one operation the engine cannot express: encoding raw bytes that live further
//! along the same buffer the encoded text is written into.

use crate::error::JwtResult;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Number of base64url characters for `n` raw bytes, without padding.
#[inline]
#[must_use]
pub const fn encoded_len(n: usize) -> usize {
    n / 3 * 4 + (n % 3 * 4 + 2) / 3
}

/// Encode `src` into `dst`, which must be exactly `encoded_len(src.len())` long.
///
/// # Errors
/// Returns [`crate::JwtError::Encoding`] when `dst` is too short.
#[inline]
pub fn encode(dst: &mut [u8], src: &[u8]) -> JwtResult<usize> {
    Ok(URL_SAFE_NO_PAD.encode_slice(src, dst)?)
}

/// Encode the `n` raw bytes at `buf[src..src + n]` to `buf[dst..]`.
///
/// Input is consumed left to right in 3-byte groups and each group is staged on the
/// stack before its 4 output characters are written, so the write cursor may catch up
/// with the read cursor but never passes it while `dst + groups(n) <= src`. Staging
/// the raw bytes at the very end of a span of `encoded_len(n)` bytes meets that bound
/// exactly, since `encoded_len(n) - n == ceil(n / 3)`.
///
/// # Errors
/// Returns [`crate::JwtError::Encoding`] when the output would run past `buf`.
pub fn expand_in_place(buf: &mut [u8], dst: usize, src: usize, n: usize) -> JwtResult<usize> {
    debug_assert!(dst + n.div_ceil(3) <= src, "write cursor would overtake input");

    let end = src + n;
    let mut group = [0u8; 3];
    let mut read = src;
    let mut write = dst;
    while read < end {
        let take = (end - read).min(3);
        group[..take].copy_from_slice(&buf[read..read + take]);
        read += take;

        let out = encoded_len(take);
        let written = encode(buf.get_mut(write..write + out).unwrap_or_default(), &group[..take])?;
        debug_assert!(write + written <= read);
        write += written;
    }
    Ok(write - dst)
}
