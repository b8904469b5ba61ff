//! Unpadded URL-safe base64 as used by Web Push (RFC 8292 keys, RFC 7515 §2).
//!
//! Encoding is the standard alphabet with `+`→`-`, `/`→`_` and all `=`
//! padding stripped. Decoding reverses that: padding is reinstated, the
//! alphabet is mapped back, and the result must be valid standard base64.

// Rust guideline compliant 2026-02

use base64::{
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD as BASE64URL},
    Engine,
};

use crate::error::{Result, VapidError};

/// Encode bytes as unpadded base64url.
pub fn encode(data: &[u8]) -> String {
    BASE64URL.encode(data)
}

/// Decode unpadded base64url text.
///
/// Fails with [`VapidError::InvalidEncoding`] if the restored text is not
/// valid standard base64 (bad length or characters outside the alphabet).
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let padding = (4 - text.len() % 4) % 4;
    let mut restored: String = text
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    restored.extend(std::iter::repeat_n('=', padding));

    BASE64
        .decode(restored.as_bytes())
        .map_err(|e| VapidError::InvalidEncoding(e.to_string()))
}

/// Returns `true` iff every character of `text` is in `[A-Za-z0-9_-]`.
///
/// Purely structural; does not attempt to decode and says nothing about length.
pub fn validate(text: &str) -> bool {
    text.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Length of the unpadded encoding of `len` bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len * 4).div_ceil(3)
}
