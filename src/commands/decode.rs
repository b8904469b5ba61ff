//! Single key decoding command.
//!
//! Shows the bytes a browser gets when it converts a key text to a
//! `Uint8Array` for `applicationServerKey`.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};

use crate::base64url;
use crate::constants::{RAW_PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN, UNCOMPRESSED_POINT_MARKER};

/// Decodes one key text and prints its length, kind, and hex bytes.
pub fn run(text: &str) -> Result<()> {
    let bytes = base64url::decode(text).context("Key text is not valid base64url")?;
    println!("{}", render(&bytes));
    Ok(())
}

/// Human-readable description of decoded key bytes.
pub fn render(bytes: &[u8]) -> String {
    let kind = match bytes {
        [UNCOMPRESSED_POINT_MARKER, ..] if bytes.len() == RAW_PUBLIC_KEY_LEN => {
            "uncompressed P-256 public key"
        }
        _ if bytes.len() == RAW_PRIVATE_KEY_LEN => "P-256 private scalar",
        _ => "unrecognized key material",
    };
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("Decoded length: {} bytes ({kind})\n{hex}", bytes.len())
}
