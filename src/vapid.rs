//! VAPID key pairs for Web Push (RFC 8292).
//!
//! [`VapidKeys`] is the encoded pair handed to a push server's configuration
//! and to browsers (`applicationServerKey`). It is a plain value: callers
//! that need a "current key" own one and pass it by reference.
//!
//! [`ValidationReport`] inspects arbitrary key text without failing, for
//! diagnosing keys copied from elsewhere.

// Rust guideline compliant 2026-02

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::base64url;
use crate::constants::{
    PRIVATE_KEY_TEXT_LEN, PUBLIC_KEY_TEXT_LEN, RAW_PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN,
};
use crate::error::{Result, VapidError};
use crate::keygen;

/// VAPID keypair for web push authentication.
///
/// The private key is the raw 32-byte P-256 scalar (base64url, 43 chars).
/// The public key is the uncompressed SEC1 point (base64url, 87 chars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VapidKeys {
    /// Uncompressed public key bytes (base64url, 65 bytes decoded).
    public_key: String,
    /// Raw 32-byte P-256 private key scalar (base64url).
    private_key: String,
}

impl VapidKeys {
    /// Generate a fresh VAPID keypair.
    pub fn generate() -> Result<Self> {
        let containers = keygen::generate()?;
        Self::from_containers(&containers.public_spki, &containers.private_pkcs8)
    }

    /// Build from SPKI / PKCS8 DER containers.
    pub fn from_containers(public_spki: &[u8], private_pkcs8: &[u8]) -> Result<Self> {
        let public_raw = keygen::extract_raw_public_key(public_spki)?;
        let private_raw = keygen::extract_raw_private_key(private_pkcs8)?;

        let keys = Self {
            public_key: base64url::encode(&public_raw),
            private_key: base64url::encode(private_raw.as_bytes()),
        };
        keys.check_text_form()?;
        Ok(keys)
    }

    /// Reconstruct from existing base64url key text.
    ///
    /// Validates the public point format, the private scalar width, and that
    /// the private key actually produces the public key.
    pub fn from_base64url(public_key: &str, private_key: &str) -> Result<Self> {
        let public_raw = base64url::decode(public_key)?;
        let private_raw = Zeroizing::new(base64url::decode(private_key)?);
        keygen::verify_key_pair(&public_raw, &private_raw)?;

        // Re-encode so padded or otherwise non-canonical input is normalized
        let keys = Self {
            public_key: base64url::encode(&public_raw),
            private_key: base64url::encode(&private_raw),
        };
        keys.check_text_form()?;
        Ok(keys)
    }

    /// Rewrite a private key stored as a whole PKCS8 container to the raw scalar.
    ///
    /// Some tools hand out the base64url of the full PKCS8 DER (~184 chars)
    /// instead of the 43-char scalar push servers expect. If the key is
    /// already a 32-byte scalar, this is a no-op.
    pub fn migrate_if_needed(self) -> Result<Self> {
        let private_bytes = Zeroizing::new(base64url::decode(&self.private_key)?);
        if private_bytes.len() == RAW_PRIVATE_KEY_LEN {
            return Ok(self);
        }

        let scalar = keygen::extract_raw_private_key(&private_bytes)?;
        let public_raw = base64url::decode(&self.public_key)?;
        keygen::verify_key_pair(&public_raw, scalar.as_bytes())?;

        log::info!(
            "Migrated VAPID private key from PKCS8 container ({} bytes) to raw scalar",
            private_bytes.len()
        );

        Ok(Self {
            public_key: self.public_key,
            private_key: base64url::encode(scalar.as_bytes()),
        })
    }

    /// Base64url-encoded uncompressed public key (65 bytes decoded).
    ///
    /// This is what browsers pass as `applicationServerKey`.
    pub fn public_key_base64url(&self) -> &str {
        &self.public_key
    }

    /// Base64url-encoded raw 32-byte private key scalar.
    pub fn private_key_base64url(&self) -> &str {
        &self.private_key
    }

    /// Uncompressed public key bytes (65 bytes).
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        base64url::decode(&self.public_key)
    }

    fn check_text_form(&self) -> Result<()> {
        for (name, text, expected) in [
            ("public", &self.public_key, PUBLIC_KEY_TEXT_LEN),
            ("private", &self.private_key, PRIVATE_KEY_TEXT_LEN),
        ] {
            if !base64url::validate(text) {
                return Err(VapidError::malformed(format!(
                    "encoded {name} key contains characters outside [A-Za-z0-9_-]"
                )));
            }
            if text.len() != expected {
                return Err(VapidError::malformed(format!(
                    "encoded {name} key is {} chars, expected {expected}",
                    text.len()
                )));
            }
        }
        Ok(())
    }
}

/// Structural findings for one key text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    /// Length of the text in characters.
    pub text_len: usize,
    /// Decoded byte length, or `None` if the text does not decode.
    pub decoded_len: Option<usize>,
    /// Every character is in `[A-Za-z0-9_-]`.
    pub valid_structure: bool,
    /// Text length equals the VAPID expectation (87 public / 43 private).
    pub length_matches: bool,
}

impl KeyReport {
    fn inspect(text: &str, decoded: Option<&[u8]>, expected_len: usize) -> Self {
        Self {
            text_len: text.len(),
            decoded_len: decoded.map(<[u8]>::len),
            valid_structure: base64url::validate(text),
            length_matches: text.len() == expected_len,
        }
    }

    /// Whether this key passed every structural check.
    pub fn is_ok(&self) -> bool {
        self.valid_structure && self.length_matches && self.decoded_len.is_some()
    }
}

/// Non-fatal validation of an encoded key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Public key findings.
    pub public_key: KeyReport,
    /// Private key findings.
    pub private_key: KeyReport,
    /// Whether the private key produces the public key. `None` when either
    /// key does not decode to raw key material of the right width.
    pub keys_match: Option<bool>,
    /// Human-readable diagnostics for every failed check.
    pub diagnostics: Vec<String>,
}

impl ValidationReport {
    /// Inspect a key pair. Never fails; problems end up in `diagnostics`.
    pub fn inspect(public_key: &str, private_key: &str) -> Self {
        let public_raw = base64url::decode(public_key).ok();
        let private_raw = base64url::decode(private_key).ok().map(Zeroizing::new);

        let public_report =
            KeyReport::inspect(public_key, public_raw.as_deref(), PUBLIC_KEY_TEXT_LEN);
        let private_report = KeyReport::inspect(
            private_key,
            private_raw.as_deref().map(Vec::as_slice),
            PRIVATE_KEY_TEXT_LEN,
        );
        let mut diagnostics = Vec::new();

        for (name, report, expected) in [
            ("Public", &public_report, PUBLIC_KEY_TEXT_LEN),
            ("Private", &private_report, PRIVATE_KEY_TEXT_LEN),
        ] {
            if !report.valid_structure {
                diagnostics.push(format!(
                    "{name} key contains characters outside the base64url alphabet"
                ));
            }
            if report.decoded_len.is_none() {
                diagnostics.push(format!("{name} key does not decode as base64url"));
            }
            if !report.length_matches {
                log::warn!(
                    "{name} key length {} does not match expected {expected}",
                    report.text_len
                );
                diagnostics.push(format!(
                    "{name} key is {} characters, expected {expected}",
                    report.text_len
                ));
            }
        }

        // Only raw key material of the right width can be checked as a pair
        let keys_match = match (public_raw.as_deref(), private_raw.as_deref()) {
            (Some(public), Some(private))
                if public.len() == RAW_PUBLIC_KEY_LEN && private.len() == RAW_PRIVATE_KEY_LEN =>
            {
                match keygen::verify_key_pair(public, private) {
                    Ok(()) => Some(true),
                    Err(e) => {
                        diagnostics.push(e.to_string());
                        Some(false)
                    }
                }
            }
            _ => None,
        };

        Self {
            public_key: public_report,
            private_key: private_report,
            keys_match,
            diagnostics,
        }
    }

    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.public_key.is_ok() && self.private_key.is_ok() && self.keys_match == Some(true)
    }
}
