//! Key sizes, encodings, and container layout constants for VAPID keys.
//!
//! # Categories
//!
//! - **Raw key material**: fixed widths of P-256 points and scalars
//! - **Text form**: lengths of the base64url encodings
//! - **Containers**: DER layout of SPKI and PKCS8 for P-256

// Rust guideline compliant 2026-02

use p256::pkcs8::der::asn1::ObjectIdentifier;

// ============================================================================
// Raw key material
// ============================================================================

/// Uncompressed SEC1 point: `0x04 || X(32) || Y(32)`.
pub const RAW_PUBLIC_KEY_LEN: usize = 65;

/// Big-endian P-256 private scalar.
pub const RAW_PRIVATE_KEY_LEN: usize = 32;

/// Leading byte of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_MARKER: u8 = 0x04;

// ============================================================================
// Text form
// ============================================================================

/// Unpadded base64url length of a raw public key (65 bytes).
pub const PUBLIC_KEY_TEXT_LEN: usize = 87;

/// Unpadded base64url length of a raw private key (32 bytes).
pub const PRIVATE_KEY_TEXT_LEN: usize = 43;

// ============================================================================
// Containers
// ============================================================================

/// `id-ecPublicKey` (RFC 5480), the algorithm of every EC key container.
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// `prime256v1` / `secp256r1` named curve.
pub const SECP_256_R_1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// Offset of the uncompressed point inside a P-256 SPKI container.
///
/// Outer SEQUENCE header (2) + algorithm identifier (21) + BIT STRING
/// header (2) + unused-bits octet (1).
pub const SPKI_POINT_OFFSET: usize = 26;

/// Offset of the private scalar inside a P-256 PKCS8 container that
/// embeds the public key (the shape OpenSSL and `p256` both produce).
///
/// Outer SEQUENCE header (3) + version (3) + algorithm identifier (21) +
/// OCTET STRING header (2) + ECPrivateKey SEQUENCE header (2) + version (3) +
/// OCTET STRING header (2).
pub const PKCS8_SCALAR_OFFSET: usize = 36;
