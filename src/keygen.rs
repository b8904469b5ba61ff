//! P-256 key pair generation and raw key extraction.
//!
//! Keys are generated in their standard containers (SubjectPublicKeyInfo and
//! PKCS8 PrivateKeyInfo, both DER) and the raw key material is recovered by
//! decoding the container structure:
//!
//! ```text
//! SPKI   SEQUENCE { AlgorithmIdentifier, BIT STRING { 00 | 04 X Y } }
//! PKCS8  SEQUENCE { INTEGER version, AlgorithmIdentifier,
//!                   OCTET STRING { ECPrivateKey SEQUENCE {
//!                       INTEGER 1, OCTET STRING d, [0] params?, [1] pub? } } }
//! ```
//!
//! The algorithm must be `id-ecPublicKey` with `prime256v1` parameters, so a
//! container for another curve or algorithm is rejected rather than sliced
//! at the wrong place.

// Rust guideline compliant 2026-02

use p256::elliptic_curve::rand_core::{OsRng, RngCore};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::der::asn1::{BitStringRef, ObjectIdentifier, OctetStringRef};
use p256::pkcs8::der::{self, Decode, Reader, SliceReader, TagMode, TagNumber};
use p256::pkcs8::spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, PrivateKeyInfo};
use p256::{PublicKey, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{
    ID_EC_PUBLIC_KEY, PKCS8_SCALAR_OFFSET, RAW_PRIVATE_KEY_LEN, RAW_PUBLIC_KEY_LEN,
    SECP_256_R_1, SPKI_POINT_OFFSET, UNCOMPRESSED_POINT_MARKER,
};
use crate::error::{Result, VapidError};

/// Upper bound on rejection sampling for an in-range scalar.
///
/// A uniformly random 32-byte string is out of range with probability ~2^-32.
const MAX_SCALAR_ATTEMPTS: usize = 8;

/// `ECPrivateKey` version (RFC 5915).
const EC_PRIVATE_KEY_VERSION: u8 = 1;

/// `[0] parameters` inside `ECPrivateKey`.
const EC_PARAMETERS_TAG: TagNumber = TagNumber::N0;

/// `[1] publicKey` inside `ECPrivateKey`.
const EC_PUBLIC_KEY_TAG: TagNumber = TagNumber::N1;

/// Freshly generated key pair in its container encodings.
pub struct KeyContainers {
    /// SubjectPublicKeyInfo, DER.
    pub public_spki: Vec<u8>,
    /// PKCS8 PrivateKeyInfo, DER. Zeroized on drop.
    pub private_pkcs8: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for KeyContainers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyContainers")
            .field("public_spki", &self.public_spki)
            .field(
                "private_pkcs8",
                &format_args!("[REDACTED; {} bytes]", self.private_pkcs8.len()),
            )
            .finish()
    }
}

/// Raw 32-byte P-256 private scalar, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RawPrivateKey([u8; RAW_PRIVATE_KEY_LEN]);

impl RawPrivateKey {
    /// Scalar bytes, big-endian.
    pub fn as_bytes(&self) -> &[u8; RAW_PRIVATE_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for RawPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RawPrivateKey([REDACTED])")
    }
}

/// Generate a fresh P-256 key pair as SPKI / PKCS8 DER containers.
pub fn generate() -> Result<KeyContainers> {
    let secret = random_secret_key()?;

    let private_pkcs8 = secret
        .to_pkcs8_der()
        .map_err(|e| VapidError::KeyGeneration(format!("PKCS8 encoding failed: {e}")))?;
    let public_spki = secret
        .public_key()
        .to_public_key_der()
        .map_err(|e| VapidError::KeyGeneration(format!("SPKI encoding failed: {e}")))?;

    log::debug!(
        "Generated P-256 key pair (SPKI {} bytes, PKCS8 {} bytes)",
        public_spki.as_bytes().len(),
        private_pkcs8.as_bytes().len()
    );

    Ok(KeyContainers {
        public_spki: public_spki.as_bytes().to_vec(),
        private_pkcs8: Zeroizing::new(private_pkcs8.as_bytes().to_vec()),
    })
}

fn random_secret_key() -> Result<SecretKey> {
    let mut bytes = Zeroizing::new([0u8; RAW_PRIVATE_KEY_LEN]);
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| VapidError::KeyGeneration(format!("entropy source unavailable: {e}")))?;
        // Zero or >= group order; draw again
        if let Ok(secret) = SecretKey::from_slice(bytes.as_slice()) {
            return Ok(secret);
        }
    }
    Err(VapidError::KeyGeneration(format!(
        "no valid P-256 scalar after {MAX_SCALAR_ATTEMPTS} attempts"
    )))
}

/// Extract the 65-byte uncompressed point from a P-256 SPKI container.
pub fn extract_raw_public_key(container: &[u8]) -> Result<[u8; RAW_PUBLIC_KEY_LEN]> {
    let min_len = SPKI_POINT_OFFSET + RAW_PUBLIC_KEY_LEN;
    if container.len() < min_len {
        return Err(VapidError::malformed(format!(
            "SPKI container is {} bytes, expected at least {min_len}",
            container.len()
        )));
    }

    let spki = SubjectPublicKeyInfoRef::from_der(container)
        .map_err(|e| VapidError::malformed(format!("invalid SPKI container: {e}")))?;
    check_algorithm(&spki.algorithm)?;

    let point = spki
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| VapidError::malformed("public key BIT STRING has unused bits"))?;
    uncompressed_point(point)
}

/// Extract the 32-byte private scalar from a P-256 PKCS8 container.
pub fn extract_raw_private_key(container: &[u8]) -> Result<RawPrivateKey> {
    let min_len = PKCS8_SCALAR_OFFSET + RAW_PRIVATE_KEY_LEN;
    if container.len() < min_len {
        return Err(VapidError::malformed(format!(
            "PKCS8 container is {} bytes, expected at least {min_len}",
            container.len()
        )));
    }

    // Accepts v1 and v2 (RFC 5958 OneAsymmetricKey)
    let info = PrivateKeyInfo::from_der(container)
        .map_err(|e| VapidError::malformed(format!("invalid PKCS8 container: {e}")))?;
    check_algorithm(&info.algorithm)?;

    let ec_private_key = EcPrivateKeyFields::from_der(info.private_key)
        .map_err(|e| VapidError::malformed(format!("invalid ECPrivateKey: {e}")))?;

    if ec_private_key.version != EC_PRIVATE_KEY_VERSION {
        return Err(VapidError::malformed(format!(
            "unsupported ECPrivateKey version {}",
            ec_private_key.version
        )));
    }
    if let Some(curve) = ec_private_key.curve {
        if curve != SECP_256_R_1 {
            return Err(VapidError::malformed(format!(
                "ECPrivateKey parameters name curve {curve}, expected prime256v1"
            )));
        }
    }
    if let Some(public_key) = ec_private_key.public_key {
        let point = public_key.as_bytes().ok_or_else(|| {
            VapidError::malformed("embedded public key BIT STRING has unused bits")
        })?;
        uncompressed_point(point)?;
    }

    let scalar: [u8; RAW_PRIVATE_KEY_LEN] =
        ec_private_key.scalar.try_into().map_err(|_: std::array::TryFromSliceError| {
            VapidError::malformed(format!(
                "private scalar is {} bytes, expected {RAW_PRIVATE_KEY_LEN}",
                ec_private_key.scalar.len()
            ))
        })?;

    Ok(RawPrivateKey(scalar))
}

/// SEC1 `ECPrivateKey` (RFC 5915), borrowed from the PKCS8 payload.
struct EcPrivateKeyFields<'a> {
    version: u8,
    scalar: &'a [u8],
    curve: Option<ObjectIdentifier>,
    public_key: Option<BitStringRef<'a>>,
}

impl<'a> EcPrivateKeyFields<'a> {
    /// Decode the whole input as one `ECPrivateKey`; trailing bytes are an error.
    fn from_der(bytes: &'a [u8]) -> der::Result<Self> {
        let mut reader = SliceReader::new(bytes)?;
        let fields = reader.sequence(|fields| {
            Ok(Self {
                version: u8::decode(fields)?,
                scalar: OctetStringRef::decode(fields)?.as_bytes(),
                curve: fields.context_specific(EC_PARAMETERS_TAG, TagMode::Explicit)?,
                public_key: fields.context_specific(EC_PUBLIC_KEY_TAG, TagMode::Explicit)?,
            })
        })?;
        reader.finish(fields)
    }
}

fn check_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<()> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(VapidError::malformed(format!(
            "algorithm {} is not id-ecPublicKey",
            algorithm.oid
        )));
    }
    match algorithm.parameters_oid() {
        Ok(curve) if curve == SECP_256_R_1 => Ok(()),
        Ok(curve) => Err(VapidError::malformed(format!(
            "algorithm identifier names curve {curve}, expected prime256v1"
        ))),
        Err(e) => Err(VapidError::malformed(format!(
            "algorithm identifier has no named curve: {e}"
        ))),
    }
}

fn uncompressed_point(point: &[u8]) -> Result<[u8; RAW_PUBLIC_KEY_LEN]> {
    let point: [u8; RAW_PUBLIC_KEY_LEN] =
        point.try_into().map_err(|_: std::array::TryFromSliceError| {
            VapidError::malformed(format!(
                "public key is {} bytes, expected {RAW_PUBLIC_KEY_LEN}",
                point.len()
            ))
        })?;
    if point[0] != UNCOMPRESSED_POINT_MARKER {
        return Err(VapidError::malformed(format!(
            "point-format marker is 0x{:02x}, expected 0x{UNCOMPRESSED_POINT_MARKER:02x}",
            point[0]
        )));
    }
    Ok(point)
}

/// Check that `public` is a P-256 point and that `private` produces it.
///
/// Fails with [`VapidError::MalformedKey`] if either side is not valid key
/// material, or [`VapidError::KeyMismatch`] if both are valid but unrelated.
pub fn verify_key_pair(public: &[u8], private: &[u8]) -> Result<()> {
    if public.len() != RAW_PUBLIC_KEY_LEN || public[0] != UNCOMPRESSED_POINT_MARKER {
        return Err(VapidError::malformed(format!(
            "public key must be a {RAW_PUBLIC_KEY_LEN}-byte uncompressed point"
        )));
    }
    if private.len() != RAW_PRIVATE_KEY_LEN {
        return Err(VapidError::malformed(format!(
            "private key must be a {RAW_PRIVATE_KEY_LEN}-byte scalar, got {} bytes",
            private.len()
        )));
    }

    PublicKey::from_sec1_bytes(public)
        .map_err(|e| VapidError::malformed(format!("public key is not a P-256 point: {e}")))?;
    let secret = SecretKey::from_slice(private)
        .map_err(|e| VapidError::malformed(format!("private key is not a P-256 scalar: {e}")))?;

    if secret.public_key().to_encoded_point(false).as_bytes() == public {
        Ok(())
    } else {
        Err(VapidError::KeyMismatch)
    }
}
