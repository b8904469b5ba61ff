//! Error types for key generation, extraction, and encoding.
//!
//! Every failure here is a deterministic function of the input (or of the
//! entropy source being unavailable), so nothing is retried internally.

// Rust guideline compliant 2026-02

use thiserror::Error;

/// Errors produced by the key pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VapidError {
    /// The entropy source or container encoder could not produce a P-256 key pair.
    #[error("Failed to generate P-256 key pair: {0}")]
    KeyGeneration(String),
    /// Container bytes or raw key bytes do not have the expected P-256 shape.
    #[error("Malformed key: {0}")]
    MalformedKey(String),
    /// Text is not valid base64url after padding and alphabet restoration.
    #[error("Invalid base64url encoding: {0}")]
    InvalidEncoding(String),
    /// The private scalar does not produce the given public point.
    #[error("Private key does not correspond to public key")]
    KeyMismatch,
}

/// Result alias for the key pipeline.
pub type Result<T> = std::result::Result<T, VapidError>;

impl VapidError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedKey(msg.into())
    }
}
