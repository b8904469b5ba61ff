//! vapidkit - VAPID key provisioning for Web Push servers.
//!
//! Generates P-256 key pairs, strips the SPKI / PKCS8 container framing to
//! recover raw key material, and transcodes it to the unpadded base64url
//! text that push servers and browsers expect.
//!
//! # Architecture
//!
//! ```text
//! keygen::generate()             SPKI DER, PKCS8 DER
//!     ↓
//! keygen::extract_raw_*()        65-byte point, 32-byte scalar
//!     ↓
//! base64url::encode()            87 chars, 43 chars
//!     ↓
//! validate + length checks  →    VapidKeys
//! ```
//!
//! # Modules
//!
//! - [`keygen`] - Key pair generation and raw key extraction
//! - [`base64url`] - Unpadded URL-safe base64 codec and validation
//! - [`vapid`] - Encoded key pair and validation reports
//! - [`config`] - Launch command configuration
//! - [`commands`] - CLI subcommands

// Rust guideline compliant 2026-02

pub mod base64url;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod keygen;
pub mod vapid;

// Re-export commonly used types
pub use config::LaunchConfig;
pub use error::{Result, VapidError};
pub use vapid::{KeyReport, ValidationReport, VapidKeys};
