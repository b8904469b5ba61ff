//! CLI subcommand implementations for vapidkit.
//!
//! Commands are organized into submodules by what they report:
//!
//! - [`generate`] - Fresh key pair plus server launch command
//! - [`validate`] - Structural report for an existing key pair
//! - [`decode`] - Raw bytes behind a single key text
//!
//! # Usage
//!
//! ```ignore
//! use vapidkit::{commands, LaunchConfig};
//!
//! commands::generate::run(&LaunchConfig::load()?, false)?;
//! commands::validate::run(&public_key, &private_key)?;
//! ```

// Rust guideline compliant 2026-02

pub mod decode;
pub mod generate;
pub mod validate;

#[doc(inline)]
pub use decode::run as decode_key;
#[doc(inline)]
pub use generate::run as generate_keys;
#[doc(inline)]
pub use validate::run as validate_keys;
