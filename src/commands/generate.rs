//! Key pair generation command.
//!
//! # Examples
//!
//! ```bash
//! # Human-readable keys, launch command, and validation block
//! vapidkit generate
//!
//! # Machine-readable keys only
//! vapidkit generate --json
//! ```

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use serde_json::json;

use crate::base64url;
use crate::constants::{PRIVATE_KEY_TEXT_LEN, PUBLIC_KEY_TEXT_LEN};
use crate::{LaunchConfig, VapidKeys};

/// Generates a key pair and prints it.
///
/// With `json`, prints `{"public_key": …, "private_key": …}` and nothing else.
pub fn run(config: &LaunchConfig, json: bool) -> Result<()> {
    let keys = VapidKeys::generate().context("Failed to generate VAPID keys")?;
    log::info!("Generated VAPID key pair");

    if json {
        println!("{}", render_json(&keys)?);
    } else {
        println!("{}", render(&keys, config));
    }

    Ok(())
}

/// JSON form of a key pair.
pub fn render_json(keys: &VapidKeys) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json!({
        "public_key": keys.public_key_base64url(),
        "private_key": keys.private_key_base64url(),
    }))?)
}

/// Human-readable report: keys, launch command, and validation block.
pub fn render(keys: &VapidKeys, config: &LaunchConfig) -> String {
    let public_key = keys.public_key_base64url();
    let private_key = keys.private_key_base64url();

    let mut out = Vec::new();
    out.push("Generated VAPID Keys:".to_string());
    out.push("=====================".to_string());
    out.push("Public Key:".to_string());
    out.push(public_key.to_string());
    out.push(String::new());
    out.push("Private Key:".to_string());
    out.push(private_key.to_string());
    out.push(String::new());
    out.push("Server Command:".to_string());
    out.push("===============".to_string());
    out.push(config.launch_command(keys));
    out.push(String::new());
    out.push("Key Validation:".to_string());
    out.push("===============".to_string());
    out.push(format!(
        "Public key length: {} (should be {PUBLIC_KEY_TEXT_LEN})",
        public_key.len()
    ));
    out.push(format!(
        "Private key length: {} (should be {PRIVATE_KEY_TEXT_LEN})",
        private_key.len()
    ));
    out.push(format!(
        "Public key valid base64: {}",
        base64url::validate(public_key)
    ));
    out.push(format!(
        "Private key valid base64: {}",
        base64url::validate(private_key)
    ));
    out.join("\n")
}
