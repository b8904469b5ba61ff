//! Key pair validation command.
//!
//! Reports on an existing key pair without failing on bad input: the report
//! itself is the result. Exit status is left to the caller.
//!
//! # Examples
//!
//! ```bash
//! vapidkit validate "$PUBLIC_KEY" "$PRIVATE_KEY"
//! ```

// Rust guideline compliant 2026-02

use anyhow::Result;

use crate::constants::{PRIVATE_KEY_TEXT_LEN, PUBLIC_KEY_TEXT_LEN};
use crate::{KeyReport, ValidationReport};

/// Inspects a key pair and prints the report.
pub fn run(public_key: &str, private_key: &str) -> Result<()> {
    let report = ValidationReport::inspect(public_key, private_key);
    log::info!(
        "Validated VAPID key pair: {}",
        if report.is_valid() { "ok" } else { "problems found" }
    );
    println!("{}", render(&report));
    Ok(())
}

/// Human-readable form of a validation report.
pub fn render(report: &ValidationReport) -> String {
    let mut out = vec!["Testing VAPID keys...".to_string()];

    for (name, key) in [("Public", &report.public_key), ("Private", &report.private_key)] {
        out.push(format!("{name} key length: {}", key.text_len));
    }
    for (name, key) in [("Public", &report.public_key), ("Private", &report.private_key)] {
        out.push(decoded_line(name, key));
    }
    for (name, key) in [("Public", &report.public_key), ("Private", &report.private_key)] {
        out.push(format!(
            "{name} key valid base64 structure: {}",
            key.valid_structure
        ));
    }
    for (name, key, expected) in [
        ("Public", &report.public_key, PUBLIC_KEY_TEXT_LEN),
        ("Private", &report.private_key, PRIVATE_KEY_TEXT_LEN),
    ] {
        out.push(format!(
            "{name} key length matches VAPID expectation ({expected}): {}",
            key.length_matches
        ));
    }
    out.push(format!(
        "Keys form a matching pair: {}",
        match report.keys_match {
            Some(true) => "yes",
            Some(false) => "no",
            None => "unknown",
        }
    ));

    if report.is_valid() {
        out.push("Key pair looks correct for VAPID".to_string());
    } else {
        out.push(String::new());
        out.push("Problems:".to_string());
        out.extend(report.diagnostics.iter().map(|d| format!("  - {d}")));
        out.push(String::new());
        out.push("Recommendations:".to_string());
        out.push("1. Make sure both keys are generated together".to_string());
        out.push("2. Restart the push server with the correct keys".to_string());
        out.push("3. Generate new VAPID keys if needed".to_string());
    }

    out.join("\n")
}

fn decoded_line(name: &str, key: &KeyReport) -> String {
    match key.decoded_len {
        Some(len) => format!("{name} key decoded length: {len}"),
        None => format!("{name} key decoded length: not valid base64url"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VapidKeys;

    const KNOWN_PUBLIC_KEY: &str =
        "BC7r1EiGxME5Pu7ghP8bOMXtwM8WlIlzYcr_9grg6de2ij-v7ZilE3LWkMWGrhARsT-M7KdCwsIplV5vvwELeNo";

    #[test]
    fn test_render_valid_pair() {
        let keys = VapidKeys::generate().expect("should generate keys");
        let report =
            ValidationReport::inspect(keys.public_key_base64url(), keys.private_key_base64url());
        let text = render(&report);

        assert!(text.contains("Public key decoded length: 65"));
        assert!(text.contains("Private key decoded length: 32"));
        assert!(text.contains("Public key valid base64 structure: true"));
        assert!(text.contains("Private key length matches VAPID expectation (43): true"));
        assert!(text.contains("Keys form a matching pair: yes"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn test_render_known_public_key_with_bad_private_key() {
        let report = ValidationReport::inspect(KNOWN_PUBLIC_KEY, "short!");
        let text = render(&report);

        assert!(text.contains("Public key length: 87"));
        assert!(text.contains("Public key decoded length: 65"));
        assert!(text.contains("Private key decoded length: not valid base64url"));
        assert!(text.contains("Private key valid base64 structure: false"));
        assert!(text.contains("Keys form a matching pair: unknown"));
        assert!(text.contains("Recommendations:"));
    }
}
