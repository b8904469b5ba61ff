// Integration tests for CLI commands
// Run with: cargo test --test cli_commands_test

use std::process::{Command, Output};
use tempfile::TempDir;

const KNOWN_PUBLIC_KEY: &str =
    "BC7r1EiGxME5Pu7ghP8bOMXtwM8WlIlzYcr_9grg6de2ij-v7ZilE3LWkMWGrhARsT-M7KdCwsIplV5vvwELeNo";

/// Run the binary with an isolated config directory.
fn vapidkit(config_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vapidkit"))
        .args(args)
        .env("VAPIDKIT_CONFIG_DIR", config_dir.path())
        .env_remove("VAPIDKIT_EMAIL_ADDRESS")
        .env_remove("VAPIDKIT_STORAGE_FILE")
        .env_remove("VAPIDKIT_BASE_URL")
        .env_remove("VAPIDKIT_SERVER_COMMAND")
        .output()
        .expect("Failed to execute vapidkit")
}

/// Test the generate command
#[test]
fn test_generate_command() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(&temp_dir, &["generate"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Public Key:"));
    assert!(stdout.contains("Private Key:"));
    assert!(stdout.contains("--web-push-public-key="));
    assert!(stdout.contains("--web-push-private-key="));
    assert!(stdout.contains("--web-push-email-address=sysadmin@example.com"));
    assert!(stdout.contains("Public key length: 87 (should be 87)"));
    assert!(stdout.contains("Private key length: 43 (should be 43)"));
}

/// Test generate flags override the launch command parameters
#[test]
fn test_generate_command_with_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(
        &temp_dir,
        &[
            "generate",
            "--email",
            "push@example.org",
            "--base-url",
            "https://push.example.org",
        ],
    );

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--web-push-email-address=push@example.org"));
    assert!(stdout.contains("--base-url=https://push.example.org"));
}

/// Test generate --json output feeds back into validate
#[test]
fn test_generate_json_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(&temp_dir, &["generate", "--json"]);
    assert!(output.status.success(), "Command should succeed");

    let keys: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let public_key = keys["public_key"].as_str().expect("public_key");
    let private_key = keys["private_key"].as_str().expect("private_key");
    assert_eq!(public_key.len(), 87);
    assert_eq!(private_key.len(), 43);

    let output = vapidkit(&temp_dir, &["validate", public_key, private_key]);
    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Public key decoded length: 65"));
    assert!(stdout.contains("Private key decoded length: 32"));
    assert!(stdout.contains("Keys form a matching pair: yes"));
}

/// Test validate reports problems without failing
#[test]
fn test_validate_command_reports_bad_keys() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(&temp_dir, &["validate", KNOWN_PUBLIC_KEY, "not valid!!"]);

    assert!(output.status.success(), "Report is the result, not the exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Public key valid base64 structure: true"));
    assert!(stdout.contains("Private key valid base64 structure: false"));
    assert!(stdout.contains("Private key length matches VAPID expectation (43): false"));
    assert!(stdout.contains("Recommendations:"));
}

/// Test decode on the known public key
#[test]
fn test_decode_command() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(&temp_dir, &["decode", KNOWN_PUBLIC_KEY]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Decoded length: 65 bytes (uncompressed P-256 public key)"));
}

/// Test decode fails on invalid text
#[test]
fn test_decode_command_rejects_invalid_text() {
    let temp_dir = TempDir::new().unwrap();
    let output = vapidkit(&temp_dir, &["decode", "not valid!!"]);
    assert!(!output.status.success(), "Command should fail");
}

/// Test config reads the config file and saves it back
#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.json"),
        r#"{"email_address": "admin@example.net"}"#,
    )
    .unwrap();

    let output = vapidkit(&temp_dir, &["config", "--save"]);
    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("admin@example.net"));
    assert!(stdout.contains("http://localhost:3003"));

    let saved = std::fs::read_to_string(temp_dir.path().join("config.json")).unwrap();
    assert!(saved.contains("\"base_url\""));
}
