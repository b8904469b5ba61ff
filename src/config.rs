//! Launch command configuration loading and persistence.
//!
//! The generated keys are printed together with a ready-to-run push server
//! command. The auxiliary parameters of that command (contact address,
//! subscription store, base URL) live here.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::vapid::VapidKeys;

/// Configuration file name inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// Parameters of the push server launch command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Command that starts the push server, without key flags.
    pub server_command: String,
    /// Contact address sent to push services in the VAPID `sub` claim.
    pub email_address: String,
    /// Path of the server's web push subscription store.
    pub storage_file: PathBuf,
    /// Public base URL of the server.
    pub base_url: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            server_command: "ntfy serve".to_string(),
            email_address: "sysadmin@example.com".to_string(),
            storage_file: PathBuf::from("/tmp/webpush.db"),
            base_url: "http://localhost:3003".to_string(),
        }
    }
}

impl LaunchConfig {
    /// Returns the configuration directory path.
    ///
    /// `VAPIDKIT_CONFIG_DIR` overrides the platform config dir
    /// (macOS: ~/Library/Application Support/vapidkit).
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("VAPIDKIT_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("vapidkit"))
    }

    /// Loads configuration from file, with environment variable overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_dir()?.join(CONFIG_FILE);
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(command) = std::env::var("VAPIDKIT_SERVER_COMMAND") {
            self.server_command = command;
        }
        if let Ok(email) = std::env::var("VAPIDKIT_EMAIL_ADDRESS") {
            self.email_address = email;
        }
        if let Ok(storage_file) = std::env::var("VAPIDKIT_STORAGE_FILE") {
            self.storage_file = PathBuf::from(storage_file);
        }
        if let Ok(base_url) = std::env::var("VAPIDKIT_BASE_URL") {
            self.base_url = base_url;
        }
    }

    /// Persists the configuration to the config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        let path = dir.join(CONFIG_FILE);
        self.save_to(&path)?;
        Ok(path)
    }

    /// Persists the configuration to `path` (owner read/write only on unix).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        #[cfg(unix)]
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

        Ok(())
    }

    /// Render the server launch command with both keys embedded.
    pub fn launch_command(&self, keys: &VapidKeys) -> String {
        [
            format!("{} \\", self.server_command),
            format!("  --web-push-public-key=\"{}\" \\", keys.public_key_base64url()),
            format!("  --web-push-private-key=\"{}\" \\", keys.private_key_base64url()),
            format!("  --web-push-email-address={} \\", self.email_address),
            format!("  --web-push-file={} \\", self.storage_file.display()),
            format!("  --base-url={}", self.base_url),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LaunchConfig::default();
        assert_eq!(config.server_command, "ntfy serve");
        assert_eq!(config.email_address, "sysadmin@example.com");
        assert_eq!(config.storage_file, PathBuf::from("/tmp/webpush.db"));
        assert_eq!(config.base_url, "http://localhost:3003");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("temp dir");
        let config =
            LaunchConfig::load_from(&temp_dir.path().join("absent.json")).expect("defaults");
        assert_eq!(config, LaunchConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);

        let config = LaunchConfig {
            email_address: "ops@example.org".to_string(),
            base_url: "https://push.example.org".to_string(),
            ..LaunchConfig::default()
        };
        config.save_to(&path).expect("save");

        let loaded = LaunchConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"base_url": "https://example.net"}"#).expect("write");

        let loaded = LaunchConfig::load_from(&path).expect("load");
        assert_eq!(loaded.base_url, "https://example.net");
        assert_eq!(loaded.email_address, "sysadmin@example.com");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json").expect("write");
        assert!(LaunchConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_launch_command_embeds_keys() {
        let keys = VapidKeys::generate().expect("should generate keys");
        let command = LaunchConfig::default().launch_command(&keys);

        assert!(command.starts_with("ntfy serve \\\n"));
        assert!(command.contains(&format!(
            "--web-push-public-key=\"{}\"",
            keys.public_key_base64url()
        )));
        assert!(command.contains(&format!(
            "--web-push-private-key=\"{}\"",
            keys.private_key_base64url()
        )));
        assert!(command.contains("--web-push-email-address=sysadmin@example.com"));
        assert!(command.contains("--web-push-file=/tmp/webpush.db"));
        assert!(command.ends_with("--base-url=http://localhost:3003"));
    }
}
