//! vapidkit CLI - generates and checks VAPID keys for Web Push servers.
//!
//! This is the main binary entry point. See the `vapidkit` library for the
//! key pipeline.

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::PathBuf;
use vapidkit::{commands, LaunchConfig};

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// CLI
#[derive(Parser)]
#[command(name = "vapidkit")]
#[command(version)]
#[command(about = "Generate and validate VAPID keys for Web Push")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair and print a server launch command
    Generate {
        /// Print only the keys, as JSON
        #[arg(long)]
        json: bool,
        /// Contact address for the launch command
        #[arg(long)]
        email: Option<String>,
        /// Subscription store path for the launch command
        #[arg(long)]
        storage_file: Option<PathBuf>,
        /// Base URL for the launch command
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Check the structure and consistency of an existing key pair
    Validate {
        /// Public key (base64url)
        public_key: String,
        /// Private key (base64url)
        private_key: String,
    },
    /// Decode a single key and print its bytes
    Decode {
        /// Key text (base64url)
        key: String,
    },
    /// Show the effective launch configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_secs();

    // Use VAPIDKIT_LOG_FILE to keep stderr clean when output is piped
    if let Ok(path) = std::env::var("VAPIDKIT_LOG_FILE") {
        let log_file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create log file at {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            json,
            email,
            storage_file,
            base_url,
        } => {
            let mut config = LaunchConfig::load()?;
            if let Some(email) = email {
                config.email_address = email;
            }
            if let Some(storage_file) = storage_file {
                config.storage_file = storage_file;
            }
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            commands::generate::run(&config, json)?;
        }
        Commands::Validate {
            public_key,
            private_key,
        } => {
            commands::validate::run(&public_key, &private_key)?;
        }
        Commands::Decode { key } => {
            commands::decode::run(&key)?;
        }
        Commands::Config { save } => {
            let config = LaunchConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = config.save()?;
                eprintln!("Saved configuration to {}", path.display());
            }
        }
    }

    Ok(())
}
