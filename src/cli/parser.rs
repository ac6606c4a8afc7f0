//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::build;
use crate::config::Environment;

/// Relays Terraform Cloud run notifications to Microsoft Teams
#[derive(Parser, Debug)]
#[command(name = "tfe-teams-relay")]
#[command(about = "Relays Terraform Cloud run notifications to Microsoft Teams")]
#[command(long_about = "
tfe-teams-relay receives Terraform Cloud / Enterprise notification webhooks,
verifies their HMAC-SHA512 signature, converts them into Microsoft Teams
MessageCards and posts them to a Teams incoming webhook.

The Teams webhook URL is read from TEAMS_WEBHOOK_URL and the shared secret
from TFE_WEBHOOK_TOKEN. Both may also be set in the configuration files.

EXAMPLES:
    # Start the relay with the default configuration
    tfe-teams-relay serve

    # Listen on all interfaces
    tfe-teams-relay serve --host 0.0.0.0 --port 8080

    # Check the configuration without starting the server
    tfe-teams-relay --env production serve --dry-run

    # Show the card a saved notification would produce
    tfe-teams-relay render notification.json --pretty
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered files in the
    /// configuration directory. Environment variables still apply on top.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` is layered over the defaults.
    /// Takes precedence over RELAY_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay server (default)
    ///
    /// Examples:
    ///   tfe-teams-relay serve                            # Start with defaults
    ///   tfe-teams-relay serve --host 0.0.0.0 --port 80  # Bind to all interfaces
    ///   tfe-teams-relay serve --dry-run                  # Validate config and exit
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration files and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Translate a notification payload and print the MessageCard
    ///
    /// Nothing is sent to Teams and no configuration is needed. The payload
    /// goes through the same version and content checks as the server applies.
    ///
    /// Examples:
    ///   tfe-teams-relay render notification.json
    ///   cat notification.json | tfe-teams-relay render - --pretty
    Render {
        /// Payload file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty-print the card
        #[arg(long)]
        pretty: bool,
    },
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}
