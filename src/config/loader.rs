//! Configuration loader
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "RELAY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "RELAY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Teams webhook URL as set by the deployment platform
pub const TEAMS_WEBHOOK_URL_ENV: &str = "TEAMS_WEBHOOK_URL";

/// Terraform Cloud notification token as set by the deployment platform
pub const TFE_WEBHOOK_TOKEN_ENV: &str = "TFE_WEBHOOK_TOKEN";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base configuration (optional)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides (optional)
/// 4. `RELAY_*` environment variables
/// 5. `TEAMS_WEBHOOK_URL` / `TFE_WEBHOOK_TOKEN` (highest priority)
///
/// Every file is optional so the relay can run from environment variables
/// alone.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`RELAY_CONFIG_DIR`)
    /// - Specific configuration file (`RELAY_CONFIG_FILE`)
    /// - Application environment (`RELAY_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `RELAY_CONFIG_DIR` and `RELAY_CONFIG_FILE` are set,
    /// as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_env = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_env.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "RELAY_CONFIG_DIR and RELAY_CONFIG_FILE cannot both be set. \
                 Use RELAY_CONFIG_DIR for layered configuration or \
                 RELAY_CONFIG_FILE for a single configuration file.",
            ));
        }

        let config_dir = config_dir_env
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single configuration file instead of the layered directory.
    ///
    /// Unlike layered loading, the file must exist.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `RELAY_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The single configuration file is missing
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from all sources without validating it.
    ///
    /// Callers that apply further overrides validate the final result
    /// themselves.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // RELAY_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);
        let builder = Self::add_platform_overrides(builder)?;

        builder.build().map_err(ConfigError::from)
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// Environment variables with prefix `RELAY_` are mapped to configuration keys.
    /// Double underscores (`__`) are used as separators for nested keys.
    ///
    /// Examples:
    /// - `RELAY_SERVER__PORT` -> `server.port`
    /// - `RELAY_RELAY__PATH` -> `relay.path`
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }

    /// `TEAMS_WEBHOOK_URL` and `TFE_WEBHOOK_TOKEN` win over every other source.
    fn add_platform_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = builder.set_override_option(
            "relay.teams_webhook_url",
            non_empty_env(TEAMS_WEBHOOK_URL_ENV),
        )?;
        let builder = builder.set_override_option(
            "relay.tfe_webhook_token",
            non_empty_env(TFE_WEBHOOK_TOKEN_ENV),
        )?;
        Ok(builder)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
