//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments sit on top of everything the `ConfigLoader` reads, so the
//! merged settings are validated only once all overrides are in place.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{settings::Settings, ConfigLoader, Environment};

/// Applies CLI overrides on top of file and environment configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base configuration the CLI points at.
    ///
    /// `--config` selects single-file mode and `--env` overrides
    /// `RELAY_APP_ENV`. Validation is deferred to [`Self::merge_cli_args`].
    ///
    /// # Errors
    /// Returns ConfigError if the loader cannot be created or loading fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(environment) = cli.env {
            loader = loader.with_environment(environment);
        }

        let environment = loader.environment();
        let base_config = loader.load_unvalidated()?;
        Ok(Self::new(base_config, environment))
    }

    /// Merge CLI arguments with the base configuration and validate the result
    ///
    /// Precedence for the log level: `serve --log-level`, then
    /// `--verbose` / `--quiet`, then configuration.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        apply_global_overrides(&mut config, cli);

        if let Some(command) = &cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    /// Environment the configuration was loaded for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the base configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
    if cli.verbose {
        config.logger.level = "debug".to_string();
    } else if cli.quiet {
        config.logger.level = "error".to_string();
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }

            if let Some(port_num) = port {
                config.server.port = *port_num;
            }

            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }
        // Rendering never reads the configuration
        Commands::Render { .. } => {}
    }
}
