//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, RelayConfig, ServerConfig, Settings};
use crate::logger::VALID_LOG_LEVELS;

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl RelayConfig {
    /// Validate relay configuration
    ///
    /// # Validation Rules
    /// - Teams webhook URL must be set and be an absolute http(s) URL
    /// - Path must start with `/`, must not be a route pattern and must not
    ///   shadow the health endpoints
    /// - Forward timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.webhook_url()?;

        if !self.path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                field: "relay.path".to_string(),
                message: format!("Relay path '{}' must start with '/'.", self.path),
            });
        }

        if self.path.contains(['{', '}', '*']) {
            return Err(ConfigError::ValidationError {
                field: "relay.path".to_string(),
                message: format!("Relay path '{}' must be a literal path.", self.path),
            });
        }

        if self.path == "/health" || self.path.starts_with("/health/") {
            return Err(ConfigError::ValidationError {
                field: "relay.path".to_string(),
                message: format!("Relay path '{}' conflicts with the health endpoints.", self.path),
            });
        }

        if self.forward_timeout == 0 {
            return Err(ConfigError::validation(
                "relay.forward_timeout",
                "Forward timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    /// Parsed Teams webhook URL
    pub fn webhook_url(&self) -> Result<Url, ConfigError> {
        let raw = self.teams_webhook_url.trim();
        if raw.is_empty() {
            return Err(ConfigError::validation(
                "relay.teams_webhook_url",
                "Teams webhook URL is required. Set TEAMS_WEBHOOK_URL or relay.teams_webhook_url.",
            ));
        }

        let url = Url::parse(raw).map_err(|e| ConfigError::ValidationError {
            field: "relay.teams_webhook_url".to_string(),
            message: format!("Invalid Teams webhook URL: {}", e),
        })?;

        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::ValidationError {
                field: "relay.teams_webhook_url".to_string(),
                message: format!(
                    "Teams webhook URL must be an absolute http(s) URL, got scheme '{}'",
                    url.scheme()
                ),
            });
        }

        Ok(url)
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.relay.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
