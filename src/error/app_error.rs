use thiserror::Error;

use crate::config::error::ConfigError;
use crate::relay::RelayError;

/// Application-wide error type returned by handlers and startup code.
///
/// Converted to an HTTP response by the `IntoResponse` impl in
/// `api::middleware::error_handler`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failure inside the relay pipeline
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
