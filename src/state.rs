//! Application state for Axum web framework.
//!
//! Contains the shared relay and settings accessible across all request
//! handlers. Nothing in it changes after startup.

use std::sync::Arc;

use crate::config::error::ConfigError;
use crate::config::settings::Settings;
use crate::external::build_http_client;
use crate::relay::{CardForwarder, NotificationRelay, TeamsWebhookForwarder};

/// Application state shared by all handlers.
///
/// Cloning is cheap; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Notification pipeline
    pub relay: Arc<NotificationRelay>,
    /// Validated settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Builds the state with a Teams webhook forwarder from validated settings.
    ///
    /// # Errors
    /// - the Teams webhook URL is missing or invalid
    /// - the HTTP client cannot be built
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let url = settings.relay.webhook_url()?;
        let client = build_http_client(settings.relay.forward_timeout()).map_err(|e| {
            ConfigError::ValidationError {
                field: "relay.forward_timeout".to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        let forwarder = Arc::new(TeamsWebhookForwarder::new(client, url));
        Ok(Self::with_forwarder(settings, forwarder))
    }

    /// Builds the state around any card forwarder.
    pub fn with_forwarder(settings: Settings, forwarder: Arc<dyn CardForwarder>) -> Self {
        let secret = settings.relay.webhook_token().map(str::to_string);
        let relay = NotificationRelay::new(secret, forwarder);

        Self {
            relay: Arc::new(relay),
            settings: Arc::new(settings),
        }
    }
}
