//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::{settings::Settings, Environment};
use crate::error::AppResult;
use crate::server::Server;
use crate::state::AppState;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Runs the server, or only validates the configuration when `dry_run`.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config, self.environment).run().await?;
        Ok(())
    }

    /// Validate configuration without starting the server
    ///
    /// Builds the relay the same way the server would, so an unusable webhook
    /// URL is caught here too. Neither the URL nor the token is printed.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        let state = AppState::from_settings(self.config.clone())?;

        println!("✓ Configuration is valid ({})", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Relay endpoint: POST {}", self.config.relay.path);
        println!("✓ Teams webhook URL is configured");
        if state.relay.has_secret() {
            println!("✓ Signature verification is enabled");
        } else {
            println!("! No TFE_WEBHOOK_TOKEN set, signed notifications will be refused");
        }
        println!("✓ Logger configuration is valid");

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
