//! Command executor for dispatching CLI commands

use super::config_merger::ConfigurationMerger;
use super::handlers::{RenderCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::logger::init_logger;

/// Execute the parsed command line
///
/// `render` works on its own input only. Everything else loads and merges the
/// configuration, starts logging, and hands over to the serve handler;
/// running without a subcommand is the same as `serve`.
///
/// # Errors
/// Returns configuration, logger, startup or rendering errors
pub async fn execute_command(cli: Cli) -> AppResult<()> {
    if let Some(Commands::Render { file, pretty }) = &cli.command {
        return RenderCommandHandler::new(file.clone(), *pretty).execute();
    }

    let merger = ConfigurationMerger::from_cli(&cli)?;
    let settings = merger.merge_cli_args(&cli)?;
    init_logger_from_settings(&settings)?;

    let dry_run = matches!(cli.command, Some(Commands::Serve { dry_run: true, .. }));
    ServeCommandHandler::new(settings, merger.environment())
        .execute(dry_run)
        .await
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the logger settings are invalid or a global subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> AppResult<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(&logger_config).map_err(anyhow::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::testing::{lock_env, EnvGuard};
    use crate::error::AppError;
    use clap::Parser;

    #[tokio::test]
    async fn test_render_needs_no_configuration() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(
            &path,
            r#"{"payload_version":1,"notifications":[{"message":"Planned","trigger":"run:planning"}]}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from(["tfe-teams-relay", "render", path.to_str().unwrap()])
            .unwrap();
        assert!(execute_command(cli).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_without_webhook_url_fails_before_starting() {
        let error = {
            let _lock = lock_env();
            let mut env = EnvGuard::new();
            env.clear_relay_vars();
            env.set("RELAY_CONFIG_DIR", "/nonexistent/relay-config");

            let cli = Cli::try_parse_from(["tfe-teams-relay", "serve", "--dry-run"]).unwrap();
            let merger = ConfigurationMerger::from_cli(&cli).unwrap();
            AppError::from(merger.merge_cli_args(&cli).unwrap_err())
        };

        match error {
            AppError::Configuration { key, .. } => assert_eq!(key, "relay.teams_webhook_url"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
