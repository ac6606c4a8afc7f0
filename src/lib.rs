//! tfe-teams-relay library
//!
//! Receives Terraform Cloud run notifications, verifies them, converts them
//! into Microsoft Teams MessageCards and forwards them to a Teams webhook.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod relay;
pub mod server;
pub mod state;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
