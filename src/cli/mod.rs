//! Command-line interface
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files + environment)
//! - Command handlers for `serve` and `render`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::{execute_command, init_logger_from_settings};
pub use parser::{Cli, Commands, LogLevel};
