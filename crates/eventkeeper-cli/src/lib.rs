//! CLI, runtime configuration and command implementations
//!
//! This crate provides the `eventkeeper` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
