//! The Forge command line.
//!
//! `forge` reads resource schemas from a project, reports diagnostics, and
//! drives the code emitter, the scaffolder, the migration engine and the
//! dev supervisor. The binary in `main.rs` only parses arguments and maps
//! errors to exit codes; everything else lives here so the integration
//! tests can call it directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod migrate;
pub mod tools;

mod error;
mod tracing_setup;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::{Config, ConfigError, Project};
pub use error::{CliError, EXIT_FAILURE, EXIT_USAGE};
pub use tracing_setup::{init_tracing, LOG_ENV};
