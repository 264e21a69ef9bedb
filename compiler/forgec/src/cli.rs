//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use forge_codegen::ExportFormat;
use forge_diagnostic::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(about = "Compile resource schemas into a Go web application")]
#[command(version)]
pub struct Cli {
    /// When to color diagnostics
    #[arg(long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    /// Project root holding forge.toml
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse resources and rewrite the generated tree
    Generate,
    /// Create the user-owned files of a resource
    Scaffold {
        /// Resource name, e.g. Product
        resource: String,
        /// Compare existing files with a fresh render instead of writing
        #[arg(long)]
        diff: bool,
    },
    /// Manage versioned database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Watch the project and regenerate on change
    Dev,
    /// Print the REST route table
    Routes,
    /// OpenAPI document tools
    Openapi {
        #[command(subcommand)]
        action: OpenapiAction,
    },
    /// Generate, then run the configured deploy command
    Deploy,
    /// Explain a diagnostic code
    Explain {
        /// Code as printed in diagnostics, e.g. dynamic_value
        code: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MigrateAction {
    /// Create a migration from the declarative schema
    Diff {
        /// Migration name
        name: String,
        /// Keep migrations that drop or retype tables, columns or indexes
        #[arg(long)]
        force: bool,
    },
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (all when omitted)
        amount: Option<u32>,
    },
    /// Revert applied migrations
    Down {
        /// Number of migrations to revert
        amount: Option<u32>,
    },
    /// Show applied and pending migrations
    Status,
    /// Recompute the migration directory checksum
    Hash,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OpenapiAction {
    /// Write the OpenAPI document to a file or stdout
    Export {
        /// Output file; stdout when omitted
        file: Option<PathBuf>,
        /// Document format; inferred from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorMode {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorMode::Auto,
            Color::Always => ColorMode::Always,
            Color::Never => ColorMode::Never,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    #[value(alias = "yml")]
    Yaml,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ExportFormat::Json,
            Format::Yaml => ExportFormat::Yaml,
        }
    }
}

#[cfg(test)]
mod tests;
