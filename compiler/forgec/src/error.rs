use std::io;
use std::path::{Path, PathBuf};

use forge_codegen::EmitError;
use forge_diagnostic::DiagnosticSet;

use crate::config::ConfigError;
use crate::migrate::MigrateError;
use crate::tools::ToolError;

/// Exit code for user errors: diagnostics, configuration, failed tools.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for malformed invocations.
pub const EXIT_USAGE: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Schema diagnostics. Rendered by the diagnostic emitter, not by
    /// `Display`.
    #[error("{} schema error{}", .0.len(), if .0.len() == 1 { "" } else { "s" })]
    Diagnostics(DiagnosticSet),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("cannot watch the project: {0}")]
    Watch(#[from] notify::Error),
    #[error("cannot install the signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("no resource named `{0}`")]
    UnknownResource(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> CliError + '_ {
        move |source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
