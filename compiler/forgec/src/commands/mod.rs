//! Command handlers.
//!
//! Each handler returns its output instead of printing it, so the
//! integration tests see exactly what the user would. [`run`] dispatches a
//! parsed command line and does the printing.

use std::io::IsTerminal;
use std::path::Path;

use forge_diagnostic::{ColorMode, DiagnosticEmitter, DiagnosticSet, TerminalEmitter};
use forge_extract::ParseOutput;

use crate::cli::{Cli, Command, OpenapiAction};
use crate::config::Project;
use crate::error::CliError;

mod deploy;
mod dev;
mod explain;
mod generate;
mod inspect;
mod migrate;
mod scaffold;

pub use deploy::deploy;
pub use dev::{dev, Rebuild};
pub use explain::explain;
pub use generate::{generate, GenerateReport};
pub use inspect::{openapi_export, routes, ExportTarget};
pub use migrate::{migrate, migrate_with};
pub use scaffold::{find_resource, scaffold};

/// Run a parsed command line, printing results.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let color = ColorMode::from(cli.color);
    if let Command::Explain { code } = &cli.command {
        print!("{}", explain(code));
        return Ok(());
    }
    if !cli.dir.is_dir() {
        return Err(CliError::Usage(format!(
            "project directory {} does not exist",
            cli.dir.display()
        )));
    }
    let project = Project::load(&cli.dir)?;
    let result = match cli.command {
        Command::Generate => generate(&project).map(|report| eprint!("{report}")),
        Command::Scaffold { resource, diff } => {
            scaffold(&project, &resource, diff).map(|text| print!("{text}"))
        }
        Command::Migrate { action } => migrate(&project, &action).map(|text| print!("{text}")),
        Command::Dev => dev(&project, color),
        Command::Routes => routes(&project).map(|text| print!("{text}")),
        Command::Openapi {
            action: OpenapiAction::Export { file, format },
        } => {
            let target = ExportTarget::new(file, format.map(Into::into));
            openapi_export(&project, &target).map(|text| {
                if let Some(text) = text {
                    print!("{text}");
                }
            })
        }
        Command::Deploy => deploy(&project).map(|text| print!("{text}")),
        Command::Explain { .. } => Ok(()),
    };
    if let Err(CliError::Diagnostics(set)) = &result {
        print_diagnostics(set, color);
    }
    result
}

/// Render diagnostics to stderr, followed by the error summary.
pub fn print_diagnostics(set: &DiagnosticSet, color: ColorMode) {
    let mut emitter = TerminalEmitter::stderr(color, std::io::stderr().is_terminal());
    emitter.emit_all(set.as_slice());
    emitter.emit_summary(set.len());
    emitter.flush();
}

/// Parse the resource tree; any diagnostic fails the command.
pub(crate) fn parse(project: &Project) -> Result<ParseOutput, CliError> {
    let output = forge_extract::parse_dir(&project.resources_dir());
    tracing::debug!(
        resources = output.resources.len(),
        diagnostics = output.diagnostics.len(),
        "parsed resources"
    );
    if output.diagnostics.is_empty() {
        Ok(output)
    } else {
        Err(CliError::Diagnostics(output.diagnostics))
    }
}

pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
