//! The `migrate` command.

use std::fmt::Write as _;

use super::{display_path, generate};
use crate::cli::MigrateAction;
use crate::config::Project;
use crate::error::CliError;
use crate::migrate::{self, Atlas, Engine};

pub fn migrate(project: &Project, action: &MigrateAction) -> Result<String, CliError> {
    let needs_database = matches!(
        action,
        MigrateAction::Up { .. } | MigrateAction::Down { .. } | MigrateAction::Status
    );
    let database_url = if needs_database {
        Some(project.database_url()?.to_string())
    } else {
        project.config.database.url.clone()
    };
    let engine = Atlas {
        root: project.root.clone(),
        database_url,
    };
    migrate_with(project, action, &engine)
}

/// [`migrate`] against any engine.
pub fn migrate_with(
    project: &Project,
    action: &MigrateAction,
    engine: &dyn Engine,
) -> Result<String, CliError> {
    let (verb, amount) = match action {
        MigrateAction::Diff { name, force } => return diff(project, engine, name, *force),
        MigrateAction::Up { amount } => ("apply", *amount),
        MigrateAction::Down { amount } => ("down", *amount),
        MigrateAction::Status => ("status", None),
        MigrateAction::Hash => ("hash", None),
    };
    let amount = amount.map(|n| n.to_string());
    let mut args = vec![verb];
    args.extend(amount.as_deref());
    Ok(engine.migrate(&args)?)
}

/// Regenerate the declarative schema, then diff and guard.
fn diff(project: &Project, engine: &dyn Engine, name: &str, force: bool) -> Result<String, CliError> {
    generate(project)?;
    let report = migrate::diff(engine, &project.migrations_dir(), name, force)?;
    let mut out = report.output;
    if report.created.is_empty() {
        out.push_str("no schema changes\n");
    }
    for path in &report.created {
        let _ = writeln!(out, "created {}", display_path(&project.root, path));
    }
    for warning in &report.warnings {
        out.push_str(warning);
    }
    Ok(out)
}
