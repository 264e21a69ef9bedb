//! Directory parse driver.
//!
//! Resources live one per directory: `<root>/<name>/schema.go`. Unreadable
//! files become `io_error` diagnostics so a single run still reports every
//! problem in the tree.

use std::fs;
use std::path::{Path, PathBuf};

use forge_diagnostic::{Diagnostic, DiagnosticSet, ErrorCode};
use forge_ir::Resource;
use forge_parse::SourceFile;

use crate::{check_policy, extract, validate, SourceMap};

/// File name holding a resource definition.
pub const SCHEMA_FILE: &str = "schema.go";

/// Everything one parse run produced.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub resources: Vec<Resource>,
    pub diagnostics: DiagnosticSet,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// `schema.go` files in the immediate subdirectories of `root`, sorted by
/// directory name. Hidden directories are skipped.
pub fn schema_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !entry.file_type()?.is_dir() {
            continue;
        }
        dirs.push(entry.path());
    }
    dirs.sort();
    Ok(dirs
        .into_iter()
        .map(|dir| dir.join(SCHEMA_FILE))
        .filter(|path| path.is_file())
        .collect())
}

/// Parse every resource under `root`.
pub fn parse_dir(root: &Path) -> ParseOutput {
    let paths = match schema_files(root) {
        Ok(paths) => paths,
        Err(err) => {
            let diag = Diagnostic::error(ErrorCode::IoError)
                .in_file(root.display().to_string())
                .with_message(format!("cannot read resource directory: {err}"));
            return ParseOutput {
                resources: Vec::new(),
                diagnostics: DiagnosticSet::from(vec![diag]),
            };
        }
    };

    let mut files = Vec::with_capacity(paths.len());
    let mut io_errors = DiagnosticSet::new();
    for path in paths {
        match SourceFile::read(&path) {
            Ok(file) => files.push(file),
            Err(err) => io_errors.push(
                Diagnostic::error(ErrorCode::IoError)
                    .in_file(path.display().to_string())
                    .with_message(format!("cannot read source file: {err}")),
            ),
        }
    }
    tracing::debug!(root = %root.display(), files = files.len(), "parsing resource tree");

    let mut output = parse_files(files);
    io_errors.extend(output.diagnostics);
    output.diagnostics = io_errors;
    output
}

/// Extract, validate and policy-check a set of in-memory files.
pub fn parse_files(files: impl IntoIterator<Item = SourceFile>) -> ParseOutput {
    let mut sources = SourceMap::new();
    let mut resources = Vec::new();
    let mut diagnostics = DiagnosticSet::new();

    for file in files {
        let extraction = extract(&file);
        resources.extend(extraction.resources);
        diagnostics.extend(DiagnosticSet::from(extraction.diagnostics));
        sources.insert(file);
    }

    diagnostics.extend(DiagnosticSet::from(validate(&resources, &sources)));
    diagnostics.extend(DiagnosticSet::from(check_policy(&resources, &sources)));
    diagnostics.sort();

    ParseOutput {
        resources,
        diagnostics,
    }
}

#[cfg(test)]
mod tests;
