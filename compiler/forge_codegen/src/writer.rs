//! File output: the generated-tree wipe and the write contract
//! (ensure parent directory, format, write with mode 0644).

use std::fs;
use std::path::{Path, PathBuf};

use forge_fmt::{format_source, FormatOptions};

use crate::error::EmitError;

/// First line of every generated file, after the comment marker.
pub const GENERATED_MARKER: &str = "Code generated by forge. DO NOT EDIT.";

/// The generated marker as a comment in the syntax of `path`'s extension.
pub fn generated_header(path: &Path) -> Option<String> {
    let marker = match path.extension()?.to_str()? {
        "go" | "templ" => "//",
        "hcl" | "yaml" | "yml" => "#",
        _ => return None,
    };
    Some(format!("{marker} {GENERATED_MARKER}\n\n"))
}

/// Whether `path` is source the formatter understands.
pub fn is_formatted(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "go")
}

/// Paths written by one run, relative to the project root, in write order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
}

impl EmitReport {
    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// Remove `dir` and everything under it. A missing directory is fine.
pub fn wipe(dir: &Path) -> Result<(), EmitError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "wiped generated tree");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EmitError::io(dir)(e)),
    }
}

/// Format `contents` if `path` is formatted source; `rel` names the file
/// in errors.
pub fn prepare(rel: &Path, contents: &str, options: &FormatOptions) -> Result<String, EmitError> {
    if !is_formatted(rel) {
        return Ok(contents.to_string());
    }
    format_source(contents, options).map_err(|source| EmitError::Format {
        path: rel.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(EmitError::io(parent))?;
    }
    fs::write(path, contents).map_err(EmitError::io(path))?;
    set_mode(path)?;
    tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<(), EmitError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(EmitError::io(path))
}

#[cfg(not(unix))]
#[expect(clippy::unnecessary_wraps, reason = "mirrors the unix signature")]
fn set_mode(_path: &Path) -> Result<(), EmitError> {
    Ok(())
}

/// Writes generated files under a project root and records them.
pub struct Writer {
    root: PathBuf,
    options: FormatOptions,
    report: EmitReport,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>, options: FormatOptions) -> Self {
        Writer {
            root: root.into(),
            options,
            report: EmitReport::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Format, prefix with the generated marker and write `rel`.
    pub fn write(&mut self, rel: impl AsRef<Path>, contents: &str) -> Result<(), EmitError> {
        let rel = rel.as_ref();
        let body = prepare(rel, contents, &self.options)?;
        let text = match generated_header(rel) {
            Some(header) => header + &body,
            None => body,
        };
        write_file(&self.root.join(rel), &text)?;
        self.report.written.push(rel.to_path_buf());
        Ok(())
    }

    /// Like [`Writer::write`], but leaves an existing file alone.
    pub fn write_once(&mut self, rel: impl AsRef<Path>, contents: &str) -> Result<bool, EmitError> {
        let rel = rel.as_ref();
        if self.root.join(rel).exists() {
            tracing::debug!(path = %rel.display(), "kept existing file");
            return Ok(false);
        }
        self.write(rel, contents)?;
        Ok(true)
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.report.written.len()
    }

    pub fn finish(self) -> EmitReport {
        self.report
    }
}

#[cfg(test)]
mod tests;
