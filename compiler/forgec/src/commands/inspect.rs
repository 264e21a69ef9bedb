//! Read-only views of the schema: `routes` and `openapi export`.

use std::fs;
use std::path::PathBuf;

use forge_codegen::{openapi, render_table, routes as route_table, ExportFormat};

use super::parse;
use crate::config::Project;
use crate::error::CliError;

pub fn routes(project: &Project) -> Result<String, CliError> {
    let cx = project.emit_context()?;
    let resources = parse(project)?.resources;
    Ok(render_table(&route_table::routes(&cx, &resources)))
}

/// Where `openapi export` writes and in which format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportTarget {
    pub file: Option<PathBuf>,
    pub format: ExportFormat,
}

impl ExportTarget {
    /// An explicit format wins; otherwise `.yaml`/`.yml` files get YAML and
    /// everything else JSON.
    pub fn new(file: Option<PathBuf>, format: Option<ExportFormat>) -> Self {
        let format = format.unwrap_or_else(|| {
            file.as_deref()
                .and_then(|f| f.extension())
                .and_then(|ext| ext.to_str())
                .and_then(ExportFormat::parse)
                .unwrap_or_default()
        });
        ExportTarget { file, format }
    }
}

/// Render the OpenAPI document. Returns the text when writing to stdout,
/// `None` after writing a file. Relative files resolve against the
/// project root.
pub fn openapi_export(project: &Project, target: &ExportTarget) -> Result<Option<String>, CliError> {
    let cx = project.emit_context()?;
    let resources = parse(project)?.resources;
    let document = openapi::document(&cx, &project.title(), &resources);
    let text = openapi::export(&document, target.format)?;
    let Some(file) = &target.file else {
        return Ok(Some(text));
    };
    let path = project.root.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(CliError::io(parent))?;
    }
    fs::write(&path, text).map_err(CliError::io(&path))?;
    tracing::debug!(path = %path.display(), "wrote OpenAPI document");
    Ok(None)
}
