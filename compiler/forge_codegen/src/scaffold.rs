//! Scaffolding of user-owned resource files.
//!
//! Files land under `<resources>/<snake name>/` and are written only when
//! absent: once created they belong to the developer. [`diff`] previews
//! what a fresh render would change without touching disk.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dissimilar::Chunk;
use forge_fmt::FormatOptions;
use forge_ir::Resource;

use crate::context::{resource_context, EmitContext};
use crate::error::EmitError;
use crate::helpers::snake;
use crate::templates;
use crate::writer::{prepare, write_file};

/// A file the scaffolder renders: template and path inside the resource
/// directory.
const FILES: &[(&str, &str)] = &[
    ("scaffold/form.templ", "views/form.templ"),
    ("scaffold/list.templ", "views/list.templ"),
    ("scaffold/detail.templ", "views/detail.templ"),
    ("scaffold/error.templ", "views/error.templ"),
    ("scaffold/handlers.go", "handlers.go"),
    ("scaffold/hooks.go", "hooks.go"),
];

/// Rendered only for resources that declare hooks.
const JOBS_FILE: (&str, &str) = ("scaffold/jobs.go", "jobs.go");

/// Outcome of a scaffold run, paths relative to the project root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ScaffoldReport {
    pub fn extend(&mut self, other: ScaffoldReport) {
        self.created.extend(other.created);
        self.skipped.extend(other.skipped);
    }
}

/// Directory holding a resource's sources, relative to the project root.
pub fn resource_dir(cx: &EmitContext, resource: &Resource) -> PathBuf {
    Path::new(&cx.resources_dir).join(snake(&resource.name))
}

/// Target paths and their templates, in write order.
pub fn targets(cx: &EmitContext, resource: &Resource) -> Vec<(PathBuf, &'static str)> {
    let dir = resource_dir(cx, resource);
    let mut files: Vec<(&str, &str)> = FILES.to_vec();
    if !resource.options.hooks.is_empty() {
        files.push(JOBS_FILE);
    }
    files
        .into_iter()
        .map(|(template, rel)| (dir.join(rel), template))
        .collect()
}

/// Render every target of `resource`.
fn render_all(
    cx: &EmitContext,
    resources: &[Resource],
    resource: &Resource,
) -> Result<Vec<(PathBuf, String)>, EmitError> {
    let context = resource_context(cx, resources, resource);
    let options = FormatOptions::with_local_prefix(&cx.module);
    targets(cx, resource)
        .into_iter()
        .map(|(path, template)| {
            let text = templates::render(template, &context)?;
            let text = prepare(&path, &text, &options)?;
            Ok((path, text))
        })
        .collect()
}

/// Write the missing scaffold files of `resource` under `root`.
pub fn scaffold(
    root: &Path,
    cx: &EmitContext,
    resources: &[Resource],
    resource: &Resource,
) -> Result<ScaffoldReport, EmitError> {
    let mut report = ScaffoldReport::default();
    for (path, text) in render_all(cx, resources, resource)? {
        let full = root.join(&path);
        if full.exists() {
            tracing::debug!(path = %path.display(), "scaffold file exists, skipped");
            report.skipped.push(path);
            continue;
        }
        write_file(&full, &text)?;
        tracing::debug!(path = %path.display(), "scaffolded file");
        report.created.push(path);
    }
    Ok(report)
}

/// How a scaffold target compares with the file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileDiff {
    WouldCreate(PathBuf),
    Unchanged(PathBuf),
    Changed { path: PathBuf, diff: String },
}

impl FileDiff {
    pub fn path(&self) -> &Path {
        match self {
            FileDiff::WouldCreate(path)
            | FileDiff::Unchanged(path)
            | FileDiff::Changed { path, .. } => path,
        }
    }
}

/// Compare the on-disk scaffold of `resource` with a fresh render.
pub fn diff(
    root: &Path,
    cx: &EmitContext,
    resources: &[Resource],
    resource: &Resource,
) -> Result<Vec<FileDiff>, EmitError> {
    render_all(cx, resources, resource)?
        .into_iter()
        .map(|(path, fresh)| {
            let full = root.join(&path);
            let current = match fs::read_to_string(&full) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(FileDiff::WouldCreate(path));
                }
                Err(e) => return Err(EmitError::io(&full)(e)),
            };
            if current == fresh {
                Ok(FileDiff::Unchanged(path))
            } else {
                Ok(FileDiff::Changed {
                    diff: inline_diff(&current, &fresh),
                    path,
                })
            }
        })
        .collect()
}

/// Character diff from `old` to `new` with `[-removed-]` and `{+added+}`
/// markers, reduced to the lines a change touches.
pub fn inline_diff(old: &str, new: &str) -> String {
    let mut marked = String::new();
    let mut touched = Vec::new();
    let mut line = 0;
    for chunk in dissimilar::diff(old, new) {
        let (text, open, close) = match chunk {
            Chunk::Equal(text) => {
                marked.push_str(text);
                line += text.matches('\n').count();
                continue;
            }
            Chunk::Delete(text) => (text, "[-", "-]"),
            Chunk::Insert(text) => (text, "{+", "+}"),
        };
        let _ = write!(marked, "{open}{text}{close}");
        let end = line + text.matches('\n').count();
        touched.extend(line..=end);
        line = end;
    }
    let mut out = String::new();
    for (index, text) in marked.lines().enumerate() {
        if touched.contains(&index) {
            let _ = writeln!(out, "{:>4} | {text}", index + 1);
        }
    }
    out
}

/// Human-readable report of a diff run.
pub fn render_diff(diffs: &[FileDiff]) -> String {
    let mut out = String::new();
    for diff in diffs {
        match diff {
            FileDiff::WouldCreate(path) => {
                let _ = writeln!(out, "{}: would be created", path.display());
            }
            FileDiff::Unchanged(path) => {
                let _ = writeln!(out, "{}: unchanged", path.display());
            }
            FileDiff::Changed { path, diff } => {
                let _ = writeln!(out, "{}: differs from a fresh render", path.display());
                out.push_str(diff);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests;
