//! The `scaffold` command.

use std::fmt::Write as _;

use forge_codegen::helpers::snake;
use forge_codegen::scaffold as scaffolder;
use forge_ir::Resource;

use super::parse;
use crate::config::Project;
use crate::error::CliError;

/// Look a resource up by its declared name, case-insensitively, or by its
/// directory name.
pub fn find_resource<'r>(resources: &'r [Resource], name: &str) -> Option<&'r Resource> {
    resources
        .iter()
        .find(|r| r.name == name)
        .or_else(|| {
            resources
                .iter()
                .find(|r| r.name.eq_ignore_ascii_case(name) || snake(&r.name) == name)
        })
}

/// Scaffold one resource, or preview the difference with `diff`.
pub fn scaffold(project: &Project, name: &str, diff: bool) -> Result<String, CliError> {
    let cx = project.emit_context()?;
    let resources = parse(project)?.resources;
    let resource = find_resource(&resources, name)
        .ok_or_else(|| CliError::UnknownResource(name.to_string()))?;

    if diff {
        let diffs = scaffolder::diff(&project.root, &cx, &resources, resource)?;
        return Ok(scaffolder::render_diff(&diffs));
    }

    let report = scaffolder::scaffold(&project.root, &cx, &resources, resource)?;
    let mut out = String::new();
    for path in &report.created {
        let _ = writeln!(out, "created {}", path.display());
    }
    for path in &report.skipped {
        let _ = writeln!(out, "exists  {}", path.display());
    }
    Ok(out)
}
