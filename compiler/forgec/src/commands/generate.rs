//! The `generate` command.

use std::fmt;

use forge_codegen::scaffold::{self, ScaffoldReport};
use forge_codegen::EmitReport;

use super::parse;
use crate::config::Project;
use crate::error::CliError;

/// What a successful `generate` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub resources: usize,
    pub emitted: EmitReport,
    pub scaffolded: ScaffoldReport,
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "generated {} file{} for {} resource{}",
            self.emitted.len(),
            plural_s(self.emitted.len()),
            self.resources,
            plural_s(self.resources),
        )?;
        for path in &self.scaffolded.created {
            writeln!(f, "  created {}", path.display())?;
        }
        Ok(())
    }
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse resources, rewrite the generated tree, and scaffold resources
/// that have no scaffold files yet.
pub fn generate(project: &Project) -> Result<GenerateReport, CliError> {
    let cx = project.emit_context()?;
    let output = parse(project)?;
    let resources = output.resources;
    let emitted = forge_codegen::emit(&project.root, &cx, &resources)?;

    let mut scaffolded = ScaffoldReport::default();
    for resource in &resources {
        let untouched = scaffold::targets(&cx, resource)
            .iter()
            .all(|(path, _)| !project.root.join(path).exists());
        if untouched {
            scaffolded.extend(scaffold::scaffold(&project.root, &cx, &resources, resource)?);
        }
    }
    tracing::debug!(
        files = emitted.len(),
        scaffolded = scaffolded.created.len(),
        "generate finished"
    );
    Ok(GenerateReport {
        resources: resources.len(),
        emitted,
        scaffolded,
    })
}
