//! Emitter orchestration.
//!
//! [`emit`] wipes the generated tree, then runs [`SUB_EMITTERS`] in order.
//! Each sub-emitter owns a fixed set of output paths, so the tree after a
//! run depends only on the resources and the embedded templates.

use std::path::{Path, PathBuf};

use forge_fmt::FormatOptions;
use forge_ir::Resource;
use serde_json::Value;

use crate::context::{global_context, resource_context, EmitContext};
use crate::error::EmitError;
use crate::helpers::snake;
use crate::schema_hcl;
use crate::templates;
use crate::writer::{wipe, EmitReport, Writer};

/// State shared by the sub-emitters of one run.
pub struct Emission<'a> {
    cx: &'a EmitContext,
    resources: &'a [Resource],
    writer: Writer,
}

impl Emission<'_> {
    fn generated(&self, rel: &str) -> PathBuf {
        Path::new(&self.cx.generated_dir).join(rel)
    }

    /// Render a project-wide template to `<generated>/<rel>`.
    fn global(&mut self, template: &str, rel: &str) -> Result<(), EmitError> {
        let context = global_context(self.cx, self.resources);
        self.render_to(template, &context, self.generated(rel))
    }

    /// Render a per-resource template once per resource; `path` maps the
    /// resource's snake name to its output under the generated tree.
    fn each_resource(&mut self, template: &str, path: fn(&str) -> String) -> Result<(), EmitError> {
        for resource in self.resources {
            let context = resource_context(self.cx, self.resources, resource);
            let rel = self.generated(&path(&snake(&resource.name)));
            self.render_to(template, &context, rel)?;
        }
        Ok(())
    }

    fn render_to(&mut self, template: &str, context: &Value, rel: PathBuf) -> Result<(), EmitError> {
        let text = templates::render(template, context)?;
        self.writer.write(rel, &text)
    }
}

/// One step of the emitter.
pub struct SubEmitter {
    pub name: &'static str,
    run: fn(&mut Emission<'_>) -> Result<(), EmitError>,
}

/// Sub-emitters in run order.
pub const SUB_EMITTERS: &[SubEmitter] = &[
    SubEmitter { name: "model", run: models },
    SubEmitter { name: "schema", run: schema },
    SubEmitter { name: "factories", run: factories },
    SubEmitter { name: "validation", run: validation },
    SubEmitter { name: "queries", run: queries },
    SubEmitter { name: "pagination", run: pagination },
    SubEmitter { name: "transaction", run: transaction },
    SubEmitter { name: "tool-config", run: tool_config },
    SubEmitter { name: "errors", run: errors },
    SubEmitter { name: "actions", run: actions },
    SubEmitter { name: "api", run: api },
    SubEmitter { name: "html", run: html },
    SubEmitter { name: "middleware", run: middleware },
];

fn models(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.each_resource("models/model.go", |s| format!("models/{s}.go"))
}

fn schema(e: &mut Emission<'_>) -> Result<(), EmitError> {
    let text = schema_hcl::render(e.resources);
    let rel = e.generated("schema/schema.hcl");
    e.writer.write(rel, &text)
}

fn factories(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.each_resource("factories/factory.go", |s| format!("factories/{s}_factory.go"))
}

fn validation(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("validation/errors.go", "validation/errors.go")?;
    e.each_resource("validation/resource.go", |s| format!("validation/{s}.go"))
}

fn queries(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("queries/query.go", "queries/query.go")?;
    e.each_resource("queries/resource.go", |s| format!("queries/{s}.go"))
}

fn pagination(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("pagination/pagination.go", "pagination/pagination.go")
}

fn transaction(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("db/tx.go", "db/tx.go")
}

/// The migration tool's project file lives at the root and belongs to the
/// user once written.
fn tool_config(e: &mut Emission<'_>) -> Result<(), EmitError> {
    let context = global_context(e.cx, e.resources);
    let text = templates::render("atlas.hcl", &context)?;
    e.writer.write_once("atlas.hcl", &text)?;
    Ok(())
}

fn errors(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("errors/errors.go", "errors/errors.go")?;
    e.global("errors/pgerrors.go", "errors/pgerrors.go")
}

fn actions(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.each_resource("actions/resource.go", |s| format!("actions/{s}.go"))?;
    e.global("actions/registry.go", "actions/registry.go")
}

fn api(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.each_resource("api/resource.go", |s| format!("api/{s}.go"))?;
    e.global("api/pagination.go", "api/pagination.go")?;
    e.global("api/router.go", "api/router.go")
}

fn html(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("html/fields.templ", "html/fields.templ")?;
    e.global("sse/sse.go", "sse/sse.go")
}

fn middleware(e: &mut Emission<'_>) -> Result<(), EmitError> {
    e.global("middleware/recover.go", "middleware/recover.go")?;
    e.global("middleware/errors.go", "middleware/errors.go")
}

/// Regenerate the generated tree of the project at `root`.
pub fn emit(root: &Path, cx: &EmitContext, resources: &[Resource]) -> Result<EmitReport, EmitError> {
    wipe(&root.join(&cx.generated_dir))?;
    let mut emission = Emission {
        cx,
        resources,
        writer: Writer::new(root, FormatOptions::with_local_prefix(&cx.module)),
    };
    for sub in SUB_EMITTERS {
        let before = emission.writer.written();
        (sub.run)(&mut emission)?;
        tracing::debug!(
            emitter = sub.name,
            files = emission.writer.written() - before,
            "sub-emitter finished"
        );
    }
    let report = emission.writer.finish();
    tracing::debug!(files = report.len(), root = %root.display(), "emitted generated tree");
    Ok(report)
}
