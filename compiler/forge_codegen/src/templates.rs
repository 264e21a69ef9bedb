//! Templates compiled into the binary, looked up by logical name.

use serde_json::Value;

use crate::error::EmitError;
use crate::template;

macro_rules! embed {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $name, ".tmpl")))),*]
    };
}

/// Every template as `(logical name, source)`.
pub const TEMPLATES: &[(&str, &str)] = embed![
    "models/model.go",
    "factories/factory.go",
    "validation/errors.go",
    "validation/resource.go",
    "queries/query.go",
    "queries/resource.go",
    "pagination/pagination.go",
    "db/tx.go",
    "atlas.hcl",
    "errors/errors.go",
    "errors/pgerrors.go",
    "actions/resource.go",
    "actions/registry.go",
    "api/resource.go",
    "api/pagination.go",
    "api/router.go",
    "html/fields.templ",
    "sse/sse.go",
    "middleware/recover.go",
    "middleware/errors.go",
    "scaffold/form.templ",
    "scaffold/list.templ",
    "scaffold/detail.templ",
    "scaffold/error.templ",
    "scaffold/handlers.go",
    "scaffold/hooks.go",
    "scaffold/jobs.go",
];

pub fn source(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Render the template called `name` against `context`.
pub fn render(name: &str, context: &Value) -> Result<String, EmitError> {
    let source = source(name).ok_or_else(|| EmitError::UnknownTemplate(name.to_string()))?;
    Ok(template::render(name, source, context)?)
}

#[cfg(test)]
mod tests;
