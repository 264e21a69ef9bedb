//! Template language.
//!
//! ```text
//! {{ expr }}                         interpolation
//! {{#if expr}} ... {{else}} ... {{/if}}
//! {{#each expr as name}} ... {{/each}}
//! {{! comment }}
//! ```
//!
//! Expressions are dotted paths (`resource.name`), string and integer
//! literals, `true`/`false`/`null`, helper calls (`snake resource.name`),
//! pipelines (`resource.name | snake | plural`, the piped value becoming
//! the helper's first argument) and parenthesised groups. Inside `each`,
//! `loop.index`, `loop.first` and `loop.last` describe the iteration.
//!
//! A block tag (`#if`, `else`, `/if`, `#each`, `/each`, comment) that is
//! alone on its line removes the whole line from the output, so templates
//! can be laid out like the code they produce.
//!
//! Values are `serde_json::Value`s whose objects iterate in key order.

mod expr;
mod render;
mod syntax;

use serde_json::Value;
use thiserror::Error;

use syntax::Node;

/// A template failure, located in the template source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("template `{name}`, line {line}: {kind}")]
pub struct TemplateError {
    pub name: String,
    pub line: u32,
    pub kind: TemplateErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TemplateErrorKind {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown helper `{0}`")]
    UnknownHelper(String),

    #[error("missing variable `{0}`")]
    MissingVariable(String),

    #[error("helper `{helper}`: {message}")]
    Helper { helper: String, message: String },

    #[error("`{0}` is not a list")]
    NotIterable(String),
}

/// A parsed template.
#[derive(Debug)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source`; `name` identifies the template in errors.
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let nodes = syntax::parse(source).map_err(|(line, kind)| TemplateError {
            name: name.to_string(),
            line,
            kind,
        })?;
        Ok(Template {
            name: name.to_string(),
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, context: &Value) -> Result<String, TemplateError> {
        render::render(&self.nodes, context).map_err(|(line, kind)| TemplateError {
            name: self.name.clone(),
            line,
            kind,
        })
    }
}

/// Parse and render in one step.
pub fn render(name: &str, source: &str, context: &Value) -> Result<String, TemplateError> {
    Template::parse(name, source)?.render(context)
}

#[cfg(test)]
mod tests;
