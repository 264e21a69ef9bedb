//! Node tree evaluation.

use serde_json::{json, Value};

use crate::helpers::{display, truthy};

use super::expr::Expr;
use super::syntax::Node;
use super::TemplateErrorKind;

type RenderError = (u32, TemplateErrorKind);

/// Variables bound by `each`, innermost last, over the root context.
struct Scope<'a> {
    root: &'a Value,
    frames: Vec<(String, Value)>,
}

impl Scope<'_> {
    fn lookup(&self, segments: &[String]) -> Result<Value, TemplateErrorKind> {
        let missing = || TemplateErrorKind::MissingVariable(segments.join("."));
        let (first, rest) = segments.split_first().ok_or_else(missing)?;
        let mut value = self
            .frames
            .iter()
            .rev()
            .find(|(name, _)| name == first)
            .map(|(_, value)| value)
            .or_else(|| self.root.get(first))
            .ok_or_else(missing)?;
        for segment in rest {
            value = match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
            .ok_or_else(missing)?;
        }
        Ok(value.clone())
    }

    fn eval(&self, expr: &Expr) -> Result<Value, TemplateErrorKind> {
        match expr {
            Expr::Lit(value) => Ok(value.clone()),
            Expr::Path(segments) => self.lookup(segments),
            Expr::Call { helper, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                helper.call(&args).map_err(|message| TemplateErrorKind::Helper {
                    helper: helper.name().to_string(),
                    message,
                })
            }
        }
    }
}

pub(crate) fn render(nodes: &[Node], root: &Value) -> Result<String, RenderError> {
    let mut scope = Scope {
        root,
        frames: Vec::new(),
    };
    let mut out = String::new();
    render_nodes(nodes, &mut scope, &mut out)?;
    Ok(out)
}

fn render_nodes(nodes: &[Node], scope: &mut Scope<'_>, out: &mut String) -> Result<(), RenderError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Interp { expr, line } => {
                let value = scope.eval(expr).map_err(|kind| (*line, kind))?;
                out.push_str(&display(&value));
            }
            Node::If {
                cond,
                then,
                otherwise,
                line,
            } => {
                let value = scope.eval(cond).map_err(|kind| (*line, kind))?;
                let branch = if truthy(&value) { then } else { otherwise };
                render_nodes(branch, scope, out)?;
            }
            Node::Each {
                items,
                binding,
                body,
                line,
            } => {
                let value = scope.eval(items).map_err(|kind| (*line, kind))?;
                let list = match value {
                    Value::Array(list) => list,
                    Value::Null => Vec::new(),
                    _ => {
                        return Err((*line, TemplateErrorKind::NotIterable(items.describe())));
                    }
                };
                let count = list.len();
                for (index, item) in list.into_iter().enumerate() {
                    scope.frames.push((binding.clone(), item));
                    scope.frames.push((
                        "loop".to_string(),
                        json!({
                            "index": index,
                            "first": index == 0,
                            "last": index + 1 == count,
                        }),
                    ));
                    let result = render_nodes(body, scope, out);
                    scope.frames.truncate(scope.frames.len() - 2);
                    result?;
                }
            }
        }
    }
    Ok(())
}
