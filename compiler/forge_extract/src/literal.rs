//! The literal rule.
//!
//! Every argument of a recognised DSL call must be something the compiler
//! can read without running user code: a basic literal, `true`/`false`/
//! `nil`, a constant qualified by the DSL namespace, or another DSL call.
//! Composite literals are allowed when every element obeys the same rule.

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::Literal;
use forge_parse::{parse_float, parse_int, unquote, Expr, ExprKind, LitKind, SourceFile};

/// A checked argument.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Arg<'a> {
    Lit(Literal),
    Nil,
    /// `ns.Name`, holding `Name`.
    Constant(&'a str),
    /// A call rooted in the DSL namespace.
    Call,
    Composite,
}

impl Arg<'_> {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Arg::Lit(lit) => lit.kind_name(),
            Arg::Nil => "nil",
            Arg::Constant(_) => "constant",
            Arg::Call => "call",
            Arg::Composite => "composite literal",
        }
    }
}

/// Classify `expr`, or `None` when it breaks the literal rule.
pub(crate) fn classify<'a>(expr: &'a Expr, ns: &str) -> Option<Arg<'a>> {
    let expr = expr.unparen();
    match &expr.kind {
        ExprKind::Lit(kind, raw) => basic_literal(*kind, raw).map(Arg::Lit),
        ExprKind::Ident(name) => match name.as_str() {
            "true" => Some(Arg::Lit(Literal::Bool(true))),
            "false" => Some(Arg::Lit(Literal::Bool(false))),
            "nil" => Some(Arg::Nil),
            _ => None,
        },
        ExprKind::Unary(op, inner) if op == "-" => match &inner.unparen().kind {
            ExprKind::Lit(kind @ (LitKind::Int | LitKind::Float), raw) => {
                match basic_literal(*kind, raw)? {
                    Literal::Int(v) => Some(Arg::Lit(Literal::Int(v.checked_neg()?))),
                    Literal::Float(v) => Some(Arg::Lit(Literal::Float(-v))),
                    _ => None,
                }
            }
            _ => None,
        },
        ExprKind::Selector(..) => match expr.as_qualified() {
            Some((pkg, sel)) if pkg == ns => Some(Arg::Constant(&sel.name)),
            _ => None,
        },
        ExprKind::Call { func, .. } if is_dsl_rooted(func, ns) => Some(Arg::Call),
        ExprKind::Composite { .. } => Some(Arg::Composite),
        _ => None,
    }
}

fn basic_literal(kind: LitKind, raw: &str) -> Option<Literal> {
    match kind {
        LitKind::String => unquote(raw).map(Literal::String),
        LitKind::Int => parse_int(raw).map(Literal::Int),
        LitKind::Float => parse_float(raw).map(Literal::Float),
        LitKind::Char => {
            let body = raw.strip_prefix('\'')?.strip_suffix('\'')?;
            unquote(&format!("\"{body}\"")).map(Literal::String)
        }
        LitKind::Imag => None,
    }
}

/// `ns.Ctor(...)` or a method chain whose innermost call is one.
fn is_dsl_rooted(func: &Expr, ns: &str) -> bool {
    match &func.unparen().kind {
        ExprKind::Selector(base, _) => match &base.unparen().kind {
            ExprKind::Ident(name) => name == ns,
            ExprKind::Call { func, .. } => is_dsl_rooted(func, ns),
            _ => false,
        },
        _ => false,
    }
}

/// Report every argument in `args` that breaks the literal rule, descending
/// into composite literals and nested DSL calls.
pub(crate) fn check_args(
    args: &[Expr],
    ns: &str,
    file: &SourceFile,
    out: &mut Vec<Diagnostic>,
) {
    for arg in args {
        check_value(arg, ns, file, out);
    }
}

fn check_value(expr: &Expr, ns: &str, file: &SourceFile, out: &mut Vec<Diagnostic>) {
    match classify(expr, ns) {
        Some(Arg::Composite) => {
            if let ExprKind::Composite { elements, .. } = &expr.unparen().kind {
                for element in elements {
                    check_value(&element.value, ns, file, out);
                }
            }
        }
        Some(Arg::Call) => check_call(expr, ns, file, out),
        Some(_) => {}
        None => out.push(dynamic_value(expr, file)),
    }
}

/// Check the arguments of every link of a nested `ns.Ctor(..).Mod(..)`.
fn check_call(expr: &Expr, ns: &str, file: &SourceFile, out: &mut Vec<Diagnostic>) {
    let ExprKind::Call { func, args, .. } = &expr.unparen().kind else {
        return;
    };
    if let ExprKind::Selector(base, _) = &func.unparen().kind {
        check_call(base, ns, file, out);
    }
    check_args(args, ns, file, out);
}

/// The `dynamic_value` diagnostic for a non-literal argument.
pub(crate) fn dynamic_value(expr: &Expr, file: &SourceFile) -> Diagnostic {
    let text = file.snippet(expr.span);
    let shown = if text.contains('\n') {
        text.lines().next().unwrap_or(text)
    } else {
        text
    };
    file.diagnostic(ErrorCode::DynamicValue, expr.span)
        .with_message(format!("`{shown}` is not a literal value"))
        .with_hint(
            "resource definitions are read without running them\n\
             replace it with a literal such as \"text\", 42, 1.5 or true",
        )
}
