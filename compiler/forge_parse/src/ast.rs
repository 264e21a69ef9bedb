//! Syntax tree for the host-language subset.
//!
//! Only package-level `var`/`const` declarations are kept; functions and
//! type declarations are recognised and skipped. Every node keeps its byte
//! span so callers can point diagnostics at the exact token.

use forge_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

impl File {
    /// Local name under which `path` is imported, if it is.
    pub fn import_name(&self, path: &str) -> Option<String> {
        self.imports
            .iter()
            .find(|spec| spec.path == path)
            .map(ImportSpec::local_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit alias, including `_` and `.`.
    pub alias: Option<Ident>,
    /// Unquoted import path.
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// The name the package is referred to by in this file.
    pub fn local_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.name.clone(),
            None => default_package_name(&self.path),
        }
    }
}

/// Package name implied by an import path: the last segment, skipping a
/// trailing major-version segment (`/v5`) and stripping `go-` prefixes and
/// `.vN` suffixes.
pub fn default_package_name(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }
    let last = last.split('.').next().unwrap_or(last);
    let last = last.strip_prefix("go-").unwrap_or(last);
    last.rsplit('-').next().unwrap_or(last).to_string()
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Const,
}

/// A `var` or `const` declaration, possibly grouped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    pub specs: Vec<ValueSpec>,
    pub span: Span,
}

/// `a, b T = x, y`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

/// Element of a composite literal, `key: value` or just `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub key: Option<Expr>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Ident(String),
    /// Basic literal with its raw source text.
    Lit(LitKind, String),
    /// `x.Sel`
    Selector(Box<Expr>, Ident),
    /// `f(args...)`
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    /// `x[i]`, `x[K, V]`
    Index(Box<Expr>, Vec<Expr>),
    /// `x[lo:hi]`
    Slice {
        base: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
    },
    /// `x.(T)`
    TypeAssert(Box<Expr>, Box<Expr>),
    /// `T{...}`; the type is absent for elided inner literals.
    Composite {
        ty: Option<Box<Expr>>,
        elements: Vec<Element>,
    },
    /// `[]T` or `[N]T`
    ArrayType {
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    /// `map[K]V`
    MapType(Box<Expr>, Box<Expr>),
    /// `*T` in type position.
    Pointer(Box<Expr>),
    Unary(String, Box<Expr>),
    Binary(String, Box<Expr>, Box<Expr>),
    Paren(Box<Expr>),
    /// Constructs that are skipped wholesale: function literals, struct,
    /// interface, func and chan types.
    Opaque,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// `pkg.Name` where `pkg` is a bare identifier.
    pub fn as_qualified(&self) -> Option<(&str, &Ident)> {
        match &self.kind {
            ExprKind::Selector(base, sel) => base.as_ident().map(|pkg| (pkg, sel)),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        match &self.kind {
            ExprKind::Paren(inner) => inner.unparen(),
            _ => self,
        }
    }
}
