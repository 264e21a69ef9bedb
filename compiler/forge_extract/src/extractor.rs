//! Resource extraction from a parsed source file.
//!
//! Only one shape is recognised: a package-level value initialised with
//! `ns.Define("Name", item, item, ...)`. Each item is a constructor call or
//! a method chain over one. Chains are unwound from the outermost call down
//! to the constructor, then read back up so modifiers keep source order.
//!
//! Extraction never stops early. Problems become diagnostics and the
//! offending item is left out, so one run reports everything.

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::{
    Field, FieldType, JobRef, Literal, Modifier, ModifierKind, OnDeleteAction, Operation,
    Relationship, RelationshipKind, Resource, Span,
};
use forge_parse::{Element, Expr, ExprKind, File, Ident, ImportSpec, SourceFile};

use crate::literal::{check_args, classify, dynamic_value, Arg};

/// Namespace used when no import ends in `/schema`.
pub const DEFAULT_NAMESPACE: &str = "schema";

const DEFAULT_QUEUE: &str = "default";

/// Result of extracting one file.
#[derive(Debug, Default)]
pub struct Extraction {
    pub resources: Vec<Resource>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract every resource defined in `file`.
///
/// A file that fails to parse yields a single `syntax_error` diagnostic.
pub fn extract(file: &SourceFile) -> Extraction {
    let ast = match file.parse() {
        Ok(ast) => ast,
        Err(err) => {
            return Extraction {
                resources: Vec::new(),
                diagnostics: vec![err.to_diagnostic(file)],
            }
        }
    };

    let mut extractor = Extractor {
        file,
        ns: dsl_namespace(&ast),
        diagnostics: Vec::new(),
    };
    let mut resources = Vec::new();
    for decl in &ast.decls {
        for spec in &decl.specs {
            for value in &spec.values {
                if let Some(resource) = extractor.define(value) {
                    resources.push(resource);
                }
            }
        }
    }

    tracing::debug!(
        file = %file.path().display(),
        resources = resources.len(),
        diagnostics = extractor.diagnostics.len(),
        "extracted resources"
    );
    Extraction {
        resources,
        diagnostics: extractor.diagnostics,
    }
}

/// Local name of the DSL package: the import whose last path segment is
/// `schema`, under its alias if it has one.
pub fn dsl_namespace(ast: &File) -> String {
    ast.imports
        .iter()
        .find(|spec| spec.path.rsplit('/').next() == Some("schema"))
        .map_or_else(|| DEFAULT_NAMESPACE.to_string(), ImportSpec::local_name)
}

/// `Required`, `Optional`, ... in field position.
fn is_flag(kind: ModifierKind) -> bool {
    matches!(
        kind,
        ModifierKind::Required
            | ModifierKind::Optional
            | ModifierKind::PrimaryKey
            | ModifierKind::Sortable
            | ModifierKind::Filterable
            | ModifierKind::Searchable
            | ModifierKind::Unique
            | ModifierKind::Index
            | ModifierKind::Immutable
            | ModifierKind::Eager
    )
}

/// PascalCase identifier: an ASCII uppercase letter, then letters and digits.
pub fn is_pascal_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// A constructor call with its chained method calls, innermost first.
struct Chain<'a> {
    ctor: &'a Ident,
    args: &'a [Expr],
    links: Vec<Link<'a>>,
}

struct Link<'a> {
    method: &'a Ident,
    args: &'a [Expr],
}

struct Extractor<'a> {
    file: &'a SourceFile,
    ns: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Extractor<'a> {
    fn report(&mut self, code: ErrorCode, span: Span, message: String, hint: Option<&str>) {
        let diag = self.file.diagnostic(code, span).with_message(message);
        self.diagnostics.push(match hint {
            Some(hint) => diag.with_hint(hint),
            None => diag,
        });
    }

    fn define(&mut self, expr: &'a Expr) -> Option<Resource> {
        let ExprKind::Call { func, args, .. } = &expr.unparen().kind else {
            return None;
        };
        match func.as_qualified() {
            Some((pkg, sel)) if pkg == self.ns && sel.name == "Define" => {}
            _ => return None,
        }

        let name = self.resource_name(expr.span, args);
        let line = self.file.line(expr.span);
        let mut resource = Resource::new(
            name.clone().unwrap_or_default(),
            self.file.path(),
            line,
        );
        for item in args.iter().skip(1) {
            self.item(&mut resource, item);
        }

        let name = name?;
        tracing::trace!(
            resource = %name,
            fields = resource.fields.len(),
            relationships = resource.relationships.len(),
            "extracted resource"
        );
        Some(resource)
    }

    fn resource_name(&mut self, call: Span, args: &[Expr]) -> Option<String> {
        let Some(arg) = args.first() else {
            self.report(
                ErrorCode::MissingResourceName,
                call,
                "`Define` needs a resource name".to_string(),
                Some("pass the name first: Define(\"Product\", ...)"),
            );
            return None;
        };
        match classify(arg, &self.ns) {
            Some(Arg::Lit(Literal::String(name))) if !name.is_empty() => Some(name),
            None => {
                self.diagnostics.push(dynamic_value(arg, self.file));
                None
            }
            Some(other) => {
                self.report(
                    ErrorCode::MissingResourceName,
                    arg.span,
                    format!(
                        "resource name must be a non-empty string literal, found {}",
                        other.describe()
                    ),
                    Some("pass the name first: Define(\"Product\", ...)"),
                );
                None
            }
        }
    }

    /// Unwind `ns.Ctor(..).Mod(..).Mod(..)` into its constructor and links.
    fn unwind(&self, expr: &'a Expr) -> Option<Chain<'a>> {
        let ExprKind::Call { func, args, .. } = &expr.unparen().kind else {
            return None;
        };
        let ExprKind::Selector(base, sel) = &func.unparen().kind else {
            return None;
        };
        match &base.unparen().kind {
            ExprKind::Ident(pkg) if *pkg == self.ns => Some(Chain {
                ctor: sel,
                args,
                links: Vec::new(),
            }),
            ExprKind::Call { .. } => {
                let mut chain = self.unwind(base)?;
                chain.links.push(Link { method: sel, args });
                Some(chain)
            }
            _ => None,
        }
    }

    fn item(&mut self, resource: &mut Resource, expr: &'a Expr) {
        let Some(chain) = self.unwind(expr) else {
            match classify(expr, &self.ns) {
                None => self.diagnostics.push(dynamic_value(expr, self.file)),
                Some(arg) => self.report(
                    ErrorCode::UnsupportedType,
                    expr.span,
                    format!(
                        "expected a field, relationship or option, found {}",
                        arg.describe()
                    ),
                    Some("items of Define are calls such as schema.String(\"Title\")"),
                ),
            }
            return;
        };

        // Every argument position is checked before anything is recorded.
        let before = self.diagnostics.len();
        check_args(chain.args, &self.ns, self.file, &mut self.diagnostics);
        for link in &chain.links {
            check_args(link.args, &self.ns, self.file, &mut self.diagnostics);
        }
        if self.diagnostics.len() > before {
            return;
        }

        let line = self.file.line(expr.span);
        let ctor = chain.ctor.name.as_str();
        if let Some(ty) = FieldType::from_constructor(ctor) {
            if let Some(field) = self.field(ty, &chain, line) {
                resource.fields.push(field);
            }
        } else if let Some(kind) = RelationshipKind::from_constructor(ctor) {
            if let Some(relationship) = self.relationship(kind, &chain, line) {
                resource.relationships.push(relationship);
            }
        } else {
            self.option(resource, &chain);
        }
    }

    fn option(&mut self, resource: &mut Resource, chain: &Chain<'a>) {
        let flag = match chain.ctor.name.as_str() {
            "SoftDelete" => &mut resource.options.soft_delete,
            "Auditable" => &mut resource.options.auditable,
            "TenantScoped" => &mut resource.options.tenant_scoped,
            "Searchable" => &mut resource.options.searchable,
            "Timestamps" => &mut resource.has_timestamps,
            "Permission" => return self.permission(resource, chain),
            "WithHooks" => return self.hooks(resource, chain),
            other => {
                let message = format!("`{}.{other}` is not a field type or resource option", self.ns);
                return self.report(
                    ErrorCode::UnsupportedType,
                    chain.ctor.span,
                    message,
                    Some(
                        "field types are UUID, String, Text, Int, BigInt, Decimal, Bool,\n\
                         DateTime, Date, Enum, JSON, Slug, Email and URL",
                    ),
                );
            }
        };
        *flag = true;
        if let Some(extra) = chain.args.first() {
            let message = format!("`{}` takes no arguments", chain.ctor.name);
            self.report(ErrorCode::MissingArgument, extra.span, message, None);
        }
    }

    // Fields

    fn field(&mut self, ty: FieldType, chain: &Chain<'a>, line: u32) -> Option<Field> {
        let name = self.field_name(chain)?;

        let mut enum_values = Vec::new();
        if ty == FieldType::Enum {
            enum_values = self.enum_values(&name, chain)?;
        } else if let Some(extra) = chain.args.get(1) {
            let message = format!(
                "`{}` takes 1 argument, found {}",
                chain.ctor.name,
                chain.args.len()
            );
            self.report(ErrorCode::MissingArgument, extra.span, message, None);
            return None;
        }

        let mut modifiers = Vec::new();
        for link in &chain.links {
            let Some(kind) = ModifierKind::from_method(&link.method.name) else {
                tracing::trace!(field = %name, method = %link.method.name, "ignoring unknown modifier");
                continue;
            };
            if let Some(modifier) = self.modifier(kind, link) {
                modifiers.push(modifier);
            }
        }

        Some(Field {
            name,
            ty,
            modifiers,
            enum_values,
            line,
        })
    }

    fn field_name(&mut self, chain: &Chain<'a>) -> Option<String> {
        let Some(arg) = chain.args.first() else {
            let message = format!("`{}` needs a field name", chain.ctor.name);
            self.report(
                ErrorCode::MissingArgument,
                chain.ctor.span,
                message,
                Some("pass the field name first, e.g. schema.String(\"Title\")"),
            );
            return None;
        };
        self.pascal_name(arg, "field name")
    }

    /// A string literal holding a PascalCase identifier.
    fn pascal_name(&mut self, arg: &Expr, what: &str) -> Option<String> {
        let hint = "names start with an uppercase letter and contain only letters and digits";
        match classify(arg, &self.ns) {
            Some(Arg::Lit(Literal::String(name))) if is_pascal_identifier(&name) => Some(name),
            Some(Arg::Lit(Literal::String(name))) => {
                let message = format!("`{name}` is not a PascalCase identifier");
                self.report(ErrorCode::InvalidFieldName, arg.span, message, Some(hint));
                None
            }
            other => {
                let found = other.as_ref().map_or("expression", Arg::describe);
                let message = format!("{what} must be a string literal, found {found}");
                self.report(ErrorCode::InvalidFieldName, arg.span, message, Some(hint));
                None
            }
        }
    }

    fn enum_values(&mut self, name: &str, chain: &Chain<'a>) -> Option<Vec<String>> {
        let rest = chain.args.get(1..).unwrap_or_default();
        if rest.is_empty() {
            self.report(
                ErrorCode::InvalidEnum,
                chain.ctor.span,
                format!("enum `{name}` declares no values"),
                Some("list the values after the name: schema.Enum(\"Status\", \"draft\", \"live\")"),
            );
            return None;
        }

        let mut values: Vec<String> = Vec::with_capacity(rest.len());
        for arg in rest {
            match classify(arg, &self.ns) {
                Some(Arg::Lit(Literal::String(value))) => {
                    if values.contains(&value) {
                        let message = format!("enum `{name}` lists `{value}` twice");
                        self.report(ErrorCode::InvalidEnum, arg.span, message, None);
                        return None;
                    }
                    values.push(value);
                }
                other => {
                    let found = other.as_ref().map_or("expression", Arg::describe);
                    let message = format!("enum values must be string literals, found {found}");
                    self.report(ErrorCode::InvalidEnum, arg.span, message, None);
                    return None;
                }
            }
        }
        Some(values)
    }

    fn modifier(&mut self, kind: ModifierKind, link: &Link<'a>) -> Option<Modifier> {
        if is_flag(kind) {
            if let Some(extra) = link.args.first() {
                let message = format!("`{kind}` takes no argument");
                self.report(ErrorCode::InvalidModifierValue, extra.span, message, None);
                return None;
            }
            return Some(Modifier::flag(kind));
        }

        let arg = self.single_arg(link)?;
        let value = classify(arg, &self.ns);
        let literal = match (kind, value) {
            (ModifierKind::MaxLen, Some(Arg::Lit(Literal::Int(n)))) if n >= 1 => Literal::Int(n),
            (ModifierKind::MinLen, Some(Arg::Lit(Literal::Int(n)))) if n >= 0 => Literal::Int(n),
            (ModifierKind::Default, Some(Arg::Lit(lit))) => lit,
            (ModifierKind::Default, Some(Arg::Constant(name))) => Literal::Constant(name.into()),
            (
                ModifierKind::Label | ModifierKind::Placeholder | ModifierKind::Help,
                Some(Arg::Lit(lit @ Literal::String(_))),
            ) => lit,
            (ModifierKind::OnDelete, Some(Arg::Constant(name)))
                if OnDeleteAction::from_constant(name).is_some() =>
            {
                Literal::Constant(name.into())
            }
            (
                ModifierKind::Visibility | ModifierKind::Mutability,
                Some(Arg::Lit(lit @ Literal::String(_))),
            ) => lit,
            (ModifierKind::Visibility | ModifierKind::Mutability, Some(Arg::Constant(name))) => {
                Literal::Constant(name.into())
            }
            (kind, value) => {
                let found = match &value {
                    Some(Arg::Constant(name)) => format!("`{}.{name}`", self.ns),
                    Some(other) => other.describe().to_string(),
                    None => "expression".to_string(),
                };
                let message = format!("`{kind}` expects {}, found {found}", expected_value(kind));
                let hint = on_delete_hint(kind, &self.ns);
                self.report(
                    ErrorCode::InvalidModifierValue,
                    arg.span,
                    message,
                    hint.as_deref(),
                );
                return None;
            }
        };
        Some(Modifier::with_value(kind, literal))
    }

    fn single_arg(&mut self, link: &Link<'a>) -> Option<&'a Expr> {
        match link.args {
            [arg] => Some(arg),
            [] => {
                let message = format!("`{}` needs an argument", link.method.name);
                self.report(ErrorCode::MissingArgument, link.method.span, message, None);
                None
            }
            [_, extra, ..] => {
                let message = format!(
                    "`{}` takes 1 argument, found {}",
                    link.method.name,
                    link.args.len()
                );
                self.report(ErrorCode::MissingArgument, extra.span, message, None);
                None
            }
        }
    }

    // Relationships

    fn relationship(
        &mut self,
        kind: RelationshipKind,
        chain: &Chain<'a>,
        line: u32,
    ) -> Option<Relationship> {
        let [name_arg, table_arg] = chain.args else {
            let message = format!(
                "`{}` takes a name and a table, found {} argument(s)",
                chain.ctor.name,
                chain.args.len()
            );
            let hint = format!("{}.{}(\"Category\", \"categories\")", self.ns, chain.ctor.name);
            self.report(ErrorCode::MissingArgument, chain.ctor.span, message, Some(hint.as_str()));
            return None;
        };

        let name = self.pascal_name(name_arg, "relationship name")?;
        let table = match classify(table_arg, &self.ns) {
            Some(Arg::Lit(Literal::String(table))) if !table.is_empty() => table,
            _ => {
                let message = format!("`{}` needs the referenced table as a string literal", chain.ctor.name);
                self.report(ErrorCode::MissingArgument, table_arg.span, message, None);
                return None;
            }
        };

        let mut relationship = Relationship {
            name,
            kind,
            table,
            on_delete: OnDeleteAction::default(),
            optional: false,
            eager: false,
            line,
        };
        for link in &chain.links {
            match ModifierKind::from_method(&link.method.name) {
                Some(ModifierKind::Optional) => relationship.optional = true,
                Some(ModifierKind::Eager) => relationship.eager = true,
                Some(ModifierKind::OnDelete) => {
                    let Some(Modifier {
                        value: Some(Literal::Constant(action)),
                        ..
                    }) = self.modifier(ModifierKind::OnDelete, link)
                    else {
                        continue;
                    };
                    relationship.on_delete =
                        OnDeleteAction::from_constant(&action).unwrap_or_default();
                }
                _ => {
                    tracing::trace!(
                        relationship = %relationship.name,
                        method = %link.method.name,
                        "ignoring modifier on relationship"
                    );
                }
            }
        }
        Some(relationship)
    }

    // Permissions and hooks

    fn permission(&mut self, resource: &mut Resource, chain: &Chain<'a>) {
        let hint = "operations are list, read, create, update and delete";
        let Some((op_arg, roles)) = chain.args.split_first() else {
            self.report(
                ErrorCode::MissingArgument,
                chain.ctor.span,
                "`Permission` needs an operation and at least one role".to_string(),
                Some("schema.Permission(\"delete\", \"admin\")"),
            );
            return;
        };
        let op = match classify(op_arg, &self.ns) {
            Some(Arg::Lit(Literal::String(name))) => match Operation::parse(&name) {
                Some(op) => op,
                None => {
                    let message = format!("unknown operation `{name}`");
                    self.report(ErrorCode::InvalidPermission, op_arg.span, message, Some(hint));
                    return;
                }
            },
            _ => {
                self.report(
                    ErrorCode::InvalidPermission,
                    op_arg.span,
                    "the operation must be a string literal".to_string(),
                    Some(hint),
                );
                return;
            }
        };
        if roles.is_empty() {
            self.report(
                ErrorCode::MissingArgument,
                chain.ctor.span,
                format!("`Permission` for `{}` names no roles", op.as_str()),
                Some("schema.Permission(\"delete\", \"admin\")"),
            );
            return;
        }

        let mut names = Vec::with_capacity(roles.len());
        for role in roles {
            match classify(role, &self.ns) {
                Some(Arg::Lit(Literal::String(name))) if !name.is_empty() => names.push(name),
                _ => {
                    self.report(
                        ErrorCode::InvalidPermission,
                        role.span,
                        "roles must be non-empty string literals".to_string(),
                        None,
                    );
                    return;
                }
            }
        }
        resource
            .options
            .permissions
            .entry(op)
            .or_default()
            .extend(names);
    }

    fn hooks(&mut self, resource: &mut Resource, chain: &Chain<'a>) {
        let example = "schema.WithHooks(schema.Hooks{AfterCreate: []schema.JobRef{{Kind: \"k\", Queue: \"q\"}}})";
        let [arg] = chain.args else {
            self.report(
                ErrorCode::MissingArgument,
                chain.ctor.span,
                "`WithHooks` takes a single Hooks literal".to_string(),
                Some(example),
            );
            return;
        };
        let ExprKind::Composite { ty, elements } = &arg.unparen().kind else {
            self.report(
                ErrorCode::InvalidModifierValue,
                arg.span,
                "`WithHooks` expects a Hooks composite literal".to_string(),
                Some(example),
            );
            return;
        };
        if let Some(ty) = ty {
            if !self.is_dsl_type(ty, "Hooks") {
                let message = format!("expected `{}.Hooks`, found `{}`", self.ns, self.file.snippet(ty.span));
                self.report(ErrorCode::InvalidModifierValue, ty.span, message, None);
                return;
            }
        }

        for element in elements {
            let key = element.key.as_ref().and_then(Expr::as_ident);
            let slot = match key {
                Some("AfterCreate") => &mut resource.options.hooks.after_create,
                Some("AfterUpdate") => &mut resource.options.hooks.after_update,
                _ => {
                    let span = element.key.as_ref().map_or(element.value.span, |k| k.span);
                    let message = format!("unknown hook `{}`", self.file.snippet(span));
                    self.report(
                        ErrorCode::InvalidModifierValue,
                        span,
                        message,
                        Some("hooks are AfterCreate and AfterUpdate"),
                    );
                    continue;
                }
            };
            let Some(jobs) = self.job_list(&element.value) else {
                continue;
            };
            slot.extend(jobs);
        }
    }

    fn job_list(&mut self, expr: &Expr) -> Option<Vec<JobRef>> {
        if matches!(&expr.unparen().kind, ExprKind::Ident(name) if name == "nil") {
            return Some(Vec::new());
        }
        let ExprKind::Composite { elements, .. } = &expr.unparen().kind else {
            self.report(
                ErrorCode::InvalidModifierValue,
                expr.span,
                "hook jobs must be a []JobRef literal".to_string(),
                None,
            );
            return None;
        };
        let mut jobs = Vec::with_capacity(elements.len());
        for element in elements {
            jobs.push(self.job_ref(&element.value)?);
        }
        Some(jobs)
    }

    /// `{Kind: "k", Queue: "q"}`, `{"k", "q"}` or `ns.JobRef{...}`.
    fn job_ref(&mut self, expr: &Expr) -> Option<JobRef> {
        let ExprKind::Composite { elements, .. } = &expr.unparen().kind else {
            self.report(
                ErrorCode::InvalidModifierValue,
                expr.span,
                "expected a JobRef literal".to_string(),
                None,
            );
            return None;
        };

        let mut kind = None;
        let mut queue = None;
        for (position, Element { key, value }) in elements.iter().enumerate() {
            let slot = match (key.as_ref().and_then(Expr::as_ident), position) {
                (Some("Kind"), _) | (None, 0) => &mut kind,
                (Some("Queue"), _) | (None, 1) => &mut queue,
                _ => {
                    let span = key.as_ref().map_or(value.span, |k| k.span);
                    let message = format!("unexpected JobRef field `{}`", self.file.snippet(span));
                    self.report(ErrorCode::InvalidModifierValue, span, message, None);
                    return None;
                }
            };
            match classify(value, &self.ns) {
                Some(Arg::Lit(Literal::String(text))) => *slot = Some(text),
                _ => {
                    self.report(
                        ErrorCode::InvalidModifierValue,
                        value.span,
                        "JobRef fields must be string literals".to_string(),
                        None,
                    );
                    return None;
                }
            }
        }

        let Some(kind) = kind.filter(|k| !k.is_empty()) else {
            self.report(
                ErrorCode::MissingArgument,
                expr.span,
                "job reference needs a Kind".to_string(),
                None,
            );
            return None;
        };
        Some(JobRef {
            kind,
            queue: queue
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| DEFAULT_QUEUE.to_string()),
        })
    }

    fn is_dsl_type(&self, ty: &Expr, name: &str) -> bool {
        ty.as_qualified()
            .is_some_and(|(pkg, sel)| pkg == self.ns && sel.name == name)
    }
}

fn expected_value(kind: ModifierKind) -> &'static str {
    match kind {
        ModifierKind::MaxLen => "a positive integer",
        ModifierKind::MinLen => "a non-negative integer",
        ModifierKind::Default => "a literal",
        ModifierKind::OnDelete => "an on-delete constant",
        ModifierKind::Visibility | ModifierKind::Mutability => "a string or constant",
        _ => "a string literal",
    }
}

fn on_delete_hint(kind: ModifierKind, ns: &str) -> Option<String> {
    (kind == ModifierKind::OnDelete).then(|| {
        format!("use {ns}.Cascade, {ns}.SetNull, {ns}.Restrict or {ns}.NoAction")
    })
}
