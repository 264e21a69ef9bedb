//! Modifier applicability.
//!
//! The extractor records any known modifier on any field. This pass decides
//! which combinations make sense, so the rules can change without touching
//! extraction.

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::{Field, FieldType, Literal, ModifierKind, Resource};

use crate::SourceMap;

/// Why `kind` cannot be used on `ty`, if it cannot.
pub fn not_applicable(kind: ModifierKind, ty: FieldType) -> Option<&'static str> {
    match kind {
        ModifierKind::MaxLen | ModifierKind::MinLen if !ty.is_string_like() => {
            Some("length limits apply to String, Text, Slug, Email and URL fields")
        }
        ModifierKind::Searchable if !ty.is_string_like() => {
            Some("full-text search applies to String, Text, Slug, Email and URL fields")
        }
        ModifierKind::OnDelete | ModifierKind::Eager => {
            Some("this modifier applies to relationships such as schema.BelongsTo")
        }
        _ => None,
    }
}

/// Whether a `Default` literal fits the field type. Constants are opaque
/// and always accepted; enum defaults are checked against the value list
/// elsewhere.
pub fn default_fits(ty: FieldType, value: &Literal) -> bool {
    match (ty, value) {
        (_, Literal::Constant(_)) | (FieldType::Enum, _) => true,
        (FieldType::Int | FieldType::BigInt, Literal::Int(_))
        | (FieldType::Decimal, Literal::Int(_) | Literal::Float(_))
        | (FieldType::Bool, Literal::Bool(_)) => true,
        (
            FieldType::Uuid
            | FieldType::String
            | FieldType::Text
            | FieldType::DateTime
            | FieldType::Date
            | FieldType::Json
            | FieldType::Slug
            | FieldType::Email
            | FieldType::Url,
            Literal::String(_),
        ) => true,
        _ => false,
    }
}

pub fn check_policy(resources: &[Resource], sources: &SourceMap) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for resource in resources {
        for field in &resource.fields {
            check_field(resource, field, sources, &mut out);
        }
    }
    out
}

fn check_field(resource: &Resource, field: &Field, sources: &SourceMap, out: &mut Vec<Diagnostic>) {
    let at = |code, needle: &str| {
        sources.line_diagnostic(code, &resource.file, field.line, Some(needle))
    };

    for modifier in &field.modifiers {
        if let Some(hint) = not_applicable(modifier.kind, field.ty) {
            out.push(
                at(ErrorCode::ModifierNotApplicable, modifier.kind.as_str())
                    .with_message(format!(
                        "`{}` does not apply to {} field `{}`",
                        modifier.kind, field.ty, field.name
                    ))
                    .with_hint(hint),
            );
        }
    }

    if let Some(value) = field.modifier_value(ModifierKind::Default) {
        if !default_fits(field.ty, value) {
            out.push(
                at(ErrorCode::InvalidModifierValue, "Default").with_message(format!(
                    "default for {} field `{}` cannot be a {}",
                    field.ty,
                    field.name,
                    value.kind_name()
                )),
            );
        }
    }

    let min = field.modifier_value(ModifierKind::MinLen).and_then(Literal::as_int);
    let max = field.modifier_value(ModifierKind::MaxLen).and_then(Literal::as_int);
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            out.push(
                at(ErrorCode::InvalidModifierValue, "MinLen").with_message(format!(
                    "`{}` has MinLen({min}) greater than MaxLen({max})",
                    field.name
                )),
            );
        }
    }
}

#[cfg(test)]
mod tests;
