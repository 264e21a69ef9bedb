//! Schema checks over extracted resources.
//!
//! These run after every file has been extracted, so they can see the whole
//! resource set: duplicate names across files, duplicate fields, enum
//! defaults and primary key rules.

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::{FieldType, Literal, ModifierKind, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::SourceMap;

pub fn validate(resources: &[Resource], sources: &SourceMap) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut seen: FxHashMap<&str, &Resource> = FxHashMap::default();

    for resource in resources {
        if let Some(first) = seen.get(resource.name.as_str()) {
            let needle = format!("\"{}\"", resource.name);
            out.push(
                sources
                    .line_diagnostic(
                        ErrorCode::DuplicateResource,
                        &resource.file,
                        resource.line,
                        Some(&needle),
                    )
                    .with_message(format!("resource `{}` is defined more than once", resource.name))
                    .with_hint(format!(
                        "first defined at {}:{}",
                        first.file.display(),
                        first.line
                    )),
            );
        } else {
            seen.insert(&resource.name, resource);
        }

        duplicate_fields(resource, sources, &mut out);
        enum_defaults(resource, sources, &mut out);
        primary_key(resource, sources, &mut out);
    }
    out
}

fn duplicate_fields(resource: &Resource, sources: &SourceMap, out: &mut Vec<Diagnostic>) {
    let mut names: FxHashSet<&str> = FxHashSet::default();
    for field in &resource.fields {
        if names.insert(&field.name) {
            continue;
        }
        let needle = format!("\"{}\"", field.name);
        out.push(
            sources
                .line_diagnostic(
                    ErrorCode::DuplicateField,
                    &resource.file,
                    field.line,
                    Some(&needle),
                )
                .with_message(format!(
                    "field `{}` is declared more than once in `{}`",
                    field.name, resource.name
                )),
        );
    }
}

fn enum_defaults(resource: &Resource, sources: &SourceMap, out: &mut Vec<Diagnostic>) {
    for field in resource.fields.iter().filter(|f| f.ty == FieldType::Enum) {
        let Some(default) = field.modifier_value(ModifierKind::Default) else {
            continue;
        };
        let valid = matches!(default, Literal::String(value) if field.enum_values.contains(value));
        if valid {
            continue;
        }
        out.push(
            sources
                .line_diagnostic(
                    ErrorCode::EnumDefaultInvalid,
                    &resource.file,
                    field.line,
                    Some("Default"),
                )
                .with_message(format!(
                    "default {default} is not one of the values of `{}`",
                    field.name
                ))
                .with_hint(format!("allowed values: {}", field.enum_values.join(", "))),
        );
    }
}

/// A resource needs at most one `PrimaryKey()` field, and an `ID` field is
/// only taken as the key when it is a UUID.
fn primary_key(resource: &Resource, sources: &SourceMap, out: &mut Vec<Diagnostic>) {
    let marked: Vec<_> = resource
        .fields
        .iter()
        .filter(|f| f.has_modifier(ModifierKind::PrimaryKey))
        .collect();

    if let [_, second, ..] = marked.as_slice() {
        out.push(
            sources
                .line_diagnostic(
                    ErrorCode::MissingPrimaryKey,
                    &resource.file,
                    second.line,
                    Some("PrimaryKey"),
                )
                .with_message(format!(
                    "`{}` marks more than one primary key",
                    resource.name
                ))
                .with_hint("composite keys are not supported; keep PrimaryKey() on one field"),
        );
        return;
    }

    if !marked.is_empty() {
        return;
    }
    if let Some(id) = resource.field("ID").filter(|f| f.ty != FieldType::Uuid) {
        out.push(
            sources
                .line_diagnostic(
                    ErrorCode::MissingPrimaryKey,
                    &resource.file,
                    id.line,
                    Some("\"ID\""),
                )
                .with_message(format!(
                    "`{}` has an `ID` field of type {} and no field marked PrimaryKey()",
                    resource.name, id.ty
                ))
                .with_hint("declare ID as schema.UUID(\"ID\") or add .PrimaryKey() to it"),
        );
    }
}
