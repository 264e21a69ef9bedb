use super::*;
use pretty_assertions::assert_eq;

use crate::extract;
use forge_parse::SourceFile;

fn run(items: &str) -> Vec<Diagnostic> {
    let text = format!("package p\n\nimport \"x/schema\"\n\nvar R = schema.Define(\"R\",\n{items}\n)\n");
    let file = SourceFile::new("r/schema.go", text);
    let out = extract(&file);
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    let mut sources = SourceMap::new();
    sources.insert(file);
    check_policy(&out.resources, &sources)
}

#[test]
fn test_length_limits_need_text() {
    let diags = run("\tschema.Int(\"Count\").MaxLen(3),\n\tschema.Email(\"Mail\").MaxLen(3),");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::ModifierNotApplicable);
    assert_eq!(diags[0].message, "`MaxLen` does not apply to Int field `Count`");
    assert_eq!(diags[0].underline.map(|u| u.len), Some(6));
}

#[test]
fn test_relationship_only_modifiers() {
    let diags = run("\tschema.UUID(\"OwnerID\").OnDelete(schema.Cascade).Eager(),");
    let codes: Vec<ErrorCode> = diags.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::ModifierNotApplicable, ErrorCode::ModifierNotApplicable]
    );
}

#[test]
fn test_default_kind() {
    let diags = run(
        "\tschema.Int(\"Stock\").Default(\"many\"),\n\tschema.Decimal(\"Price\").Default(3),\n\tschema.Bool(\"On\").Default(1),",
    );
    let messages: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "default for Int field `Stock` cannot be a string",
            "default for Bool field `On` cannot be a integer",
        ]
    );
}

#[test]
fn test_min_above_max() {
    let diags = run("\tschema.String(\"Code\").MinLen(5).MaxLen(2),");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::InvalidModifierValue);
}

#[test]
fn test_not_applicable_table() {
    assert!(not_applicable(ModifierKind::MaxLen, FieldType::Slug).is_none());
    assert!(not_applicable(ModifierKind::Searchable, FieldType::Bool).is_some());
    assert!(not_applicable(ModifierKind::Required, FieldType::Json).is_none());
    assert!(default_fits(FieldType::DateTime, &Literal::Constant("Now".into())));
    assert!(!default_fits(FieldType::Uuid, &Literal::Int(1)));
}
