use forge_diagnostic::{ErrorCode, StyleTable};
use forgec::commands::generate;
use forgec::CliError;
use pretty_assertions::assert_eq;

use crate::common::Fixture;

const DYNAMIC: &str = r#"package product

import "github.com/acme/forge/schema"

var maxLen = 200

var Product = schema.Define("Product",
	schema.String("Title").MaxLen(maxLen),
)
"#;

const TWO_DYNAMIC: &str = r#"package product

import "github.com/acme/forge/schema"

var Product = schema.Define("Product",
	schema.String("Title").MaxLen(limit).Label(title),
)
"#;

fn diagnostics(fixture: &Fixture) -> forge_diagnostic::DiagnosticSet {
    match generate(&fixture.project()) {
        Err(CliError::Diagnostics(set)) => set,
        other => panic!("expected diagnostics, got {other:?}"),
    }
}

#[test]
fn dynamic_value_is_rejected() {
    let fixture = Fixture::new().with_resource("product", DYNAMIC);
    let set = diagnostics(&fixture);
    assert_eq!(set.len(), 1);
    let diag = &set.as_slice()[0];
    assert_eq!(diag.code, ErrorCode::DynamicValue);
    assert_eq!(diag.line, Some(8));

    let text = set.render(&StyleTable::default());
    assert!(text.contains("error[dynamic_value]:"), "{text}");
    assert!(text.contains("schema.go:8:"), "{text}");
    assert!(text.contains("\tschema.String(\"Title\").MaxLen(maxLen),"), "{text}");
    assert!(text.contains("^^^^^^"), "{text}");
    assert!(text.contains("literal"), "{text}");
    assert!(!fixture.path("gen").exists());
}

#[test]
fn every_dynamic_argument_is_reported() {
    let fixture = Fixture::new().with_resource("product", TWO_DYNAMIC);
    let set = diagnostics(&fixture);
    let codes: Vec<_> = set.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::DynamicValue, ErrorCode::DynamicValue]);
    let columns: Vec<_> = set.iter().map(|d| d.column).collect();
    assert!(columns[0] < columns[1]);
}

#[test]
fn errors_across_resources_are_collected() {
    let fixture = Fixture::new()
        .with_resource("product", DYNAMIC)
        .with_resource("tag", TWO_DYNAMIC.replace("Product", "Tag").as_str());
    assert_eq!(diagnostics(&fixture).len(), 3);
}

#[test]
fn broken_schema_keeps_previous_output() {
    let fixture = Fixture::shop();
    generate(&fixture.project()).unwrap();
    fixture.write("resources/product/schema.go", DYNAMIC);
    let _ = diagnostics(&fixture);
    assert!(fixture.path("gen/models/product.go").is_file());
}
