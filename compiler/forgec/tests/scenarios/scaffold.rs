use std::fs;

use forgec::commands::scaffold;
use forgec::CliError;
use pretty_assertions::assert_eq;

use crate::common::Fixture;

#[test]
fn create_then_skip() {
    let fixture = Fixture::shop();
    let project = fixture.project();

    let first = scaffold(&project, "Product", false).unwrap();
    assert_eq!(first.matches("created ").count(), 6, "{first}");
    assert!(first.contains("created resources/product/views/form.templ\n"));

    let second = scaffold(&project, "product", false).unwrap();
    assert_eq!(second.matches("created ").count(), 0, "{second}");
    assert_eq!(second.matches("exists  ").count(), 6, "{second}");
}

#[test]
fn diff_before_scaffolding() {
    let fixture = Fixture::shop();
    let out = scaffold(&fixture.project(), "Product", true).unwrap();
    assert_eq!(out.matches("would be created").count(), 6, "{out}");
    assert!(!fixture.path("resources/product/views").exists());
}

#[test]
fn diff_shows_edits() {
    let fixture = Fixture::shop();
    let project = fixture.project();
    scaffold(&project, "Product", false).unwrap();

    let form = fixture.path("resources/product/views/form.templ");
    let mut text = fs::read_to_string(&form).unwrap();
    text.push_str("\n// reviewed by the design team\n");
    fs::write(&form, text).unwrap();

    let out = scaffold(&project, "Product", true).unwrap();
    assert!(out.contains("resources/product/views/form.templ: differs from a fresh render"), "{out}");
    assert!(out.contains("reviewed by the design team"), "{out}");
    assert_eq!(out.matches(": unchanged").count(), 5, "{out}");
}

#[test]
fn unknown_resource() {
    let fixture = Fixture::shop();
    let err = scaffold(&fixture.project(), "Order", false).unwrap_err();
    assert!(matches!(err, CliError::UnknownResource(ref name) if name == "Order"));
    assert_eq!(err.to_string(), "no resource named `Order`");
}
