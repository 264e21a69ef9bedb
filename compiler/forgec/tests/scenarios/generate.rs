use std::fs;

use forgec::commands::generate;
use pretty_assertions::assert_eq;

use crate::common::{snapshot, Fixture, TAG};

#[test]
fn product_happy_path() {
    let fixture = Fixture::shop();
    let report = generate(&fixture.project()).unwrap();

    assert_eq!(report.resources, 1);
    assert_eq!(report.emitted.len(), 21);
    assert_eq!(report.scaffolded.created.len(), 6);

    let schema = fixture.read("gen/schema/schema.hcl");
    assert!(schema.starts_with("# Code generated by forge. DO NOT EDIT.\n\n"));
    assert!(schema.contains("table \"products\" {"));
    assert!(schema.contains(
        "  index \"products_title_key\" {\n    unique = true\n    columns = [column.title]\n    where = \"deleted_at IS NULL\"\n  }\n"
    ));

    let router = fixture.read("gen/api/router.go");
    assert!(router.contains("RegisterProductRoutes"));
    let api = fixture.read("gen/api/product.go");
    for op in ["listProducts", "getProduct", "createProduct", "updateProduct", "deleteProduct"] {
        assert!(api.contains(op), "missing {op}");
    }
    assert!(api.contains("\"/api/v1/products\""));

    assert!(fixture.path("atlas.hcl").is_file());
    assert!(fixture.path("resources/product/views/form.templ").is_file());
}

#[test]
fn generated_tree_is_pure() {
    let fixture = Fixture::shop();
    let project = fixture.project();
    generate(&project).unwrap();
    let before = snapshot(&fixture.path("gen"));

    fs::remove_file(fixture.path("gen/models/product.go")).unwrap();
    fixture.write("gen/queries/product.go", "package queries\n// edited\n");
    fixture.write("gen/stray/file.go", "package stray\n");

    generate(&project).unwrap();
    assert_eq!(snapshot(&fixture.path("gen")), before);
}

#[test]
fn output_is_deterministic() {
    let first = Fixture::shop().with_resource("tag", TAG);
    let second = Fixture::shop().with_resource("tag", TAG);
    generate(&first.project()).unwrap();
    generate(&second.project()).unwrap();
    assert_eq!(snapshot(&first.path("gen")), snapshot(&second.path("gen")));
    assert_eq!(
        snapshot(&first.path("resources")),
        snapshot(&second.path("resources"))
    );
}

#[test]
fn existing_scaffolds_are_left_alone() {
    let fixture = Fixture::shop();
    let project = fixture.project();
    generate(&project).unwrap();
    fs::remove_file(fixture.path("resources/product/hooks.go")).unwrap();
    fixture.write("resources/product/handlers.go", "package product\n// mine\n");

    let report = generate(&project).unwrap();
    assert!(report.scaffolded.created.is_empty());
    assert!(!fixture.path("resources/product/hooks.go").exists());
    assert_eq!(
        fixture.read("resources/product/handlers.go"),
        "package product\n// mine\n"
    );
}

#[test]
fn new_resource_gets_scaffolded() {
    let fixture = Fixture::shop();
    generate(&fixture.project()).unwrap();
    let fixture = fixture.with_resource("tag", TAG);
    let report = generate(&fixture.project()).unwrap();
    assert_eq!(report.scaffolded.created.len(), 7);
    assert!(fixture.path("resources/tag/jobs.go").is_file());
    assert!(report.to_string().starts_with("generated 27 files for 2 resources\n"));
}

#[test]
fn atlas_config_is_written_once() {
    let fixture = Fixture::shop();
    fixture.write("atlas.hcl", "# mine\n");
    let report = generate(&fixture.project()).unwrap();
    assert_eq!(report.emitted.len(), 20);
    assert_eq!(fixture.read("atlas.hcl"), "# mine\n");
}

#[test]
fn module_is_required() {
    let fixture = Fixture::shop();
    fixture.write("forge.toml", "[project]\nname = \"shop\"\n");
    let err = generate(&fixture.project()).unwrap_err();
    assert!(err.to_string().contains("`project.module` is required"), "{err}");
    assert!(!fixture.path("gen").exists());
}
