use forgec::commands::{explain, openapi_export, routes, ExportTarget};
use forge_codegen::ExportFormat;
use pretty_assertions::assert_eq;

use crate::common::Fixture;

#[test]
fn route_table() {
    let fixture = Fixture::shop();
    let table = routes(&fixture.project()).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("GET    /api/v1/products "), "{table}");
    assert!(lines[0].ends_with("listProducts"), "{table}");
    assert!(lines[3].starts_with("PATCH  /api/v1/products/{id}"), "{table}");
    assert!(lines[4].contains("deleteProduct"), "{table}");
    assert!(!fixture.path("gen").exists(), "routes never writes");
}

#[test]
fn export_target_format() {
    assert_eq!(
        ExportTarget::new(Some("api/openapi.yml".into()), None).format,
        ExportFormat::Yaml
    );
    assert_eq!(
        ExportTarget::new(Some("openapi.yaml".into()), Some(ExportFormat::Json)).format,
        ExportFormat::Json
    );
    assert_eq!(ExportTarget::new(None, None).format, ExportFormat::Json);
}

#[test]
fn export_to_stdout_and_file() {
    let fixture = Fixture::shop();
    let project = fixture.project();

    let json = openapi_export(&project, &ExportTarget::new(None, None))
        .unwrap()
        .unwrap();
    assert!(json.starts_with("{\n"));
    assert!(json.contains("\"openapi\": \"3.1.0\""));
    assert!(json.contains("\"title\": \"shop\""));
    assert!(json.contains("\"operationId\": \"listProducts\""));

    let written = openapi_export(
        &project,
        &ExportTarget::new(Some("docs/openapi.yaml".into()), None),
    )
    .unwrap();
    assert_eq!(written, None);
    let yaml = fixture.read("docs/openapi.yaml");
    assert!(yaml.contains("\nopenapi:"), "{yaml}");
    assert!(yaml.contains("3.1.0"), "{yaml}");
    assert!(yaml.contains("operationId: createProduct"), "{yaml}");
}

#[test]
fn explain_known_and_unknown_codes() {
    assert!(explain("dynamic_value").contains("literal"));
    assert!(explain("dynamic_value").ends_with('\n'));
    assert_eq!(explain("no_such_code"), explain("unknown"));
}
