use super::*;
use crate::test_support::{product, shop};
use pretty_assertions::assert_eq;

fn doc() -> Value {
    document(&EmitContext::new("github.com/acme/shop"), "shop", &shop())
}

#[test]
fn product_operations() {
    let doc = doc();
    let ids = |path: &str| -> Vec<String> {
        doc["paths"][path]
            .as_object()
            .unwrap()
            .values()
            .map(|op| op["operationId"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(ids("/api/v1/products"), ["listProducts", "createProduct"]);
    assert_eq!(
        ids("/api/v1/products/{id}"),
        ["deleteProduct", "getProduct", "updateProduct"]
    );
    assert_eq!(doc["openapi"], OPENAPI_VERSION);
    assert_eq!(doc["info"]["title"], "shop");
}

#[test]
fn update_uses_patch_with_partial_body() {
    let doc = doc();
    let update = &doc["paths"]["/api/v1/products/{id}"]["patch"];
    assert_eq!(update["operationId"], "updateProduct");
    assert_eq!(
        update["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/UpdateProduct"
    );
    assert!(doc["components"]["schemas"]["UpdateProduct"]["required"].is_null());
}

#[test]
fn roles_are_documented() {
    let doc = doc();
    let delete = &doc["paths"]["/api/v1/products/{id}"]["delete"];
    assert_eq!(delete["x-roles"], serde_json::json!(["admin"]));
    assert!(delete["responses"]["403"].is_object());
    assert!(doc["paths"]["/api/v1/products/{id}"]["get"]["x-roles"].is_null());
}

#[test]
fn list_documents_cursor_link() {
    let doc = doc();
    let list = &doc["paths"]["/api/v1/products"]["get"];
    let example = list["responses"]["200"]["headers"]["Link"]["example"]
        .as_str()
        .unwrap();
    assert!(example.starts_with("</api/v1/products?cursor="));
    assert!(example.ends_with("rel=\"next\""));
    let names: Vec<&str> = list["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["limit", "offset", "cursor", "sort", "order", "price"]);
    assert_eq!(
        list["parameters"][3]["schema"]["enum"],
        serde_json::json!(["id", "price"])
    );
}

#[test]
fn resource_schema_shapes() {
    let doc = doc();
    let schemas = &doc["components"]["schemas"];
    let product = &schemas["Product"];
    assert_eq!(
        product["required"],
        serde_json::json!(["id", "title", "price", "createdAt", "updatedAt"])
    );
    assert_eq!(product["properties"]["title"]["maxLength"], 200);
    assert_eq!(
        product["properties"]["status"]["enum"],
        serde_json::json!(["draft", "published", "archived"])
    );
    assert_eq!(product["properties"]["status"]["default"], "draft");
    assert_eq!(product["properties"]["categoryId"]["format"], "uuid");
    assert!(schemas["CreateProduct"]["properties"]["id"].is_null());
    assert_eq!(
        schemas["CreateProduct"]["required"],
        serde_json::json!(["title", "price"])
    );
    assert_eq!(schemas["Tag"]["properties"]["id"]["format"], "uuid");
}

#[test]
fn error_schema_lists_runtime_codes() {
    let doc = doc();
    let error = &doc["components"]["schemas"]["Error"]["properties"]["error"];
    let codes = &error["properties"]["code"]["enum"];
    assert_eq!(codes.as_array().unwrap().len(), 10);
    assert_eq!(codes[0], "not_found");
}

#[test]
fn export_formats() {
    let doc = document(&EmitContext::new("m"), "m", &[product()]);
    let json = export(&doc, ExportFormat::Json).unwrap();
    assert!(json.starts_with("{\n  \"components\""));
    assert!(json.ends_with("}\n"));
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);

    let yaml = export(&doc, ExportFormat::Yaml).unwrap();
    assert!(yaml.contains("openapi: 3.1.0"));
    assert!(yaml.contains("operationId: listProducts"));
}

#[test]
fn format_names() {
    assert_eq!(ExportFormat::parse("json"), Some(ExportFormat::Json));
    assert_eq!(ExportFormat::parse("yml"), Some(ExportFormat::Yaml));
    assert_eq!(ExportFormat::parse("toml"), None);
}

#[test]
fn document_is_deterministic() {
    assert_eq!(
        export(&doc(), ExportFormat::Json).unwrap(),
        export(&doc(), ExportFormat::Json).unwrap()
    );
}
