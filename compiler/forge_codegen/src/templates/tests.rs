use super::*;
use crate::context::{global_context, resource_context, EmitContext};
use crate::template::Template;
use crate::test_support::shop;
use pretty_assertions::assert_eq;

fn is_per_resource(name: &str) -> bool {
    name.ends_with("/resource.go")
        || name.starts_with("scaffold/")
        || matches!(name, "models/model.go" | "factories/factory.go")
}

#[test]
fn every_template_parses() {
    for (name, source) in TEMPLATES {
        if let Err(e) = Template::parse(name, source) {
            panic!("{e}");
        }
    }
}

#[test]
fn names_are_unique() {
    let mut names: Vec<&str> = TEMPLATES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), TEMPLATES.len());
}

#[test]
fn every_template_renders_for_every_resource() {
    let cx = EmitContext::new("github.com/acme/shop");
    let resources = shop();
    for (name, _) in TEMPLATES {
        if is_per_resource(name) {
            for resource in &resources {
                let context = resource_context(&cx, &resources, resource);
                if let Err(e) = render(name, &context) {
                    panic!("{}: {e}", resource.name);
                }
            }
        } else {
            render(name, &global_context(&cx, &resources)).unwrap();
        }
    }
}

#[test]
fn unknown_template_is_an_error() {
    let err = render("nope.go", &serde_json::json!({})).unwrap_err();
    assert_eq!(err.to_string(), "no template named `nope.go`");
}

#[test]
fn errors_carry_the_logical_name() {
    let err = render("models/model.go", &serde_json::json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "template `models/model.go`, line 10: missing variable `resource.fields`"
    );
}

#[test]
fn model_lists_fields_in_source_order() {
    let cx = EmitContext::new("github.com/acme/shop");
    let resources = shop();
    let context = resource_context(&cx, &resources, &resources[0]);
    let text = render("models/model.go", &context).unwrap();
    let positions: Vec<usize> = [
        "\tID uuid.UUID",
        "\tTitle string",
        "\tDescription *string",
        "\tPrice decimal.Decimal",
        "\tStatus *ProductStatus",
        "\tFeatured *bool",
        "\tCategoryID *uuid.UUID",
    ]
    .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}\n{text}")))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert!(text.contains("ProductStatusPublished ProductStatus = \"published\""));
    assert!(text.contains("DeletedAt *time.Time"));
}
