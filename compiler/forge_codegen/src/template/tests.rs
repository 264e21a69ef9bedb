use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn context() -> Value {
    json!({
        "module": "github.com/acme/shop",
        "resource": {
            "name": "ProductReview",
            "fields": [
                {"name": "Title", "type": "String", "modifiers": [{"kind": "Required", "value": null}]},
                {"name": "Score", "type": "Int", "modifiers": []},
            ],
            "soft_delete": true,
        },
        "empty": [],
    })
}

fn ok(source: &str) -> String {
    render("test", source, &context()).unwrap()
}

fn err(source: &str) -> TemplateError {
    render("test", source, &context()).unwrap_err()
}

#[test]
fn interpolates_paths_and_literals() {
    assert_eq!(ok("{{ resource.name }} in {{module}}"), "ProductReview in github.com/acme/shop");
    assert_eq!(ok("{{ 42 }} {{ \"a\\\"b\" }} {{ true }} [{{ null }}]"), "42 a\"b true []");
}

#[test]
fn helpers_and_pipelines() {
    assert_eq!(ok("{{ snake resource.name }}"), "product_review");
    assert_eq!(ok("{{ resource.name | snake | plural }}"), "product_reviews");
    assert_eq!(ok("{{ \"box\" | plural | upper }}"), "BOXES");
    assert_eq!(ok("{{ join resource.fields.1.modifiers \", \" }}"), "");
}

#[test]
fn parenthesised_arguments() {
    assert_eq!(
        ok("{{ upper (snake resource.name) }}"),
        "PRODUCT_REVIEW"
    );
    assert_eq!(
        ok("{{#if and resource.soft_delete (not empty)}}yes{{/if}}"),
        "yes"
    );
}

#[test]
fn each_binds_item_and_loop() {
    let source = "{{#each resource.fields as field}}{{ field.name }}{{#if loop.last}}.{{else}}, {{/if}}{{/each}}";
    assert_eq!(ok(source), "Title, Score.");
    assert_eq!(
        ok("{{#each resource.fields as f}}{{ loop.index }}{{/each}}"),
        "01"
    );
}

#[test]
fn nested_each_shadows_loop() {
    let source = "{{#each resource.fields as f}}{{#each f.modifiers as m}}{{ f.name }}:{{ m.kind }}@{{ loop.index }} {{/each}}{{/each}}";
    assert_eq!(ok(source), "Title:Required@0 ");
}

#[test]
fn each_over_null_renders_nothing() {
    assert_eq!(ok("[{{#each empty as x}}{{ x }}{{/each}}]"), "[]");
}

#[test]
fn standalone_block_lines_are_removed() {
    let source = "type {{ resource.name }} struct {
{{#each resource.fields as field}}
	{{ field.name }} {{ go_type field }}
{{/each}}
}
";
    assert_eq!(
        ok(source),
        "type ProductReview struct {\n\tTitle string\n\tScore int\n}\n"
    );
}

#[test]
fn indented_block_tags_are_standalone() {
    let source = "a\n    {{#if resource.soft_delete}}\nb\n    {{/if}}\nc\n";
    assert_eq!(ok(source), "a\nb\nc\n");
}

#[test]
fn inline_block_tags_keep_their_line() {
    assert_eq!(ok("x {{#if true}}y{{/if}}\nz"), "x y\nz");
}

#[test]
fn comments_render_nothing() {
    assert_eq!(ok("a{{! ignored }}b\n{{! own line }}\nc"), "ab\nc");
}

#[test]
fn missing_variable_reports_line() {
    let e = err("line one\n{{ resource.nope }}");
    assert_eq!(e.name, "test");
    assert_eq!(e.line, 2);
    assert_eq!(
        e.kind,
        TemplateErrorKind::MissingVariable("resource.nope".to_string())
    );
    assert_eq!(
        e.to_string(),
        "template `test`, line 2: missing variable `resource.nope`"
    );
}

#[test]
fn unknown_helper_in_pipeline() {
    assert_eq!(
        err("{{ resource.name | shout }}").kind,
        TemplateErrorKind::UnknownHelper("shout".to_string())
    );
}

#[test]
fn helper_errors_name_the_helper() {
    let e = err("\n\n{{ snake 3 }}");
    assert_eq!(e.line, 3);
    assert_eq!(
        e.kind,
        TemplateErrorKind::Helper {
            helper: "snake".to_string(),
            message: "expected a string, got a number".to_string(),
        }
    );
}

#[test]
fn each_over_scalar_is_an_error() {
    assert_eq!(
        err("{{#each resource.name as x}}{{/each}}").kind,
        TemplateErrorKind::NotIterable("resource.name".to_string())
    );
}

#[test]
fn syntax_errors() {
    let cases = [
        ("{{#if true}}open", 1, "`{{#if}}` is never closed"),
        ("a\n{{/each}}", 2, "unexpected `{{/each}}`"),
        ("{{#each resource.fields}}{{/each}}", 1, "expected `as <name>` after the list"),
        ("{{#while x}}", 1, "unknown block `#while`"),
        ("{{ resource.name", 1, "`{{` is never closed"),
        ("{{ (snake resource.name }}", 1, "expected `)`"),
        ("{{ }}", 1, "expected an expression"),
        ("{{#if true}}{{/each}}", 1, "unexpected `{{/each}}`"),
    ];
    for (source, line, message) in cases {
        let e = err(source);
        assert_eq!(
            (e.line, e.kind),
            (line, TemplateErrorKind::Syntax(message.to_string())),
            "{source}"
        );
    }
}

#[test]
fn parsed_template_renders_repeatedly() {
    let template = Template::parse("model.go", "{{ resource.name }}").unwrap();
    assert_eq!(template.name(), "model.go");
    assert_eq!(template.render(&context()).unwrap(), "ProductReview");
    assert_eq!(
        template.render(&json!({"resource": {"name": "Order"}})).unwrap(),
        "Order"
    );
}
