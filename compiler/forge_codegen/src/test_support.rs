//! Resources shared by the unit tests.

use forge_extract::parse_files;
use forge_ir::Resource;
use forge_parse::SourceFile;

pub(crate) const PRODUCT: &str = r#"package product

import "github.com/acme/forge/schema"

var Product = schema.Define("Product",
	schema.UUID("ID").PrimaryKey(),
	schema.String("Title").Required().MaxLen(200).Label("Product Title").Unique(),
	schema.Text("Description").Help("Long form description"),
	schema.Decimal("Price").Required().Filterable().Sortable(),
	schema.Enum("Status", "draft", "published", "archived").Default("draft"),
	schema.Bool("Featured").Default(false),
	schema.BelongsTo("Category", "categories").Optional().OnDelete(schema.SetNull),
	schema.HasMany("Reviews", "reviews"),
	schema.SoftDelete(),
	schema.Timestamps(),
	schema.Permission("delete", "admin"),
)
"#;

pub(crate) const TAG: &str = r#"package tag

import "github.com/acme/forge/schema"

var Tag = schema.Define("Tag",
	schema.Slug("Name").Required().Unique().Index(),
	schema.ManyToMany("Products", "products"),
	schema.WithHooks(schema.Hooks{
		AfterCreate: []schema.JobRef{{Kind: "reindex_tag", Queue: "search"}},
		AfterUpdate: []schema.JobRef{{Kind: "reindex_tag", Queue: "search"}, {Kind: "notify"}},
	}),
)
"#;

/// Parse resource sources, panicking on diagnostics.
pub(crate) fn parse(sources: &[(&str, &str)]) -> Vec<Resource> {
    let output = parse_files(
        sources
            .iter()
            .map(|(path, text)| SourceFile::new(*path, *text)),
    );
    assert!(
        !output.has_errors(),
        "fixture has diagnostics: {:?}",
        output.diagnostics
    );
    output.resources
}

pub(crate) fn product() -> Resource {
    parse(&[("resources/product/schema.go", PRODUCT)]).remove(0)
}

pub(crate) fn shop() -> Vec<Resource> {
    parse(&[
        ("resources/product/schema.go", PRODUCT),
        ("resources/tag/schema.go", TAG),
    ])
}
