//! Temporary project fixture.

use std::fs;
use std::path::{Path, PathBuf};

use forgec::Project;
use tempfile::TempDir;

pub const CONFIG: &str = r#"[project]
name = "shop"
module = "github.com/acme/shop"

[database]
url = "postgres://localhost:5432/shop?sslmode=disable"

[server]
port = 8080
"#;

pub const PRODUCT: &str = r#"package product

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
)
"#;

pub const TAG: &str = r#"package tag

import "github.com/acme/forge/schema"

var Tag = schema.Define("Tag",
	schema.Slug("Name").Required().Unique(),
	schema.WithHooks(schema.Hooks{
		AfterCreate: []schema.JobRef{{Kind: "reindex_tag", Queue: "search"}},
	}),
)
"#;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// A project with `forge.toml` and no resources.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("forge.toml"), CONFIG).unwrap();
        fs::create_dir_all(dir.path().join("resources")).unwrap();
        Fixture { dir }
    }

    /// A project holding the `Product` resource.
    pub fn shop() -> Self {
        Fixture::new().with_resource("product", PRODUCT)
    }

    pub fn with_resource(self, dir: &str, source: &str) -> Self {
        self.write(&format!("resources/{dir}/schema.go"), source);
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, text: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn project(&self) -> Project {
        Project::load(self.root()).unwrap()
    }
}

/// Every file under `dir`, relative and sorted, with contents.
pub fn snapshot(dir: &Path) -> Vec<(String, String)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
                out.push((rel, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
