use std::cell::RefCell;
use std::fs;

use forgec::cli::MigrateAction;
use forgec::commands::migrate_with;
use forgec::migrate::{Engine, MigrateError};
use forgec::tools::ToolError;
use forgec::CliError;
use pretty_assertions::assert_eq;

use crate::common::Fixture;

/// Stands in for the migration engine: `diff` writes `sql` as a new
/// migration; every call is recorded.
struct FakeAtlas {
    dir: std::path::PathBuf,
    sql: &'static str,
    calls: RefCell<Vec<String>>,
}

impl Engine for FakeAtlas {
    fn migrate(&self, args: &[&str]) -> Result<String, ToolError> {
        self.calls.borrow_mut().push(args.join(" "));
        if args[0] == "diff" {
            fs::create_dir_all(&self.dir).unwrap();
            fs::write(self.dir.join(format!("20240601120000_{}.sql", args[1])), self.sql).unwrap();
        }
        Ok(format!("ran {}\n", args.join(" ")))
    }
}

fn engine(fixture: &Fixture, sql: &'static str) -> FakeAtlas {
    FakeAtlas {
        dir: fixture.path("migrations"),
        sql,
        calls: RefCell::new(Vec::new()),
    }
}

const DESTRUCTIVE: &str = "DROP TABLE products;\nCREATE TABLE x (id uuid);\n";

#[test]
fn destructive_migration_is_rejected() {
    let fixture = Fixture::shop();
    let engine = engine(&fixture, DESTRUCTIVE);
    let action = MigrateAction::Diff {
        name: "drop_products".into(),
        force: false,
    };
    let err = migrate_with(&fixture.project(), &action, &engine).unwrap_err();
    let CliError::Migrate(MigrateError::Destructive { path, warning }) = &err else {
        panic!("expected a refusal, got {err:?}");
    };
    assert!(!path.exists());
    assert!(warning.contains("line 1: DROP TABLE products;"), "{warning}");
    assert!(!warning.contains("CREATE TABLE"));
    assert!(warning.contains("--force"));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(*engine.calls.borrow(), ["diff drop_products", "hash"]);
    // The schema was regenerated before diffing.
    assert!(fixture.path("gen/schema/schema.hcl").is_file());
}

#[test]
fn force_keeps_the_migration() {
    let fixture = Fixture::shop();
    let engine = engine(&fixture, DESTRUCTIVE);
    let action = MigrateAction::Diff {
        name: "drop_products".into(),
        force: true,
    };
    let out = migrate_with(&fixture.project(), &action, &engine).unwrap();
    assert!(fixture.path("migrations/20240601120000_drop_products.sql").is_file());
    assert!(out.contains("created migrations/20240601120000_drop_products.sql"), "{out}");
    assert!(out.contains("line 1: DROP TABLE products;"), "{out}");
}

#[test]
fn pass_through_actions() {
    let fixture = Fixture::shop();
    let engine = engine(&fixture, "");
    let project = fixture.project();
    for (action, expected) in [
        (MigrateAction::Up { amount: None }, "apply"),
        (MigrateAction::Up { amount: Some(1) }, "apply 1"),
        (MigrateAction::Down { amount: Some(2) }, "down 2"),
        (MigrateAction::Status, "status"),
        (MigrateAction::Hash, "hash"),
    ] {
        let out = migrate_with(&project, &action, &engine).unwrap();
        assert_eq!(out, format!("ran {expected}\n"));
    }
    assert!(!fixture.path("gen").exists(), "pass-through actions do not generate");
}
