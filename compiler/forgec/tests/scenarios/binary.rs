use std::process::{Command, Output};

use crate::common::Fixture;

fn forge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_forge"))
        .args(args)
        .env_remove("FORGE_LOG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn generate_succeeds() {
    let fixture = Fixture::shop();
    let out = forge(&["generate", "--dir", fixture.root().to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stderr).contains("generated 21 files for 1 resource"));
}

#[test]
fn diagnostics_exit_with_one() {
    let fixture = Fixture::new().with_resource(
        "product",
        "package product\n\nimport \"github.com/acme/forge/schema\"\n\nvar Product = schema.Define(\"Product\",\n\tschema.String(\"Title\").MaxLen(n),\n)\n",
    );
    let out = forge(&["--color", "never", "generate", "--dir", fixture.root().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[dynamic_value]: `n` is not a literal value"), "{stderr}");
    assert!(stderr.contains("aborting due to 1 error"), "{stderr}");
    assert!(!stderr.contains('\u{1b}'), "no ANSI styles with --color never");
}

#[test]
fn usage_errors_exit_with_two() {
    let out = forge(&["migrate", "diff"]);
    assert_eq!(out.status.code(), Some(2));

    let out = forge(&["routes", "--dir", "/definitely/not/a/forge/project"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
}

#[test]
fn missing_config_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = forge(&["routes", "--dir", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no forge.toml found"));
}

#[test]
fn explain_prints_docs() {
    let out = forge(&["explain", "dynamic_value"]);
    assert!(out.status.success());
    assert!(!out.stdout.is_empty());
}
