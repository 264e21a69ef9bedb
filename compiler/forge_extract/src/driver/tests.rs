use super::*;
use pretty_assertions::assert_eq;
use std::fs;

fn write(root: &Path, dir: &str, text: &str) {
    let dir = root.join(dir);
    if let Err(err) = fs::create_dir_all(&dir).and_then(|()| fs::write(dir.join(SCHEMA_FILE), text)) {
        panic!("fixture write failed: {err}");
    }
}

fn tempdir() -> tempfile::TempDir {
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    }
}

const PRODUCT: &str = "package product\n\nimport \"x/schema\"\n\nvar Product = schema.Define(\"Product\",\n\tschema.String(\"Title\"),\n)\n";
const ORDER: &str = "package order\n\nimport \"x/schema\"\n\nvar Order = schema.Define(\"Order\",\n\tschema.Int(\"Total\"),\n)\n";

#[test]
fn test_parse_dir_sorted_and_filtered() {
    let tmp = tempdir();
    write(tmp.path(), "product", PRODUCT);
    write(tmp.path(), "order", ORDER);
    write(tmp.path(), ".hidden", PRODUCT);
    if let Err(err) = fs::create_dir_all(tmp.path().join("empty")) {
        panic!("{err}");
    }

    let out = parse_dir(tmp.path());
    assert!(!out.has_errors(), "{}", out.diagnostics);
    let names: Vec<&str> = out.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Order", "Product"]);
    assert_eq!(out.resources[1].file, tmp.path().join("product").join(SCHEMA_FILE));
}

#[test]
fn test_errors_from_all_files_are_collected() {
    let tmp = tempdir();
    write(tmp.path(), "a", &PRODUCT.replace("\"Title\"", "title"));
    write(tmp.path(), "b", &ORDER.replace("\"Total\"", "total"));
    write(tmp.path(), "c", "package c\nvar = 1\n");

    let out = parse_dir(tmp.path());
    let codes: Vec<&str> = out.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["dynamic_value", "dynamic_value", "syntax_error"]);
    assert_eq!(out.resources.len(), 2);
}

#[test]
fn test_duplicate_resource_across_directories() {
    let tmp = tempdir();
    write(tmp.path(), "a", PRODUCT);
    write(tmp.path(), "b", PRODUCT);
    let out = parse_dir(tmp.path());
    let codes: Vec<&str> = out.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["duplicate_resource"]);
}

#[test]
fn test_missing_root_is_io_error() {
    let tmp = tempdir();
    let out = parse_dir(&tmp.path().join("nope"));
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics.as_slice()[0].code, ErrorCode::IoError);
}

#[test]
fn test_parse_files_in_memory() {
    let out = parse_files([SourceFile::new("product/schema.go", PRODUCT)]);
    assert!(!out.has_errors());
    assert_eq!(out.resources[0].fields[0].name, "Title");
}
