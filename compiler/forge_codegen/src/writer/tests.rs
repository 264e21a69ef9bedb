use super::*;
use pretty_assertions::assert_eq;

#[test]
fn header_follows_file_syntax() {
    assert_eq!(
        generated_header(Path::new("gen/models/product.go")).as_deref(),
        Some("// Code generated by forge. DO NOT EDIT.\n\n")
    );
    assert_eq!(
        generated_header(Path::new("gen/html/fields.templ")).as_deref(),
        Some("// Code generated by forge. DO NOT EDIT.\n\n")
    );
    assert_eq!(
        generated_header(Path::new("gen/schema/schema.hcl")).as_deref(),
        Some("# Code generated by forge. DO NOT EDIT.\n\n")
    );
    assert_eq!(generated_header(Path::new("README")), None);
}

#[test]
fn only_go_is_formatted() {
    assert!(is_formatted(Path::new("a/b.go")));
    assert!(!is_formatted(Path::new("a/b.templ")));
    assert!(!is_formatted(Path::new("a/b.hcl")));
}

#[test]
fn write_formats_and_prefixes() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = Writer::new(dir.path(), FormatOptions::default());
    writer
        .write(
            "gen/db/x.go",
            "package db\n\nimport (\n\"strings\"\n\"fmt\"\n)\n\nfunc F() {\nfmt.Println()\n}\n",
        )
        .unwrap();
    let text = fs::read_to_string(dir.path().join("gen/db/x.go")).unwrap();
    assert_eq!(
        text,
        "// Code generated by forge. DO NOT EDIT.\n\npackage db\n\nimport \"fmt\"\n\nfunc F() {\n\tfmt.Println()\n}\n"
    );
    assert_eq!(writer.finish().written, vec![PathBuf::from("gen/db/x.go")]);
}

#[test]
fn non_source_is_written_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = Writer::new(dir.path(), FormatOptions::default());
    writer.write("gen/schema/schema.hcl", "table \"x\" {\n}\n").unwrap();
    let text = fs::read_to_string(dir.path().join("gen/schema/schema.hcl")).unwrap();
    assert_eq!(text, "# Code generated by forge. DO NOT EDIT.\n\ntable \"x\" {\n}\n");
}

#[test]
fn format_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = Writer::new(dir.path(), FormatOptions::default());
    let err = writer.write("gen/bad.go", "package x\n\nfunc F() {\n").unwrap_err();
    assert!(matches!(err, EmitError::Format { ref path, .. } if path == Path::new("gen/bad.go")));
    assert!(!dir.path().join("gen/bad.go").exists());
}

#[test]
fn write_once_keeps_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("atlas.hcl"), "mine\n").unwrap();
    let mut writer = Writer::new(dir.path(), FormatOptions::default());
    assert!(!writer.write_once("atlas.hcl", "theirs\n").unwrap());
    assert_eq!(fs::read_to_string(dir.path().join("atlas.hcl")).unwrap(), "mine\n");
    assert!(writer.finish().is_empty());
}

#[test]
fn wipe_removes_tree_and_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let gen = dir.path().join("gen");
    fs::create_dir_all(gen.join("models")).unwrap();
    fs::write(gen.join("models/stale.go"), "x").unwrap();
    wipe(&gen).unwrap();
    assert!(!gen.exists());
    wipe(&gen).unwrap();
}

#[cfg(unix)]
#[test]
fn files_are_world_readable() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x/y.txt");
    write_file(&path, "hi").unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
