use super::*;
use crate::test_support::shop;
use pretty_assertions::assert_eq;

fn cx() -> EmitContext {
    EmitContext::new("github.com/acme/shop")
}

fn paths(list: &[PathBuf]) -> Vec<String> {
    list.iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect()
}

const PRODUCT_FILES: &[&str] = &[
    "resources/product/views/form.templ",
    "resources/product/views/list.templ",
    "resources/product/views/detail.templ",
    "resources/product/views/error.templ",
    "resources/product/handlers.go",
    "resources/product/hooks.go",
];

#[test]
fn first_run_creates_second_run_skips() {
    let dir = tempfile::tempdir().unwrap();
    let resources = shop();
    let first = scaffold(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    assert_eq!(paths(&first.created), PRODUCT_FILES);
    assert!(first.skipped.is_empty());

    let second = scaffold(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    assert!(second.created.is_empty());
    assert_eq!(paths(&second.skipped), PRODUCT_FILES);
}

#[test]
fn existing_files_are_never_touched() {
    let dir = tempfile::tempdir().unwrap();
    let resources = shop();
    let handlers = dir.path().join("resources/product/handlers.go");
    fs::create_dir_all(handlers.parent().unwrap()).unwrap();
    fs::write(&handlers, "package product\n// mine\n").unwrap();

    let report = scaffold(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    assert_eq!(paths(&report.skipped), ["resources/product/handlers.go"]);
    assert_eq!(report.created.len(), 5);
    assert_eq!(
        fs::read_to_string(&handlers).unwrap(),
        "package product\n// mine\n"
    );
}

#[test]
fn hooks_add_a_jobs_file() {
    let resources = shop();
    let tag = targets(&cx(), &resources[1]);
    assert_eq!(tag.len(), 7);
    assert_eq!(tag[6].0, Path::new("resources/tag/jobs.go"));

    let dir = tempfile::tempdir().unwrap();
    scaffold(dir.path(), &cx(), &resources, &resources[1]).unwrap();
    let jobs = fs::read_to_string(dir.path().join("resources/tag/jobs.go")).unwrap();
    assert!(jobs.starts_with("package tag\n"));
    assert!(jobs.contains("func HandleReindexTag(ctx context.Context, row models.Tag) error {"));
    assert!(jobs.contains("func HandleNotify("));
    let hooks = fs::read_to_string(dir.path().join("resources/tag/hooks.go")).unwrap();
    assert!(hooks.contains("\tif err := Enqueue(ctx, \"notify\", \"default\", row); err != nil {\n"));
}

#[test]
fn scaffolded_files_have_no_generated_marker() {
    let dir = tempfile::tempdir().unwrap();
    let resources = shop();
    let report = scaffold(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    for rel in &report.created {
        let text = fs::read_to_string(dir.path().join(rel)).unwrap();
        assert!(!text.contains("DO NOT EDIT"), "{}", rel.display());
    }
}

#[test]
fn diff_before_scaffolding_reports_creations() {
    let dir = tempfile::tempdir().unwrap();
    let resources = shop();
    let diffs = diff(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    assert_eq!(diffs.len(), 6);
    assert!(diffs.iter().all(|d| matches!(d, FileDiff::WouldCreate(_))));
    let report = render_diff(&diffs);
    assert_eq!(report.matches("would be created").count(), 6);
    assert!(!dir.path().join("resources").exists());
}

#[test]
fn diff_shows_local_edits() {
    let dir = tempfile::tempdir().unwrap();
    let resources = shop();
    scaffold(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    let form = dir.path().join("resources/product/views/form.templ");
    let edited = fs::read_to_string(&form)
        .unwrap()
        .replace("@html.SubmitButton(\"Save\")", "@html.SubmitButton(\"Publish now\")");
    fs::write(&form, &edited).unwrap();

    let diffs = diff(dir.path(), &cx(), &resources, &resources[0]).unwrap();
    let changed: Vec<&FileDiff> = diffs
        .iter()
        .filter(|d| matches!(d, FileDiff::Changed { .. }))
        .collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].path(), Path::new("resources/product/views/form.templ"));
    let report = render_diff(&diffs);
    assert!(report.contains("Publish now"), "{report}");
    assert!(report.contains("resources/product/views/form.templ: differs from a fresh render"));
    assert_eq!(report.matches(": unchanged").count(), 5);
    assert_eq!(fs::read_to_string(&form).unwrap(), edited);
}

#[test]
fn inline_diff_marks_changed_lines_only() {
    let out = inline_diff("a\nb\nc\n", "a\nB\nc\n");
    assert_eq!(out, "   2 | [-b-]{+B+}\n");
}

#[test]
fn inline_diff_spans_removed_lines() {
    let out = inline_diff("keep\ngone one\ngone two\nkeep\n", "keep\nkeep\n");
    assert!(out.contains("[-"), "{out}");
    assert!(out.contains("gone one"), "{out}");
    assert!(out.contains("gone two"), "{out}");
    assert!(!out.starts_with("   1 |"), "{out}");
}

#[test]
fn identical_text_has_empty_diff() {
    assert_eq!(inline_diff("same\n", "same\n"), "");
}
