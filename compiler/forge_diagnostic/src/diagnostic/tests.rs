use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::DynamicValue)
        .with_message("test error")
        .in_file("schema.go")
        .at(3, 7)
        .with_source_line("  x := y")
        .with_underline(7, 1)
        .with_hint("use a literal");

    assert_eq!(diag.code, ErrorCode::DynamicValue);
    assert_eq!(diag.message, "test error");
    assert_eq!(diag.file.as_deref(), Some("schema.go"));
    assert_eq!((diag.line, diag.column), (Some(3), Some(7)));
    assert_eq!(diag.underline, Some(Underline { start: 7, len: 1 }));
    assert_eq!(diag.hint.as_deref(), Some("use a literal"));
}

#[test]
fn test_with_span_fills_position() {
    let source = "package p\n\tschema.String(\"T\").MaxLen(maxLen),\n";
    let index = LineIndex::build(source);
    let start = source.find("maxLen").unwrap_or(0);
    let span = Span::from_range(start..start + 6);

    let diag = Diagnostic::error(ErrorCode::DynamicValue).with_span(source, &index, span);

    assert_eq!(diag.line, Some(2));
    assert_eq!(diag.column, Some(28));
    assert_eq!(
        diag.source_line.as_deref(),
        Some("\tschema.String(\"T\").MaxLen(maxLen),")
    );
    assert_eq!(diag.underline, Some(Underline { start: 28, len: 6 }));
}

#[test]
fn test_with_span_clips_to_line() {
    let source = "abc(\n  def)\n";
    let index = LineIndex::build(source);
    let diag = Diagnostic::error(ErrorCode::SyntaxError).with_span(
        source,
        &index,
        Span::new(3, 11),
    );
    assert_eq!(diag.underline, Some(Underline { start: 4, len: 1 }));
}

#[test]
fn test_empty_span_underlines_one_char() {
    let source = "x";
    let index = LineIndex::build(source);
    let diag = Diagnostic::error(ErrorCode::SyntaxError).with_span(source, &index, Span::point(1));
    assert_eq!(diag.underline.map(|u| u.len), Some(1));
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::DuplicateField).with_message("field `Title` is declared twice");

    let output = diag.to_string();
    assert!(output.starts_with("error[duplicate_field]: field `Title` is declared twice\n"));
    assert!(!output.contains("-->"));
    assert!(output.contains("= help: forge explain duplicate_field"));
}
