use super::*;

#[test]
fn test_line_numbers() {
    let source = "a\nbb\nccc\n";
    let index = LineIndex::build(source);

    assert_eq!(index.line(0), 1);
    assert_eq!(index.line(1), 1); // the newline itself belongs to line 1
    assert_eq!(index.line(2), 2);
    assert_eq!(index.line(5), 3);
    assert_eq!(index.line_count(), 4);
}

#[test]
fn test_line_col_counts_chars() {
    let source = "var é = x\n";
    let index = LineIndex::build(source);

    // `=` is the 7th character but the 8th byte.
    let eq = u32::try_from(source.find('=').unwrap_or(0)).unwrap_or(0);
    assert_eq!(index.line_col(source, eq), (1, 7));
}

#[test]
fn test_line_text() {
    let source = "first\r\nsecond\nthird";
    let index = LineIndex::build(source);

    assert_eq!(index.line_text(source, 1), Some("first"));
    assert_eq!(index.line_text(source, 2), Some("second"));
    assert_eq!(index.line_text(source, 3), Some("third"));
    assert_eq!(index.line_text(source, 4), None);
    assert_eq!(index.line_text(source, 0), None);
}

#[test]
fn test_empty_source() {
    let index = LineIndex::build("");
    assert_eq!(index.line_col("", 0), (1, 1));
    assert_eq!(index.line_text("", 1), Some(""));
}
