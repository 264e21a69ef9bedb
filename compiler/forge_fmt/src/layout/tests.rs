use super::*;
use pretty_assertions::assert_eq;

#[test]
fn indents_with_tabs() {
    let source = "package p\n\nfunc f() {\nx := 1\n    if x > 0 {\n  return\n}\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "package p\n\nfunc f() {\n\tx := 1\n\tif x > 0 {\n\t\treturn\n\t}\n}\n"
    );
}

#[test]
fn several_openers_on_one_line_indent_once() {
    let source = "func f() {\ng(func() {\nh()\n})\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "func f() {\n\tg(func() {\n\t\th()\n\t})\n}\n"
    );
}

#[test]
fn case_labels_sit_at_switch_level() {
    let source = "switch x {\n  case 1:\n f()\n    default:\ng()\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "switch x {\ncase 1:\n\tf()\ndefault:\n\tg()\n}\n"
    );
}

#[test]
fn composite_literals_indent_elements() {
    let source = "var routes = []Route{\n{Method: \"GET\",\nPath: \"/\"},\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "var routes = []Route{\n\t{Method: \"GET\",\n\t\tPath: \"/\"},\n}\n"
    );
}

#[test]
fn raw_string_lines_are_verbatim() {
    let source = "func f() {\nq := `SELECT *  \n    FROM t\n\n  WHERE x`\nreturn\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "func f() {\n\tq := `SELECT *  \n    FROM t\n\n  WHERE x`\n\treturn\n}\n"
    );
}

#[test]
fn block_comment_lines_are_verbatim() {
    let source = "func f() {\n/* a\n   b */\nx()\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "func f() {\n\t/* a\n   b */\n\tx()\n}\n"
    );
}

#[test]
fn collapses_blank_lines_and_trims() {
    let source = "\n\npackage p   \n\n\n\nvar x = 1\t\n\n\n";
    assert_eq!(reindent(source).unwrap(), "package p\n\nvar x = 1\n");
}

#[test]
fn normalizes_crlf() {
    assert_eq!(reindent("a\r\nb\r\n").unwrap(), "a\nb\n");
}

#[test]
fn adds_missing_final_newline() {
    assert_eq!(reindent("package p").unwrap(), "package p\n");
}

#[test]
fn empty_source_stays_empty() {
    assert_eq!(reindent("").unwrap(), "");
    assert_eq!(reindent("\n\n").unwrap(), "");
}

#[test]
fn mismatched_close_is_rejected() {
    assert_eq!(
        reindent("func f() {\n)\n"),
        Err(FormatError::Unbalanced {
            found: ')',
            line: 2
        })
    );
}

#[test]
fn extra_close_is_rejected() {
    assert_eq!(
        reindent("}\n"),
        Err(FormatError::Unbalanced {
            found: '}',
            line: 1
        })
    );
}

#[test]
fn unclosed_delimiter_reports_opening_line() {
    assert_eq!(
        reindent("package p\n\nfunc f() {\nx()\n"),
        Err(FormatError::Unclosed {
            delimiter: '{',
            line: 3
        })
    );
}

#[test]
fn delimiters_in_strings_and_comments_are_ignored() {
    let source = "func f() {\ns := \"{(\" // })\nreturn\n}\n";
    assert_eq!(
        reindent(source).unwrap(),
        "func f() {\n\ts := \"{(\" // })\n\treturn\n}\n"
    );
}

#[test]
fn reindent_is_idempotent() {
    let source = "func f() {\ng(func() {\nswitch {\ncase true:\nh()\n}\n})\n}\n";
    let once = reindent(source).unwrap();
    assert_eq!(reindent(&once).unwrap(), once);
}
