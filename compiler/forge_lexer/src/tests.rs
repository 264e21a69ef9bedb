use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .map(|tokens| tokens.iter().map(|t| t.kind).collect())
        .unwrap_or_default()
}

#[test]
fn test_lex_basic() {
    assert_eq!(
        kinds("var x = 42"),
        vec![
            TokenKind::Keyword(Keyword::Var),
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_dsl_chain() {
    let source = "schema.String(\"Title\").MaxLen(200)";
    let tokens = lex(source).unwrap_or_default();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text(source)).collect();
    assert_eq!(
        texts,
        vec![
            "schema", ".", "String", "(", "\"Title\"", ")", ".", "MaxLen", "(", "200", ")", ""
        ]
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        kinds("1.5 .5 1e3 0x1F 'a' '\\n' `raw\nstring` \"s\\\"q\" 2i"),
        vec![
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Int,
            TokenKind::Char,
            TokenKind::Char,
            TokenKind::RawString,
            TokenKind::String,
            TokenKind::Imag,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("a := b... &^= c++ <- d"),
        vec![
            TokenKind::Ident,
            TokenKind::Define,
            TokenKind::Ident,
            TokenKind::Ellipsis,
            TokenKind::Op,
            TokenKind::Ident,
            TokenKind::Inc,
            TokenKind::Op,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_newline_before_flags() {
    let source = "a\n\n  b c\n// note\nd";
    let tokens = lex(source).unwrap_or_default();
    let flags: Vec<(TokenKind, bool)> = tokens.iter().map(|t| (t.kind, t.newline_before)).collect();
    assert_eq!(
        flags,
        vec![
            (TokenKind::Ident, false),
            (TokenKind::Ident, true),
            (TokenKind::Ident, false),
            (TokenKind::LineComment, true),
            (TokenKind::Ident, true),
            (TokenKind::Eof, false),
        ]
    );
}

#[test]
fn test_strip_comments_keeps_line_breaks() {
    let source = "a /* one\ntwo */ b // tail\n";
    let tokens = lex(source).unwrap_or_default();
    let stripped = strip_comments(&tokens, source);
    let flags: Vec<(TokenKind, bool)> =
        stripped.iter().map(|t| (t.kind, t.newline_before)).collect();
    assert_eq!(
        flags,
        vec![
            (TokenKind::Ident, false),
            (TokenKind::Ident, true),
            (TokenKind::Eof, true),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let err = lex("x := \"abc\ny").err();
    assert!(matches!(err, Some(LexError::UnterminatedString { .. })));
    assert_eq!(err.map(|e| e.span()), Some(Span::new(5, 9)));
}

#[test]
fn test_unterminated_raw_string_and_comment() {
    assert!(matches!(
        lex("`abc"),
        Err(LexError::UnterminatedRawString { .. })
    ));
    assert!(matches!(
        lex("a /* never closed"),
        Err(LexError::UnterminatedComment { .. })
    ));
}

#[test]
fn test_invalid_character() {
    assert!(matches!(
        lex("a @ b"),
        Err(LexError::InvalidCharacter { ch: '@', .. })
    ));
}

#[test]
fn test_unicode_identifiers() {
    let source = "préfix := 1";
    let tokens = lex(source).unwrap_or_default();
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].text(source), "préfix");
}

proptest! {
    #[test]
    fn prop_spans_are_ordered_and_cover_text(
        words in proptest::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,6}|[0-9]{1,4}|\"[a-z ]{0,5}\"|[(){}\\[\\],.]", 0..30),
        seps in proptest::collection::vec("[ \t\n]{1,2}", 30),
    ) {
        let mut source = String::new();
        for (word, sep) in words.iter().zip(seps.iter()) {
            source.push_str(word);
            source.push_str(sep);
        }
        let tokens = lex(&source);
        prop_assert!(tokens.is_ok());
        let tokens = tokens.unwrap_or_default();
        prop_assert_eq!(tokens.len(), words.len() + 1);
        let mut last_end = 0;
        for (token, word) in tokens.iter().zip(words.iter()) {
            prop_assert!(token.span.start >= last_end);
            prop_assert_eq!(token.text(&source), word.as_str());
            last_end = token.span.end;
        }
    }
}
