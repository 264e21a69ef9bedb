use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_unquote_interpreted() {
    assert_eq!(unquote(r#""Product Title""#).as_deref(), Some("Product Title"));
    assert_eq!(unquote(r#""a\"b\n\t""#).as_deref(), Some("a\"b\n\t"));
    assert_eq!(unquote(r#""\x41\u00e9\101""#).as_deref(), Some("AéA"));
}

#[test]
fn test_unquote_raw() {
    assert_eq!(unquote("`C:\\path\r\nnext`").as_deref(), Some("C:\\path\nnext"));
}

#[test]
fn test_unquote_rejects_malformed() {
    assert_eq!(unquote(r#""bad \q""#), None);
    assert_eq!(unquote("'c'"), None);
    assert_eq!(unquote(r#""trailing\""#), None);
}

#[test]
fn test_parse_int() {
    assert_eq!(parse_int("200"), Some(200));
    assert_eq!(parse_int("1_000"), Some(1000));
    assert_eq!(parse_int("0x1F"), Some(31));
    assert_eq!(parse_int("0b101"), Some(5));
    assert_eq!(parse_int("0o17"), Some(15));
    assert_eq!(parse_int("017"), Some(15));
    assert_eq!(parse_int("0"), Some(0));
    assert_eq!(parse_int("99999999999999999999"), None);
}

#[test]
fn test_parse_float() {
    assert_eq!(parse_float("19.99"), Some(19.99));
    assert_eq!(parse_float("1e3"), Some(1000.0));
    assert_eq!(parse_float(".5"), Some(0.5));
}
