use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::DynamicValue.to_string(), "dynamic_value");
    assert_eq!(ErrorCode::MissingPrimaryKey.as_str(), "missing_primary_key");
}

#[test]
fn test_registry_is_complete() {
    assert_eq!(ErrorCode::ALL.len(), 16);
    for code in ErrorCode::ALL {
        assert!(!code.title().is_empty(), "{code} has no title");
        assert_eq!(code.help_pointer(), format!("forge explain {code}"));
    }
}

#[test]
fn test_from_str_round_trip() {
    for code in ErrorCode::ALL.iter().filter(|c| **c != ErrorCode::Unknown) {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("Dynamic-Value".parse::<ErrorCode>(), Ok(ErrorCode::DynamicValue));
}

#[test]
fn test_unknown_code_falls_back() {
    assert_eq!("E0001".parse::<ErrorCode>(), Err(()));
    assert_eq!(ErrorCode::resolve("no_such_code"), ErrorCode::Unknown);
    assert_eq!(ErrorCode::resolve("unknown"), ErrorCode::Unknown);
    assert_eq!(ErrorCode::resolve("syntax_error"), ErrorCode::SyntaxError);
}

#[test]
fn test_code_classes() {
    assert!(ErrorCode::DynamicValue.is_parser_error());
    assert!(!ErrorCode::DynamicValue.is_schema_error());
    assert!(ErrorCode::DuplicateField.is_schema_error());
    assert!(!ErrorCode::IoError.is_parser_error());
    assert!(!ErrorCode::IoError.is_schema_error());
}
