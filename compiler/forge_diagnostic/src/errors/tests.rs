use super::*;

#[test]
fn test_every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(*code), "{code} has no docs");
        let doc = ErrorDocs::get(*code).unwrap_or_default();
        assert!(
            doc.starts_with(&format!("# {}:", code.as_str())),
            "{code} doc has the wrong heading"
        );
    }
    assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
}

#[test]
fn test_explain_by_string() {
    assert!(ErrorDocs::explain("dynamic_value").contains("without running them"));
    assert!(ErrorDocs::explain("E0001").starts_with("# unknown:"));
}
