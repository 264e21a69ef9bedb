//! The `explain` command: documentation for diagnostic codes.

use forge_diagnostic::ErrorDocs;

/// Documentation for `code`. Unknown codes get the generic entry.
pub fn explain(code: &str) -> String {
    let doc = ErrorDocs::explain(code.trim());
    if doc.ends_with('\n') {
        doc.to_string()
    } else {
        format!("{doc}\n")
    }
}
