//! Embedded error documentation for `forge explain`.
//!
//! Each error code has a markdown file in this directory named after the
//! code. They are embedded at compile time.
//!
//! # Adding New Documentation
//!
//! 1. Add the code to `ErrorCode` and `ErrorCode::ALL`
//! 2. Create `<code>.md` in this directory
//! 3. Add an entry to the `DOCS` array below

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Get the documentation for an error code.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Look up documentation by code string.
    ///
    /// Unregistered strings resolve to the `unknown` entry.
    pub fn explain(code: &str) -> &'static str {
        Self::get(ErrorCode::resolve(code)).unwrap_or(UNKNOWN)
    }

    /// Get all documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    /// Check if an error code has documentation.
    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

const UNKNOWN: &str = include_str!("unknown.md");

static DOCS: &[(ErrorCode, &str)] = &[
    (ErrorCode::SyntaxError, include_str!("syntax_error.md")),
    (ErrorCode::DynamicValue, include_str!("dynamic_value.md")),
    (ErrorCode::UnsupportedType, include_str!("unsupported_type.md")),
    (ErrorCode::InvalidFieldName, include_str!("invalid_field_name.md")),
    (ErrorCode::MissingArgument, include_str!("missing_argument.md")),
    (
        ErrorCode::InvalidModifierValue,
        include_str!("invalid_modifier_value.md"),
    ),
    (ErrorCode::InvalidEnum, include_str!("invalid_enum.md")),
    (ErrorCode::InvalidPermission, include_str!("invalid_permission.md")),
    (
        ErrorCode::MissingResourceName,
        include_str!("missing_resource_name.md"),
    ),
    (ErrorCode::DuplicateResource, include_str!("duplicate_resource.md")),
    (ErrorCode::DuplicateField, include_str!("duplicate_field.md")),
    (
        ErrorCode::EnumDefaultInvalid,
        include_str!("enum_default_invalid.md"),
    ),
    (ErrorCode::MissingPrimaryKey, include_str!("missing_primary_key.md")),
    (
        ErrorCode::ModifierNotApplicable,
        include_str!("modifier_not_applicable.md"),
    ),
    (ErrorCode::IoError, include_str!("io_error.md")),
    (ErrorCode::Unknown, UNKNOWN),
];

#[cfg(test)]
mod tests;
