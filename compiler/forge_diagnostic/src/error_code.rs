use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Codes are stable snake_case strings so they can be searched for and
/// passed to `forge explain`. Unregistered strings resolve to
/// [`ErrorCode::Unknown`] instead of failing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Reader
    /// Source file could not be parsed
    SyntaxError,
    /// A source file could not be read
    IoError,

    // Extractor
    /// DSL argument is not a literal
    DynamicValue,
    /// Unknown field constructor
    UnsupportedType,
    /// Field name is not a PascalCase identifier
    InvalidFieldName,
    /// Constructor or modifier is missing an argument
    MissingArgument,
    /// Modifier argument has the wrong kind
    InvalidModifierValue,
    /// Enum declares no values or duplicate values
    InvalidEnum,
    /// Permission names an unknown operation
    InvalidPermission,
    /// Define has no usable literal name
    MissingResourceName,

    // Schema
    /// Two resources share a name
    DuplicateResource,
    /// Two fields in one resource share a name
    DuplicateField,
    /// Enum default is not one of the enum values
    EnumDefaultInvalid,
    /// Resource has no usable primary key
    MissingPrimaryKey,
    /// Modifier is not valid for the field type
    ModifierNotApplicable,

    /// Fallback entry for unregistered codes
    Unknown,
}

impl ErrorCode {
    /// All registered codes, in registry order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::SyntaxError,
        ErrorCode::DynamicValue,
        ErrorCode::UnsupportedType,
        ErrorCode::InvalidFieldName,
        ErrorCode::MissingArgument,
        ErrorCode::InvalidModifierValue,
        ErrorCode::InvalidEnum,
        ErrorCode::InvalidPermission,
        ErrorCode::MissingResourceName,
        ErrorCode::DuplicateResource,
        ErrorCode::DuplicateField,
        ErrorCode::EnumDefaultInvalid,
        ErrorCode::MissingPrimaryKey,
        ErrorCode::ModifierNotApplicable,
        ErrorCode::IoError,
        ErrorCode::Unknown,
    ];

    /// The code as printed in `error[<code>]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "syntax_error",
            ErrorCode::IoError => "io_error",
            ErrorCode::DynamicValue => "dynamic_value",
            ErrorCode::UnsupportedType => "unsupported_type",
            ErrorCode::InvalidFieldName => "invalid_field_name",
            ErrorCode::MissingArgument => "missing_argument",
            ErrorCode::InvalidModifierValue => "invalid_modifier_value",
            ErrorCode::InvalidEnum => "invalid_enum",
            ErrorCode::InvalidPermission => "invalid_permission",
            ErrorCode::MissingResourceName => "missing_resource_name",
            ErrorCode::DuplicateResource => "duplicate_resource",
            ErrorCode::DuplicateField => "duplicate_field",
            ErrorCode::EnumDefaultInvalid => "enum_default_invalid",
            ErrorCode::MissingPrimaryKey => "missing_primary_key",
            ErrorCode::ModifierNotApplicable => "modifier_not_applicable",
            ErrorCode::Unknown => "unknown",
        }
    }

    /// One-line title shown by `forge explain` listings.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::SyntaxError => "Source file could not be parsed",
            ErrorCode::IoError => "A source file could not be read",
            ErrorCode::DynamicValue => "DSL argument is not a literal",
            ErrorCode::UnsupportedType => "Unknown field constructor",
            ErrorCode::InvalidFieldName => "Field name is not a PascalCase identifier",
            ErrorCode::MissingArgument => "Constructor or modifier is missing an argument",
            ErrorCode::InvalidModifierValue => "Modifier argument has the wrong kind",
            ErrorCode::InvalidEnum => "Enum declares no values or duplicate values",
            ErrorCode::InvalidPermission => "Permission names an unknown operation",
            ErrorCode::MissingResourceName => "Define has no usable literal name",
            ErrorCode::DuplicateResource => "Two resources share a name",
            ErrorCode::DuplicateField => "Two fields in one resource share a name",
            ErrorCode::EnumDefaultInvalid => "Enum default is not one of the enum values",
            ErrorCode::MissingPrimaryKey => "Resource has no usable primary key",
            ErrorCode::ModifierNotApplicable => "Modifier is not valid for the field type",
            ErrorCode::Unknown => "Unregistered error code",
        }
    }

    /// Where to read more about this code.
    pub fn help_pointer(&self) -> String {
        format!("forge explain {}", self.as_str())
    }

    /// Resolve a code string, falling back to [`ErrorCode::Unknown`].
    pub fn resolve(s: &str) -> ErrorCode {
        s.parse().unwrap_or(ErrorCode::Unknown)
    }

    /// Check if this code is raised while reading or extracting a source file.
    pub fn is_parser_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::SyntaxError
                | ErrorCode::DynamicValue
                | ErrorCode::UnsupportedType
                | ErrorCode::InvalidFieldName
                | ErrorCode::MissingArgument
                | ErrorCode::InvalidModifierValue
                | ErrorCode::InvalidEnum
                | ErrorCode::InvalidPermission
                | ErrorCode::MissingResourceName
        )
    }

    /// Check if this code comes from post-parse schema validation.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::DuplicateResource
                | ErrorCode::DuplicateField
                | ErrorCode::EnumDefaultInvalid
                | ErrorCode::MissingPrimaryKey
                | ErrorCode::ModifierNotApplicable
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a code string like `"dynamic_value"`.
///
/// Case-insensitive, and dashes are accepted in place of underscores.
/// `"unknown"` itself is not parseable; use [`ErrorCode::resolve`] for the
/// fallback behaviour.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .filter(|code| **code != ErrorCode::Unknown)
            .find(|code| code.as_str() == normalized)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
