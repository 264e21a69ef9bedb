//! Formatter for generated host-language source.
//!
//! Generated files pass through two rewrites before they are written:
//!
//! - [`rewrite_imports`] collects the import declarations into one sorted,
//!   grouped block and drops the ones nothing refers to.
//! - [`reindent`] recomputes indentation from delimiter nesting and
//!   normalizes blank lines and trailing whitespace.
//!
//! Both work on the token stream, never on a syntax tree, so partially
//! valid templates still format. Source that does not lex or whose
//! delimiters do not balance is rejected with a [`FormatError`].

mod error;
mod imports;
mod layout;
mod lines;

pub use error::FormatError;
pub use imports::{classify_import, rewrite_imports, used_qualifiers, ImportGroup};
pub use layout::reindent;

/// Formatting options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Module path of the project; its imports form the last group.
    pub local_prefix: Option<String>,
}

impl FormatOptions {
    pub fn with_local_prefix(prefix: impl Into<String>) -> Self {
        FormatOptions {
            local_prefix: Some(prefix.into()),
        }
    }
}

/// Format a source file.
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, FormatError> {
    let imported = rewrite_imports(source, options.local_prefix.as_deref())?;
    let formatted = reindent(&imported)?;
    tracing::trace!(
        before = source.len(),
        after = formatted.len(),
        "formatted source"
    );
    Ok(formatted)
}
