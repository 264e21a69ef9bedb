//! Parse error types.

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::Span;
use forge_lexer::LexError;
use thiserror::Error;

use crate::SourceFile;

/// A structural error. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unclosed {delimiter}")]
    Unclosed { delimiter: char, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Unexpected { span, .. } | ParseError::Unclosed { span, .. } => *span,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            ParseError::Unexpected { found, .. } if found == "newline" => {
                Some("a line break here ends the statement; add a trailing comma before it")
            }
            ParseError::Unclosed { .. } => Some("every opening delimiter needs a matching close"),
            _ => None,
        }
    }

    /// Convert to a `syntax_error` diagnostic positioned in `file`.
    pub fn to_diagnostic(&self, file: &SourceFile) -> Diagnostic {
        let diag = file
            .diagnostic(ErrorCode::SyntaxError, self.span())
            .with_message(self.to_string());
        match self.hint() {
            Some(hint) => diag.with_hint(hint),
            None => diag,
        }
    }
}
