use forge_lexer::LexError;
use thiserror::Error;

/// Source the formatter refuses to touch.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("line {line}: unterminated {what}")]
    Unterminated { what: &'static str, line: u32 },

    #[error("line {line}: unexpected character {ch:?}")]
    InvalidCharacter { ch: char, line: u32 },

    #[error("line {line}: unbalanced `{found}`")]
    Unbalanced { found: char, line: u32 },

    #[error("line {line}: `{delimiter}` is never closed")]
    Unclosed { delimiter: char, line: u32 },
}

impl FormatError {
    pub(crate) fn from_lex(err: &LexError, line: u32) -> Self {
        match err {
            LexError::UnterminatedString { .. } => FormatError::Unterminated {
                what: "string literal",
                line,
            },
            LexError::UnterminatedRawString { .. } => FormatError::Unterminated {
                what: "raw string literal",
                line,
            },
            LexError::UnterminatedRune { .. } => FormatError::Unterminated {
                what: "rune literal",
                line,
            },
            LexError::UnterminatedComment { .. } => FormatError::Unterminated {
                what: "block comment",
                line,
            },
            LexError::InvalidCharacter { ch, .. } => FormatError::InvalidCharacter { ch: *ch, line },
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            FormatError::Unterminated { line, .. }
            | FormatError::InvalidCharacter { line, .. }
            | FormatError::Unbalanced { line, .. }
            | FormatError::Unclosed { line, .. } => *line,
        }
    }
}
