use forge_ir::Span;
use thiserror::Error;

/// A tokenisation failure. Lexing stops at the first one.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    #[error("unterminated raw string literal")]
    UnterminatedRawString { span: Span },
    #[error("unterminated or malformed rune literal")]
    UnterminatedRune { span: Span },
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },
    #[error("invalid character {ch:?}")]
    InvalidCharacter { ch: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnterminatedRawString { span }
            | LexError::UnterminatedRune { span }
            | LexError::UnterminatedComment { span }
            | LexError::InvalidCharacter { span, .. } => *span,
        }
    }
}
