//! Tokenizer for the host-language subset Forge reads and writes.
//!
//! Resource definitions are ordinary source files; this crate turns them
//! into a flat token list with byte spans. The same tokens drive the output
//! formatter, so comments are kept as tokens and callers that do not want
//! them use [`strip_comments`].
//!
//! Line breaks are not tokens. Each token records whether a line break
//! precedes it, which is enough for the parser to apply the automatic
//! statement-termination rule and for the formatter to rebuild lines.

mod lex_error;
mod raw_token;
mod token;

use logos::Logos;

use forge_ir::Span;

pub use lex_error::LexError;
pub use token::{Keyword, Token, TokenKind};

use raw_token::RawToken;

/// Lex source code into tokens, ending with an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut result = Vec::new();
    let mut lexer = RawToken::lexer(source);
    let mut newline = false;

    while let Some(token_result) = lexer.next() {
        let span = to_span(lexer.span());
        let slice = lexer.slice();

        let raw = match token_result {
            Ok(raw) => raw,
            Err(()) => return Err(classify_error(source, span)),
        };

        let kind = match raw {
            RawToken::Newline => {
                newline = true;
                continue;
            }
            RawToken::Op
                if slice == "/"
                    && source
                        .get(span.end as usize..)
                        .is_some_and(|rest| rest.starts_with('*')) =>
            {
                return Err(LexError::UnterminatedComment {
                    span: Span::new(span.start, source_len(source)),
                });
            }
            RawToken::Ident => Keyword::lookup(slice).map_or(TokenKind::Ident, TokenKind::Keyword),
            other => convert(other),
        };

        result.push(Token {
            kind,
            span,
            newline_before: newline,
        });
        newline = matches!(kind, TokenKind::BlockComment) && slice.contains('\n');
    }

    let mut eof = Token::new(TokenKind::Eof, Span::point(source_len(source)));
    eof.newline_before = newline;
    result.push(eof);
    Ok(result)
}

/// Drop comment tokens, carrying their line breaks over to the next token.
pub fn strip_comments(tokens: &[Token], source: &str) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut pending = false;
    for token in tokens {
        if token.kind.is_comment() {
            pending |= token.newline_before || token.text(source).contains('\n');
            continue;
        }
        let mut token = *token;
        token.newline_before |= pending;
        pending = false;
        out.push(token);
    }
    out
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::LineComment => TokenKind::LineComment,
        RawToken::BlockComment => TokenKind::BlockComment,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Int => TokenKind::Int,
        RawToken::Float => TokenKind::Float,
        RawToken::Imag => TokenKind::Imag,
        RawToken::Char => TokenKind::Char,
        RawToken::String => TokenKind::String,
        RawToken::RawString => TokenKind::RawString,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Define => TokenKind::Define,
        RawToken::Inc => TokenKind::Inc,
        RawToken::Dec => TokenKind::Dec,
        RawToken::Op => TokenKind::Op,
        // Folded into `newline_before` by the caller.
        RawToken::Newline => TokenKind::Eof,
    }
}

fn classify_error(source: &str, span: Span) -> LexError {
    let rest = source.get(span.start as usize..).unwrap_or("");
    let to_eol = rest.find('\n').unwrap_or(rest.len());
    let line_span = Span::new(
        span.start,
        span.start + u32::try_from(to_eol).unwrap_or(0),
    );
    match rest.chars().next() {
        Some('"') => LexError::UnterminatedString { span: line_span },
        Some('`') => LexError::UnterminatedRawString {
            span: Span::new(span.start, source_len(source)),
        },
        Some('\'') => LexError::UnterminatedRune { span: line_span },
        Some(ch) => LexError::InvalidCharacter {
            ch,
            span: Span::new(span.start, span.start + u32::try_from(ch.len_utf8()).unwrap_or(1)),
        },
        None => LexError::InvalidCharacter {
            ch: '\0',
            span: Span::point(span.start),
        },
    }
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::from_range(range)
}

fn source_len(source: &str) -> u32 {
    u32::try_from(source.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
