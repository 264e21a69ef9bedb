//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use forge_ir::Span;
use forge_lexer::{Keyword, Token, TokenKind};

use crate::ParseError;

/// Cursor over a comment-free token list. The last token is always `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.peek_nth(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    pub fn current_text(&self) -> &'a str {
        self.current().text(self.source)
    }

    pub fn text_of(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    /// Token `n` positions ahead; `Eof` past the end.
    pub fn peek_nth(&self, n: usize) -> Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::DUMMY))
    }

    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.check(TokenKind::Keyword(kw))
    }

    /// Operator token with the given text.
    pub fn check_op(&self, op: &str) -> bool {
        self.check(TokenKind::Op) && self.current_text() == op
    }

    /// A line break between the previous and current token that ends the
    /// statement (automatic semicolon).
    pub fn at_line_break(&self) -> bool {
        self.current().newline_before && self.previous_kind().is_some_and(TokenKind::ends_statement)
    }

    /// End of a statement: explicit `;`, implicit line break, a closing
    /// delimiter, or end of file.
    pub fn at_statement_end(&self) -> bool {
        self.at_line_break()
            || matches!(
                self.current_kind(),
                TokenKind::Semicolon | TokenKind::RParen | TokenKind::RBrace | TokenKind::Eof
            )
    }

    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with an "expected" error.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Error describing the current token as unexpected.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let found = if self.at_line_break() {
            "newline".to_string()
        } else {
            match self.current_kind() {
                TokenKind::Ident | TokenKind::Op => format!("`{}`", self.current_text()),
                kind => kind.describe().to_string(),
            }
        };
        let span = if found == "newline" {
            Span::point(self.previous_span().end)
        } else {
            self.current_span()
        };
        ParseError::Unexpected {
            expected: expected.to_string(),
            found,
            span,
        }
    }
}
