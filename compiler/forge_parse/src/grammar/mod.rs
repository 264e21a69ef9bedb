//! Recursive-descent grammar.
//!
//! File structure lives here; expressions and types have their own modules.

mod expr;
mod ty;

use forge_ir::Span;
use forge_lexer::{Keyword, Token, TokenKind};

use crate::ast::{Decl, DeclKind, File, Ident, ImportSpec, ValueSpec};
use crate::cursor::Cursor;
use crate::literal::unquote;
use crate::ParseError;

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
        }
    }

    pub(crate) fn parse_file(&mut self) -> Result<File, ParseError> {
        self.cursor.expect(TokenKind::Keyword(Keyword::Package))?;
        let package = self.ident()?;
        self.end_statement()?;

        let mut imports = Vec::new();
        while self.cursor.check_keyword(Keyword::Import) {
            self.cursor.advance();
            self.group(|p| {
                imports.push(p.import_spec()?);
                Ok(())
            })?;
            self.end_statement()?;
        }

        let mut decls = Vec::new();
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::Keyword(kw @ (Keyword::Var | Keyword::Const)) => {
                    decls.push(self.value_decl(kw)?);
                }
                TokenKind::Keyword(Keyword::Func | Keyword::Type) => self.skip_declaration()?,
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    continue;
                }
                _ => return Err(self.cursor.unexpected("declaration")),
            }
            self.end_statement()?;
        }

        Ok(File {
            package,
            imports,
            decls,
        })
    }

    /// Either a single item or a parenthesised, statement-separated group.
    fn group(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        if !self.cursor.eat(TokenKind::LParen) {
            return item(self);
        }
        loop {
            while self.cursor.eat(TokenKind::Semicolon) {}
            if self.cursor.check(TokenKind::RParen) {
                self.cursor.advance();
                return Ok(());
            }
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`)`"));
            }
            item(self)?;
            if !self.cursor.at_statement_end() {
                return Err(self.cursor.unexpected("`;`, newline or `)`"));
            }
        }
    }

    fn import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let start = self.cursor.current_span();
        let alias = match self.cursor.current_kind() {
            TokenKind::Ident => Some(self.ident()?),
            TokenKind::Dot => {
                let token = self.cursor.advance();
                Some(Ident {
                    name: ".".to_string(),
                    span: token.span,
                })
            }
            _ => None,
        };
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::String | TokenKind::RawString
        ) {
            return Err(self.cursor.unexpected("import path"));
        }
        let token = self.cursor.advance();
        let path = unquote(self.cursor_text(token)).ok_or_else(|| ParseError::Unexpected {
            expected: "valid import path".to_string(),
            found: "malformed string".to_string(),
            span: token.span,
        })?;
        Ok(ImportSpec {
            alias,
            path,
            span: start.merge(token.span),
        })
    }

    fn value_decl(&mut self, kw: Keyword) -> Result<Decl, ParseError> {
        let start = self.cursor.advance().span;
        let kind = if kw == Keyword::Var {
            DeclKind::Var
        } else {
            DeclKind::Const
        };
        let mut specs = Vec::new();
        self.group(|p| {
            specs.push(p.value_spec()?);
            Ok(())
        })?;
        Ok(Decl {
            kind,
            specs,
            span: start.merge(self.cursor.previous_span()),
        })
    }

    fn value_spec(&mut self) -> Result<ValueSpec, ParseError> {
        let start = self.cursor.current_span();
        let mut names = vec![self.ident()?];
        while self.cursor.eat(TokenKind::Comma) {
            names.push(self.ident()?);
        }

        let ty = if self.cursor.check(TokenKind::Assign) || self.cursor.at_statement_end() {
            None
        } else {
            Some(self.parse_type()?)
        };

        let mut values = Vec::new();
        if self.cursor.eat(TokenKind::Assign) {
            values.push(self.parse_expr()?);
            while self.cursor.eat(TokenKind::Comma) {
                values.push(self.parse_expr()?);
            }
        }

        Ok(ValueSpec {
            names,
            ty,
            values,
            span: start.merge(self.cursor.previous_span()),
        })
    }

    /// Skip a `func` or `type` declaration: everything up to the first
    /// statement end at delimiter depth zero.
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        let mut stack: Vec<(TokenKind, Span)> = Vec::new();
        self.cursor.advance();
        loop {
            let token = self.cursor.current();
            if stack.is_empty() && self.cursor.at_statement_end() {
                return Ok(());
            }
            match token.kind {
                TokenKind::Eof => {
                    let (open, span) = stack.pop().unwrap_or((TokenKind::LBrace, token.span));
                    return Err(ParseError::Unclosed {
                        delimiter: opening_char(open),
                        span,
                    });
                }
                kind if kind.is_open_delim() => stack.push((kind, token.span)),
                kind if kind.is_close_delim() => {
                    stack.pop();
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    fn end_statement(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::Semicolon) || self.cursor.at_line_break() || self.cursor.is_at_end()
        {
            Ok(())
        } else {
            Err(self.cursor.unexpected("`;` or newline"))
        }
    }

    fn ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.cursor.expect(TokenKind::Ident)?;
        Ok(Ident {
            name: self.cursor_text(token).to_string(),
            span: token.span,
        })
    }

    fn cursor_text(&self, token: Token) -> &'a str {
        self.cursor.text_of(token)
    }
}

fn opening_char(kind: TokenKind) -> char {
    match kind {
        TokenKind::LParen => '(',
        TokenKind::LBracket => '[',
        _ => '{',
    }
}
