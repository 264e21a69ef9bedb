//! Type expressions.
//!
//! Named, pointer, slice, array and map types are kept structurally;
//! everything else is consumed as an opaque node.

use forge_lexer::{Keyword, TokenKind};

use crate::ast::{Expr, ExprKind, Ident};
use crate::ParseError;

use super::Parser;

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Ident => self.named_type(),
            TokenKind::Op if self.cursor.current_text() == "*" => {
                self.cursor.advance();
                let inner = self.parse_type()?;
                let span = token.span.merge(inner.span);
                Ok(Expr::new(ExprKind::Pointer(Box::new(inner)), span))
            }
            TokenKind::LBracket => self.array_type(),
            TokenKind::Keyword(Keyword::Map) => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::LBracket)?;
                let key = self.parse_type()?;
                self.cursor.expect(TokenKind::RBracket)?;
                let value = self.parse_type()?;
                let span = token.span.merge(value.span);
                Ok(Expr::new(
                    ExprKind::MapType(Box::new(key), Box::new(value)),
                    span,
                ))
            }
            TokenKind::Keyword(Keyword::Struct | Keyword::Interface) => {
                self.cursor.advance();
                if !self.cursor.check(TokenKind::LBrace) {
                    return Err(self.cursor.unexpected("`{`"));
                }
                self.skip_balanced()?;
                let span = token.span.merge(self.cursor.previous_span());
                Ok(Expr::new(ExprKind::Opaque, span))
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.cursor.advance();
                if self.cursor.check_op("<-") {
                    self.cursor.advance();
                }
                let elem = self.parse_type()?;
                Ok(Expr::new(ExprKind::Opaque, token.span.merge(elem.span)))
            }
            TokenKind::Op if self.cursor.current_text() == "<-" => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::Keyword(Keyword::Chan))?;
                let elem = self.parse_type()?;
                Ok(Expr::new(ExprKind::Opaque, token.span.merge(elem.span)))
            }
            TokenKind::Keyword(Keyword::Func) => self.parse_expr(),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_type()?;
                let close = self.cursor.expect(TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    token.span.merge(close.span),
                ))
            }
            _ => Err(self.cursor.unexpected("type")),
        }
    }

    /// `T`, `pkg.T`, optionally instantiated: `T[A, B]`.
    fn named_type(&mut self) -> Result<Expr, ParseError> {
        let first = self.cursor.advance();
        let mut expr = Expr::new(
            ExprKind::Ident(self.cursor.text_of(first).to_string()),
            first.span,
        );
        if self.cursor.check(TokenKind::Dot) && !self.cursor.at_line_break() {
            self.cursor.advance();
            let token = self.cursor.expect(TokenKind::Ident)?;
            let sel = Ident {
                name: self.cursor.text_of(token).to_string(),
                span: token.span,
            };
            let span = expr.span.merge(sel.span);
            expr = Expr::new(ExprKind::Selector(Box::new(expr), sel), span);
        }
        if self.cursor.check(TokenKind::LBracket) && !self.cursor.at_line_break() {
            self.cursor.advance();
            let mut args = vec![self.parse_type()?];
            while self.cursor.eat(TokenKind::Comma) {
                if self.cursor.check(TokenKind::RBracket) {
                    break;
                }
                args.push(self.parse_type()?);
            }
            let close = self.cursor.expect(TokenKind::RBracket)?;
            let span = expr.span.merge(close.span);
            expr = Expr::new(ExprKind::Index(Box::new(expr), args), span);
        }
        Ok(expr)
    }

    /// `[]T`, `[N]T`, `[...]T`.
    fn array_type(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let len = if self.cursor.check(TokenKind::RBracket) {
            None
        } else if self.cursor.check(TokenKind::Ellipsis) {
            let token = self.cursor.advance();
            Some(Box::new(Expr::new(ExprKind::Opaque, token.span)))
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.cursor.expect(TokenKind::RBracket)?;
        let elem = self.parse_type()?;
        let span = open.span.merge(elem.span);
        Ok(Expr::new(
            ExprKind::ArrayType {
                len,
                elem: Box::new(elem),
            },
            span,
        ))
    }
}
