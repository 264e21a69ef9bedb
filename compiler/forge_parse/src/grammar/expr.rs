//! Expression parsing.
//!
//! Binary operators use precedence climbing. Postfix forms (selectors,
//! calls, index expressions, composite literals) stop at an implicit
//! statement end so a line break after `)` never joins two declarations.

use forge_lexer::{Keyword, TokenKind};

use crate::ast::{Element, Expr, ExprKind, Ident, LitKind};
use crate::ParseError;

use super::Parser;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_expr(1)
    }

    fn binary_expr(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.unary_expr()?;
        loop {
            if self.cursor.at_line_break() {
                break;
            }
            let Some(prec) = self.binary_prec() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            let op = self.cursor.current_text().to_string();
            self.cursor.advance();
            let rhs = self.binary_expr(prec + 1)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Expr::new(ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)), span);
        }
        Ok(lhs)
    }

    fn binary_prec(&self) -> Option<u8> {
        if !self.cursor.check(TokenKind::Op) {
            return None;
        }
        match self.cursor.current_text() {
            "||" => Some(1),
            "&&" => Some(2),
            "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(3),
            "+" | "-" | "|" | "^" => Some(4),
            "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => Some(5),
            _ => None,
        }
    }

    fn unary_expr(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(TokenKind::Op)
            && matches!(
                self.cursor.current_text(),
                "+" | "-" | "!" | "^" | "*" | "&" | "<-"
            )
        {
            let token = self.cursor.advance();
            let op = self.cursor.text_of(token).to_string();
            let operand = self.unary_expr()?;
            let span = token.span.merge(operand.span);
            return Ok(Expr::new(ExprKind::Unary(op, Box::new(operand)), span));
        }
        self.primary_expr()
    }

    fn primary_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.operand()?;
        loop {
            if self.cursor.at_line_break() {
                break;
            }
            expr = match self.cursor.current_kind() {
                TokenKind::Dot => self.selector_or_assert(expr)?,
                TokenKind::LParen => self.call(expr)?,
                TokenKind::LBracket => self.index_or_slice(expr)?,
                TokenKind::LBrace if is_type_like(&expr) => {
                    let ty = Some(Box::new(expr));
                    self.composite_body(ty)?
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    fn operand(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let text = self.cursor.current_text();
        let lit = |kind| Expr::new(ExprKind::Lit(kind, text.to_string()), token.span);
        let expr = match token.kind {
            TokenKind::Ident => Expr::new(ExprKind::Ident(text.to_string()), token.span),
            TokenKind::Int => lit(LitKind::Int),
            TokenKind::Float => lit(LitKind::Float),
            TokenKind::Imag => lit(LitKind::Imag),
            TokenKind::Char => lit(LitKind::Char),
            TokenKind::String | TokenKind::RawString => lit(LitKind::String),
            TokenKind::LParen => {
                // Types parse as expressions too (`*T` is a dereference,
                // `[]T` an operand), so `([]T)(x)` needs no special case.
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let close = self.cursor.expect(TokenKind::RParen)?;
                let span = token.span.merge(close.span);
                return Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span));
            }
            TokenKind::Keyword(Keyword::Func) => return self.func_lit_or_type(),
            TokenKind::LBracket
            | TokenKind::Keyword(Keyword::Map | Keyword::Struct | Keyword::Interface | Keyword::Chan) => {
                return self.parse_type();
            }
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.cursor.advance();
        Ok(expr)
    }

    fn selector_or_assert(&mut self, base: Expr) -> Result<Expr, ParseError> {
        self.cursor.advance();
        if self.cursor.eat(TokenKind::LParen) {
            let ty = if self.cursor.check_keyword(Keyword::Type) {
                let token = self.cursor.advance();
                Expr::new(ExprKind::Opaque, token.span)
            } else {
                self.parse_type()?
            };
            let close = self.cursor.expect(TokenKind::RParen)?;
            let span = base.span.merge(close.span);
            return Ok(Expr::new(
                ExprKind::TypeAssert(Box::new(base), Box::new(ty)),
                span,
            ));
        }
        let token = self.cursor.expect(TokenKind::Ident)?;
        let sel = Ident {
            name: self.cursor.text_of(token).to_string(),
            span: token.span,
        };
        let span = base.span.merge(sel.span);
        Ok(Expr::new(ExprKind::Selector(Box::new(base), sel), span))
    }

    fn call(&mut self, func: Expr) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let mut args = Vec::new();
        let mut ellipsis = false;
        while !self.cursor.check(TokenKind::RParen) {
            if self.cursor.is_at_end() {
                return Err(ParseError::Unclosed {
                    delimiter: '(',
                    span: open.span,
                });
            }
            args.push(self.parse_expr()?);
            if self.cursor.eat(TokenKind::Ellipsis) {
                ellipsis = true;
            }
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.cursor.at_line_break() {
            return Err(self.cursor.unexpected("`,` or `)`"));
        }
        let close = self.cursor.expect(TokenKind::RParen)?;
        let span = func.span.merge(close.span);
        Ok(Expr::new(
            ExprKind::Call {
                func: Box::new(func),
                args,
                ellipsis,
            },
            span,
        ))
    }

    fn index_or_slice(&mut self, base: Expr) -> Result<Expr, ParseError> {
        self.cursor.advance();
        let low = if self.cursor.check(TokenKind::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        if self.cursor.eat(TokenKind::Colon) {
            let high = if self.cursor.check(TokenKind::RBracket) {
                None
            } else {
                Some(Box::new(self.parse_expr()?))
            };
            let close = self.cursor.expect(TokenKind::RBracket)?;
            let span = base.span.merge(close.span);
            return Ok(Expr::new(
                ExprKind::Slice {
                    base: Box::new(base),
                    low: low.map(Box::new),
                    high,
                },
                span,
            ));
        }

        let mut indices: Vec<Expr> = low.into_iter().collect();
        while self.cursor.eat(TokenKind::Comma) {
            if self.cursor.check(TokenKind::RBracket) {
                break;
            }
            indices.push(self.parse_expr()?);
        }
        let close = self.cursor.expect(TokenKind::RBracket)?;
        let span = base.span.merge(close.span);
        Ok(Expr::new(ExprKind::Index(Box::new(base), indices), span))
    }

    /// `{ elem, key: elem, ... }` with the cursor on `{`.
    pub(crate) fn composite_body(&mut self, ty: Option<Box<Expr>>) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let mut elements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::Unclosed {
                    delimiter: '{',
                    span: open.span,
                });
            }
            let first = self.element_value()?;
            let element = if self.cursor.eat(TokenKind::Colon) {
                Element {
                    key: Some(first),
                    value: self.element_value()?,
                }
            } else {
                Element {
                    key: None,
                    value: first,
                }
            };
            elements.push(element);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.cursor.at_line_break() {
            return Err(self.cursor.unexpected("`,` or `}`"));
        }
        let close = self.cursor.expect(TokenKind::RBrace)?;
        let start = ty.as_ref().map_or(open.span, |t| t.span);
        Ok(Expr::new(
            ExprKind::Composite { ty, elements },
            start.merge(close.span),
        ))
    }

    fn element_value(&mut self) -> Result<Expr, ParseError> {
        if self.cursor.check(TokenKind::LBrace) {
            self.composite_body(None)
        } else {
            self.parse_expr()
        }
    }

    /// `func(...) R { ... }` or a bare func type; both are opaque.
    fn func_lit_or_type(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().span;
        if self.cursor.check(TokenKind::LParen) {
            self.skip_balanced()?;
        }
        // Result type: anything up to the body or the end of the expression.
        loop {
            match self.cursor.current_kind() {
                TokenKind::LBrace => {
                    self.skip_balanced()?;
                    break;
                }
                TokenKind::LParen | TokenKind::LBracket => self.skip_balanced()?,
                TokenKind::Ident | TokenKind::Dot | TokenKind::Keyword(_)
                    if !self.cursor.at_line_break() =>
                {
                    self.cursor.advance();
                }
                TokenKind::Op if self.cursor.current_text() == "*" => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        let span = start.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Opaque, span))
    }

    /// Skip a balanced delimiter group starting at the current open token.
    pub(crate) fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let open = self.cursor.advance();
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::Unclosed {
                        delimiter: match open.kind {
                            TokenKind::LParen => '(',
                            TokenKind::LBracket => '[',
                            _ => '{',
                        },
                        span: open.span,
                    })
                }
                kind if kind.is_open_delim() => depth += 1,
                kind if kind.is_close_delim() => depth -= 1,
                _ => {}
            }
            self.cursor.advance();
        }
        Ok(())
    }
}

/// Expressions that can prefix a composite literal.
fn is_type_like(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Ident(_)
            | ExprKind::Selector(..)
            | ExprKind::Index(..)
            | ExprKind::ArrayType { .. }
            | ExprKind::MapType(..)
            | ExprKind::Opaque
    )
}
