//! Tag expressions.

use logos::Logos;
use serde_json::Value;

use crate::helpers::Helper;

use super::TemplateErrorKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Tok {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*")]
    Path,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"-?[0-9]+")]
    Int,

    #[token("|")]
    Pipe,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Lit(Value),
    Path(Vec<String>),
    Call { helper: Helper, args: Vec<Expr> },
}

impl Expr {
    /// Source-like rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Expr::Lit(value) => value.to_string(),
            Expr::Path(segments) => segments.join("."),
            Expr::Call { helper, .. } => format!("{} ...", helper.name()),
        }
    }
}

/// Parse a complete expression.
pub(crate) fn parse_expr(source: &str) -> Result<Expr, TemplateErrorKind> {
    let mut parser = ExprParser::new(source)?;
    let expr = parser.pipeline()?;
    parser.finish()?;
    Ok(expr)
}

pub(crate) struct ExprParser<'a> {
    tokens: Vec<(Tok, &'a str)>,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    pub(crate) fn new(source: &'a str) -> Result<Self, TemplateErrorKind> {
        let mut lexer = Tok::lexer(source);
        let mut tokens = Vec::new();
        while let Some(tok) = lexer.next() {
            let tok = tok.map_err(|()| {
                TemplateErrorKind::Syntax(format!("unexpected `{}`", lexer.slice()))
            })?;
            tokens.push((tok, lexer.slice()));
        }
        Ok(ExprParser { tokens, pos: 0 })
    }

    fn peek(&self) -> Option<(Tok, &'a str)> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(Tok, &'a str)> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    /// Consume a bare word such as `as`.
    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.peek() == Some((Tok::Path, word)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// A single-segment name.
    pub(crate) fn name(&mut self) -> Result<&'a str, TemplateErrorKind> {
        match self.bump() {
            Some((Tok::Path, text)) if !text.contains('.') => Ok(text),
            Some((_, text)) => Err(syntax(format!("expected a name, found `{text}`"))),
            None => Err(syntax("expected a name".to_string())),
        }
    }

    pub(crate) fn finish(&self) -> Result<(), TemplateErrorKind> {
        match self.peek() {
            None => Ok(()),
            Some((_, text)) => Err(syntax(format!("unexpected `{text}`"))),
        }
    }

    /// `head ('|' helper atom*)*`
    pub(crate) fn pipeline(&mut self) -> Result<Expr, TemplateErrorKind> {
        let mut expr = self.head()?;
        while self.peek().is_some_and(|(tok, _)| tok == Tok::Pipe) {
            self.pos += 1;
            let name = self.name()?;
            let helper = Helper::lookup(name)
                .ok_or_else(|| TemplateErrorKind::UnknownHelper(name.to_string()))?;
            let mut args = vec![expr];
            args.extend(self.args()?);
            expr = Expr::Call { helper, args };
        }
        Ok(expr)
    }

    /// A helper call or a single operand.
    fn head(&mut self) -> Result<Expr, TemplateErrorKind> {
        if let Some((Tok::Path, text)) = self.peek() {
            if let Some(helper) = Helper::lookup(text) {
                self.pos += 1;
                let args = self.args()?;
                return Ok(Expr::Call { helper, args });
            }
        }
        self.atom()
    }

    fn args(&mut self) -> Result<Vec<Expr>, TemplateErrorKind> {
        let mut args = Vec::new();
        while let Some((tok, text)) = self.peek() {
            let starts_atom = matches!(tok, Tok::Path | Tok::Str | Tok::Int | Tok::LParen);
            if !starts_atom || (tok == Tok::Path && text == "as") {
                break;
            }
            args.push(self.atom()?);
        }
        Ok(args)
    }

    fn atom(&mut self) -> Result<Expr, TemplateErrorKind> {
        match self.bump() {
            Some((Tok::Path, "true")) => Ok(Expr::Lit(Value::Bool(true))),
            Some((Tok::Path, "false")) => Ok(Expr::Lit(Value::Bool(false))),
            Some((Tok::Path, "null")) => Ok(Expr::Lit(Value::Null)),
            Some((Tok::Path, text)) => {
                if Helper::lookup(text).is_some() {
                    return Err(syntax(format!(
                        "helper `{text}` used as a value; wrap the call in parentheses"
                    )));
                }
                Ok(Expr::Path(text.split('.').map(str::to_string).collect()))
            }
            Some((Tok::Str, text)) => Ok(Expr::Lit(Value::String(unescape(text)))),
            Some((Tok::Int, text)) => text
                .parse::<i64>()
                .map(|v| Expr::Lit(Value::from(v)))
                .map_err(|_| syntax(format!("integer `{text}` out of range"))),
            Some((Tok::LParen, _)) => {
                let inner = self.pipeline()?;
                match self.bump() {
                    Some((Tok::RParen, _)) => Ok(inner),
                    _ => Err(syntax("expected `)`".to_string())),
                }
            }
            Some((_, text)) => Err(syntax(format!("unexpected `{text}`"))),
            None => Err(syntax("expected an expression".to_string())),
        }
    }
}

fn syntax(message: String) -> TemplateErrorKind {
    TemplateErrorKind::Syntax(message)
}

fn unescape(quoted: &str) -> String {
    let body = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
