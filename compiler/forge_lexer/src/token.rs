//! Cooked tokens.

use std::fmt;

use forge_ir::Span;

/// Reserved words of the host language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    /// Look up a reserved keyword by text.
    pub fn lookup(text: &str) -> Option<Keyword> {
        let kw = match text {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(kw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Chan => "chan",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Defer => "defer",
            Keyword::Else => "else",
            Keyword::Fallthrough => "fallthrough",
            Keyword::For => "for",
            Keyword::Func => "func",
            Keyword::Go => "go",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::Interface => "interface",
            Keyword::Map => "map",
            Keyword::Package => "package",
            Keyword::Range => "range",
            Keyword::Return => "return",
            Keyword::Select => "select",
            Keyword::Struct => "struct",
            Keyword::Switch => "switch",
            Keyword::Type => "type",
            Keyword::Var => "var",
        }
    }
}

/// Token kinds.
///
/// Literal and identifier tokens carry no payload; their text is recovered
/// from the source through the token's span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident,
    Keyword(Keyword),

    Int,
    Float,
    Imag,
    Char,
    String,
    RawString,

    LineComment,
    BlockComment,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `++`
    Inc,
    /// `--`
    Dec,
    /// Any other operator; see the token text.
    Op,

    Eof,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Basic literal (number, rune or string).
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imag
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::RawString
        )
    }

    pub fn is_open_delim(self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket)
    }

    pub fn is_close_delim(self) -> bool {
        matches!(self, TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket)
    }

    /// Whether a line ending after this token terminates a statement.
    ///
    /// Mirrors the host language's automatic semicolon rule.
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imag
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::Keyword(
                    Keyword::Break | Keyword::Continue | Keyword::Fallthrough | Keyword::Return
                )
                | TokenKind::Inc
                | TokenKind::Dec
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Int => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::Imag => "imaginary literal",
            TokenKind::Char => "rune literal",
            TokenKind::String | TokenKind::RawString => "string literal",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Assign => "`=`",
            TokenKind::Define => "`:=`",
            TokenKind::Inc => "`++`",
            TokenKind::Dec => "`--`",
            TokenKind::Op => "operator",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line break occurs between the previous token and this one.
    pub newline_before: bool,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            newline_before: false,
        }
    }

    /// Source text of this token.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}
