//! Forge Parse - reading resource definition files.
//!
//! Resource files are ordinary host-language source. This crate parses the
//! subset that matters to Forge: the package clause, imports, and
//! package-level `var`/`const` declarations with their full expression
//! trees. Function and type declarations are skipped.
//!
//! Parsing stops at the first structural error; the error converts into a
//! `syntax_error` diagnostic through [`ParseError::to_diagnostic`].

mod ast;
mod cursor;
mod error;
mod grammar;
mod literal;
mod source;

pub use ast::{
    default_package_name, Decl, DeclKind, Element, Expr, ExprKind, File, Ident, ImportSpec,
    LitKind, ValueSpec,
};
pub use error::ParseError;
pub use literal::{parse_float, parse_int, unquote};
pub use source::SourceFile;

use grammar::Parser;

/// Parse a complete source file.
pub fn parse(source: &str) -> Result<File, ParseError> {
    let tokens = forge_lexer::lex(source)?;
    let tokens = forge_lexer::strip_comments(&tokens, source);
    let file = Parser::new(&tokens, source).parse_file()?;
    tracing::debug!(
        package = %file.package.name,
        imports = file.imports.len(),
        decls = file.decls.len(),
        "parsed source file"
    );
    Ok(file)
}
