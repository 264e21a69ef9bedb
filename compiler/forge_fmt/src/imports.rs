//! Managed imports.
//!
//! Every import declaration after the package clause is collected into one
//! canonical block: unused imports dropped, duplicates removed, paths
//! sorted, and groups (standard library, third party, project) separated by
//! a blank line. An import counts as used when its local name appears as
//! the qualifier of a selector (`name.X`). Blank (`_`) and dot imports are
//! always kept.

use std::fmt::Write as _;

use forge_ir::LineIndex;
use forge_lexer::{Keyword, Token, TokenKind};
use forge_parse::{default_package_name, unquote};
use rustc_hash::FxHashSet;

use crate::FormatError;

/// Where an import is listed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportGroup {
    Std,
    ThirdParty,
    Local,
}

/// Group for `path`. Standard library paths have no dot in their first
/// segment; `local_prefix` (the project module) selects the last group.
pub fn classify_import(path: &str, local_prefix: Option<&str>) -> ImportGroup {
    let is_local = local_prefix.is_some_and(|prefix| {
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    });
    if is_local {
        ImportGroup::Local
    } else if path.split('/').next().is_some_and(|first| first.contains('.')) {
        ImportGroup::ThirdParty
    } else {
        ImportGroup::Std
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ImportSpec {
    path: String,
    alias: Option<String>,
}

impl ImportSpec {
    fn always_kept(&self) -> bool {
        matches!(self.alias.as_deref(), Some("_" | "."))
    }

    fn local_name(&self) -> String {
        self.alias
            .clone()
            .unwrap_or_else(|| default_package_name(&self.path))
    }

    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{alias} \"{}\"", self.path),
            None => format!("\"{}\"", self.path),
        }
    }
}

/// The import declarations of a file and the byte range they occupy.
struct ImportSection {
    specs: Vec<ImportSpec>,
    start: usize,
    end: usize,
    /// Index of the first token after the section.
    rest: usize,
}

/// Local names used as selector qualifiers in `tokens`.
pub fn used_qualifiers(tokens: &[Token], source: &str) -> FxHashSet<String> {
    let mut used = FxHashSet::default();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Ident {
            continue;
        }
        let followed_by_dot = tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Dot);
        let after_dot = i > 0 && tokens.get(i - 1).is_some_and(|t| t.kind == TokenKind::Dot);
        if followed_by_dot && !after_dot {
            used.insert(token.text(source).to_string());
        }
    }
    used
}

/// Rewrite the import declarations of `source` into canonical form.
///
/// Files without a package clause or without imports come back unchanged.
pub fn rewrite_imports(source: &str, local_prefix: Option<&str>) -> Result<String, FormatError> {
    let tokens = forge_lexer::lex(source).map_err(|err| {
        let line = LineIndex::build(source).line(err.span().start);
        FormatError::from_lex(&err, line)
    })?;
    let tokens = forge_lexer::strip_comments(&tokens, source);

    let Some(section) = find_imports(&tokens, source) else {
        return Ok(source.to_string());
    };

    let used = used_qualifiers(tokens.get(section.rest..).unwrap_or_default(), source);
    let mut seen = FxHashSet::default();
    let mut kept: Vec<ImportSpec> = section
        .specs
        .into_iter()
        .filter(|spec| spec.always_kept() || used.contains(&spec.local_name()))
        .filter(|spec| seen.insert(spec.clone()))
        .collect();
    kept.sort_by(|a, b| {
        classify_import(&a.path, local_prefix)
            .cmp(&classify_import(&b.path, local_prefix))
            .then_with(|| a.cmp(b))
    });

    let block = render_block(&kept, local_prefix);
    tracing::trace!(kept = kept.len(), "rewrote import block");

    let mut out = String::with_capacity(source.len());
    out.push_str(source.get(..section.start).unwrap_or_default());
    out.push_str(&block);
    out.push_str(source.get(section.end..).unwrap_or_default());
    Ok(out)
}

fn render_block(specs: &[ImportSpec], local_prefix: Option<&str>) -> String {
    match specs {
        [] => String::new(),
        [only] => format!("import {}", only.render()),
        _ => {
            let mut block = String::from("import (\n");
            let mut previous = None;
            for spec in specs {
                let group = classify_import(&spec.path, local_prefix);
                if previous.is_some_and(|p| p != group) {
                    block.push('\n');
                }
                previous = Some(group);
                let _ = writeln!(block, "\t{}", spec.render());
            }
            block.push(')');
            block
        }
    }
}

/// Locate consecutive import declarations after the package clause.
fn find_imports(tokens: &[Token], source: &str) -> Option<ImportSection> {
    let mut i = 0;
    if tokens.first()?.kind != TokenKind::Keyword(Keyword::Package) {
        return None;
    }
    i += 2;
    skip_semicolons(tokens, &mut i);

    let mut specs = Vec::new();
    let mut start = None;
    let mut end = 0;
    while tokens.get(i)?.kind == TokenKind::Keyword(Keyword::Import) {
        start.get_or_insert(tokens[i].span.start as usize);
        i += 1;
        if tokens.get(i)?.kind == TokenKind::LParen {
            i += 1;
            loop {
                skip_semicolons(tokens, &mut i);
                let token = tokens.get(i)?;
                if token.kind == TokenKind::RParen {
                    end = token.span.end as usize;
                    i += 1;
                    break;
                }
                let (spec, _) = import_spec(tokens, source, &mut i)?;
                specs.push(spec);
            }
        } else {
            let (spec, last) = import_spec(tokens, source, &mut i)?;
            specs.push(spec);
            end = last;
        }
        skip_semicolons(tokens, &mut i);
    }

    Some(ImportSection {
        specs,
        start: start?,
        end,
        rest: i,
    })
}

fn import_spec(tokens: &[Token], source: &str, i: &mut usize) -> Option<(ImportSpec, usize)> {
    let mut alias = None;
    let first = tokens.get(*i)?;
    if matches!(first.kind, TokenKind::Ident | TokenKind::Dot) {
        alias = Some(first.text(source).to_string());
        *i += 1;
    }
    let path_token = tokens.get(*i)?;
    if !matches!(path_token.kind, TokenKind::String | TokenKind::RawString) {
        return None;
    }
    let path = unquote(path_token.text(source))?;
    *i += 1;
    Some((ImportSpec { path, alias }, path_token.span.end as usize))
}

fn skip_semicolons(tokens: &[Token], i: &mut usize) {
    while tokens.get(*i).is_some_and(|t| t.kind == TokenKind::Semicolon) {
        *i += 1;
    }
}
