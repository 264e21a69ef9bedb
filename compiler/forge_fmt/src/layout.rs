//! Line layout.
//!
//! Indentation is recomputed from delimiter structure, one tab per level.
//! Every delimiter opened on a line indents the following lines by one
//! level, however many were opened together, so `f(func() {` indents its
//! body once and the matching `})` returns to the opening line's level.
//! `case` and `default` labels sit one level out from their bodies.
//!
//! Lines that start inside a multi-line raw string or block comment are
//! copied verbatim. Trailing whitespace is removed, runs of blank lines
//! collapse to one, and the file ends with exactly one newline.

use forge_ir::LineIndex;
use forge_lexer::{Keyword, Token, TokenKind};

use crate::lines::Lines;
use crate::FormatError;

/// An open delimiter and the indentation around it.
struct Open {
    ch: char,
    /// Level of the line the delimiter was opened on.
    outer: usize,
    line: u32,
}

/// Re-indent `source`.
pub fn reindent(source: &str) -> Result<String, FormatError> {
    let index = LineIndex::build(source);
    let tokens = forge_lexer::lex(source)
        .map_err(|err| FormatError::from_lex(&err, index.line(err.span().start)))?;
    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .collect();

    let mut out = Lines::with_capacity(source.len());
    let mut stack: Vec<Open> = Vec::new();
    let mut next = 0usize;
    let mut offset = 0usize;

    for (line_no, raw) in (1u32..).zip(source.split_inclusive('\n')) {
        let start = offset;
        let end = start + raw.len();
        offset = end;
        let content = raw.trim_end_matches(['\n', '\r']);

        let continues_token = next
            .checked_sub(1)
            .and_then(|i| tokens.get(i))
            .is_some_and(|t| (t.span.end as usize) > start);
        if continues_token {
            out.verbatim(content);
            track(&tokens, &mut next, end, &mut stack, None, line_no, source)?;
            continue;
        }

        let trimmed = content.trim();
        if trimmed.is_empty() {
            out.blank();
            continue;
        }

        let first = tokens.get(next).map(|t| t.kind);
        let level = match first {
            Some(kind) if kind.is_close_delim() => stack.last().map_or(0, |o| o.outer),
            Some(TokenKind::Keyword(Keyword::Case | Keyword::Default)) => {
                stack.last().map_or(0, |o| o.outer)
            }
            _ => stack.last().map_or(0, |o| o.outer + 1),
        };

        let opens_multiline = track(&tokens, &mut next, end, &mut stack, Some(level), line_no, source)?;
        // A raw string that runs past this line keeps its trailing spaces.
        let text = if opens_multiline {
            content.trim_start()
        } else {
            trimmed
        };
        out.line(level, text);
    }

    if let Some(open) = stack.last() {
        return Err(FormatError::Unclosed {
            delimiter: open.ch,
            line: open.line,
        });
    }

    Ok(out.finish())
}

/// Consume the tokens that start before `end`, updating the delimiter
/// stack. Returns whether the last of them continues past `end`.
fn track(
    tokens: &[Token],
    next: &mut usize,
    end: usize,
    stack: &mut Vec<Open>,
    level: Option<usize>,
    line: u32,
    source: &str,
) -> Result<bool, FormatError> {
    let mut spills = false;
    while let Some(token) = tokens.get(*next) {
        if token.span.start as usize >= end {
            break;
        }
        *next += 1;
        spills = token.span.end as usize > end;

        if token.kind.is_open_delim() {
            stack.push(Open {
                ch: delimiter_char(token, source),
                // Verbatim lines have no level of their own.
                outer: level.unwrap_or_else(|| stack.last().map_or(0, |o| o.outer + 1)),
                line,
            });
        } else if token.kind.is_close_delim() {
            let found = delimiter_char(token, source);
            match stack.pop() {
                Some(open) if matching(open.ch) == found => {}
                _ => return Err(FormatError::Unbalanced { found, line }),
            }
        }
    }
    Ok(spills)
}

fn delimiter_char(token: &Token, source: &str) -> char {
    token.text(source).chars().next().unwrap_or('?')
}

fn matching(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

#[cfg(test)]
mod tests;
