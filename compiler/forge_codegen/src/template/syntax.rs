//! Template source → node tree.

use forge_ir::LineIndex;

use super::expr::{parse_expr, Expr, ExprParser};
use super::TemplateErrorKind;

pub(crate) type SyntaxError = (u32, TemplateErrorKind);

#[derive(Debug)]
pub(crate) enum Node {
    Text(String),
    Interp {
        expr: Expr,
        line: u32,
    },
    If {
        cond: Expr,
        then: Vec<Node>,
        otherwise: Vec<Node>,
        line: u32,
    },
    Each {
        items: Expr,
        binding: String,
        body: Vec<Node>,
        line: u32,
    },
}

#[derive(Debug)]
enum Tag<'a> {
    Interp(&'a str),
    If(&'a str),
    Else,
    EndIf,
    Each(&'a str),
    EndEach,
    Comment,
}

impl Tag<'_> {
    fn is_block(&self) -> bool {
        !matches!(self, Tag::Interp(_))
    }

    fn classify(body: &str) -> Result<Tag<'_>, TemplateErrorKind> {
        let body = body.trim();
        if body.starts_with('!') {
            return Ok(Tag::Comment);
        }
        if let Some(rest) = body.strip_prefix('#') {
            let (keyword, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            return match keyword {
                "if" => Ok(Tag::If(args)),
                "each" => Ok(Tag::Each(args)),
                _ => Err(TemplateErrorKind::Syntax(format!("unknown block `#{keyword}`"))),
            };
        }
        if let Some(rest) = body.strip_prefix('/') {
            return match rest.trim() {
                "if" => Ok(Tag::EndIf),
                "each" => Ok(Tag::EndEach),
                other => Err(TemplateErrorKind::Syntax(format!(
                    "unknown closing tag `/{other}`"
                ))),
            };
        }
        if body == "else" {
            return Ok(Tag::Else);
        }
        Ok(Tag::Interp(body))
    }
}

enum Segment<'a> {
    Text(&'a str),
    Tag(Tag<'a>, u32),
}

/// Split `source` into text and tags, removing the lines of standalone
/// block tags.
fn scan(source: &str) -> Result<Vec<Segment<'_>>, SyntaxError> {
    let index = LineIndex::build(source);
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = source.get(pos..).and_then(|rest| rest.find("{{")) {
        let start = pos + offset;
        let line = index.line(u32::try_from(start).unwrap_or(u32::MAX));
        let inner_start = start + 2;
        let Some(close) = source.get(inner_start..).and_then(|rest| rest.find("}}")) else {
            return Err((
                line,
                TemplateErrorKind::Syntax("`{{` is never closed".to_string()),
            ));
        };
        let end = inner_start + close + 2;
        let body = source.get(inner_start..inner_start + close).unwrap_or_default();
        let tag = Tag::classify(body).map_err(|kind| (line, kind))?;

        let (cut, resume) = match standalone(source, start, end) {
            Some(range) if tag.is_block() => range,
            _ => (start, end),
        };
        if let Some(text) = source.get(text_start..cut).filter(|t| !t.is_empty()) {
            segments.push(Segment::Text(text));
        }
        segments.push(Segment::Tag(tag, line));
        text_start = resume;
        pos = resume;
    }
    if let Some(text) = source.get(text_start..).filter(|t| !t.is_empty()) {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

/// The full line around `start..end` if nothing but whitespace shares it.
fn standalone(source: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let line_start = source.get(..start)?.rfind('\n').map_or(0, |i| i + 1);
    let line_end = source
        .get(end..)?
        .find('\n')
        .map_or(source.len(), |i| end + i + 1);
    let before = source.get(line_start..start)?;
    let after = source.get(end..line_end)?;
    (before.trim().is_empty() && after.trim().is_empty()).then_some((line_start, line_end))
}

/// What closed a block body.
enum Terminator {
    Else(u32),
    EndIf(u32),
    EndEach(u32),
    Eof,
}

pub(crate) fn parse(source: &str) -> Result<Vec<Node>, SyntaxError> {
    let segments = scan(source)?;
    let mut iter = segments.into_iter();
    let (nodes, end) = block(&mut iter)?;
    match end {
        Terminator::Eof => Ok(nodes),
        Terminator::Else(line) => Err((line, unexpected("{{else}}"))),
        Terminator::EndIf(line) => Err((line, unexpected("{{/if}}"))),
        Terminator::EndEach(line) => Err((line, unexpected("{{/each}}"))),
    }
}

fn unexpected(tag: &str) -> TemplateErrorKind {
    TemplateErrorKind::Syntax(format!("unexpected `{tag}`"))
}

fn block<'a>(
    iter: &mut impl Iterator<Item = Segment<'a>>,
) -> Result<(Vec<Node>, Terminator), SyntaxError> {
    let mut nodes = Vec::new();
    while let Some(segment) = iter.next() {
        let (tag, line) = match segment {
            Segment::Text(text) => {
                nodes.push(Node::Text(text.to_string()));
                continue;
            }
            Segment::Tag(tag, line) => (tag, line),
        };
        match tag {
            Tag::Comment => {}
            Tag::Interp(body) => {
                let expr = parse_expr(body).map_err(|kind| (line, kind))?;
                nodes.push(Node::Interp { expr, line });
            }
            Tag::If(args) => {
                let cond = parse_expr(args).map_err(|kind| (line, kind))?;
                let (then, end) = block(iter)?;
                let otherwise = match end {
                    Terminator::EndIf(_) => Vec::new(),
                    Terminator::Else(_) => match block(iter)? {
                        (otherwise, Terminator::EndIf(_)) => otherwise,
                        (_, other) => return Err(unclosed("if", line, &other)),
                    },
                    other => return Err(unclosed("if", line, &other)),
                };
                nodes.push(Node::If {
                    cond,
                    then,
                    otherwise,
                    line,
                });
            }
            Tag::Each(args) => {
                let (items, binding) = each_header(args).map_err(|kind| (line, kind))?;
                let body = match block(iter)? {
                    (body, Terminator::EndEach(_)) => body,
                    (_, other) => return Err(unclosed("each", line, &other)),
                };
                nodes.push(Node::Each {
                    items,
                    binding,
                    body,
                    line,
                });
            }
            Tag::Else => return Ok((nodes, Terminator::Else(line))),
            Tag::EndIf => return Ok((nodes, Terminator::EndIf(line))),
            Tag::EndEach => return Ok((nodes, Terminator::EndEach(line))),
        }
    }
    Ok((nodes, Terminator::Eof))
}

/// `expr as name`
fn each_header(args: &str) -> Result<(Expr, String), TemplateErrorKind> {
    let mut parser = ExprParser::new(args)?;
    let items = parser.pipeline()?;
    if !parser.eat_word("as") {
        return Err(TemplateErrorKind::Syntax(
            "expected `as <name>` after the list".to_string(),
        ));
    }
    let binding = parser.name()?.to_string();
    parser.finish()?;
    Ok((items, binding))
}

fn unclosed(block: &str, open_line: u32, found: &Terminator) -> SyntaxError {
    match found {
        Terminator::Eof => (
            open_line,
            TemplateErrorKind::Syntax(format!("`{{{{#{block}}}}}` is never closed")),
        ),
        Terminator::Else(line) => (*line, unexpected("{{else}}")),
        Terminator::EndIf(line) => (*line, unexpected("{{/if}}")),
        Terminator::EndEach(line) => (*line, unexpected("{{/each}}")),
    }
}
