use std::fmt;

use forge_ir::{LineIndex, Span};

use crate::ErrorCode;

/// Caret range under the source line: 1-based start column and a width in
/// characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Underline {
    pub start: u32,
    pub len: u32,
}

/// A compiler error with everything needed to render it.
///
/// Every positional attribute is optional; the renderer omits the blocks
/// whose data is missing.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub file: Option<String>,
    /// 1-based line.
    pub line: Option<u32>,
    /// 1-based column, counted in characters.
    pub column: Option<u32>,
    /// The full text of `line`, without its terminator.
    pub source_line: Option<String>,
    pub underline: Option<Underline>,
    /// Free text; may span several lines.
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Start building a diagnostic for `code`.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            file: None,
            line: None,
            column: None,
            source_line: None,
            underline: None,
            hint: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the 1-based line and column.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_source_line(mut self, text: impl Into<String>) -> Self {
        self.source_line = Some(text.into());
        self
    }

    pub fn with_underline(mut self, start: u32, len: u32) -> Self {
        self.underline = Some(Underline { start, len });
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Fill line, column, source line and underline from a byte span.
    ///
    /// The underline is clipped to the end of the first line the span
    /// touches and is always at least one character wide.
    pub fn with_span(self, source: &str, index: &LineIndex, span: Span) -> Self {
        let (line, column) = index.line_col(source, span.start);
        let Some(text) = index.line_text(source, line) else {
            return self.at(line, column);
        };
        let line_end = index.line_start(line).unwrap_or(0) as usize + text.len();
        let end = (span.end as usize).min(line_end).max(span.start as usize);
        let width = source
            .get(span.start as usize..end)
            .map_or(0, |s| s.chars().count());
        let width = u32::try_from(width).unwrap_or(u32::MAX).max(1);
        let text = text.to_string();
        self.at(line, column)
            .with_source_line(text)
            .with_underline(column, width)
    }

    /// Sort key: file, then line, then column.
    pub fn position(&self) -> (Option<&str>, u32, u32) {
        (
            self.file.as_deref(),
            self.line.unwrap_or(0),
            self.column.unwrap_or(0),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::emitter::render(self, &crate::emitter::StyleTable::plain()))
    }
}

#[cfg(test)]
mod tests;
