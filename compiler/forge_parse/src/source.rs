//! Source files with position lookup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_ir::{LineIndex, Span};

use crate::{ast, ParseError};

/// A source file held in memory with its line table.
///
/// Owns the raw text so diagnostics can quote the exact source line.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    index: LineIndex,
}

impl SourceFile {
    /// Wrap in-memory source, tagged with a display path.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let index = LineIndex::build(&text);
        SourceFile {
            path: path.into(),
            text,
            index,
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// 1-based `(line, column)` of a span's start.
    pub fn line_col(&self, span: Span) -> (u32, u32) {
        self.index.line_col(&self.text, span.start)
    }

    pub fn line(&self, span: Span) -> u32 {
        self.index.line(span.start)
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        span.slice(&self.text)
    }

    /// A diagnostic pre-filled with this file's path and the span's position.
    pub fn diagnostic(&self, code: ErrorCode, span: Span) -> Diagnostic {
        Diagnostic::error(code)
            .in_file(self.path.display().to_string())
            .with_span(&self.text, &self.index, span)
    }

    /// Parse this file.
    pub fn parse(&self) -> Result<ast::File, ParseError> {
        crate::parse(&self.text)
    }
}
