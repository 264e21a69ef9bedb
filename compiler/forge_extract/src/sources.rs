//! Source lookup for diagnostics raised after extraction.
//!
//! Validation works on IR, which only records line numbers. The map keeps
//! every parsed file so those diagnostics can still quote the source line
//! and underline the relevant token.

use std::path::{Path, PathBuf};

use forge_diagnostic::{Diagnostic, ErrorCode};
use forge_parse::SourceFile;
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct SourceMap {
    files: FxHashMap<PathBuf, SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap::default()
    }

    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.path().to_path_buf(), file);
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// A diagnostic at `line` of `path`.
    ///
    /// When `needle` occurs on that line the underline covers it; otherwise
    /// it covers the line's text without indentation. Unknown files produce
    /// a diagnostic with only the file and line set.
    pub fn line_diagnostic(
        &self,
        code: ErrorCode,
        path: &Path,
        line: u32,
        needle: Option<&str>,
    ) -> Diagnostic {
        let diag = Diagnostic::error(code).in_file(path.display().to_string());
        let Some(text) = self
            .get(path)
            .and_then(|file| file.line_index().line_text(file.text(), line))
        else {
            return Diagnostic {
                line: Some(line),
                ..diag
            };
        };

        let indent = text.len() - text.trim_start().len();
        let (start, width) = match needle.and_then(|n| text.find(n).map(|at| (at, n))) {
            Some((at, n)) => (at, n.chars().count()),
            None => (indent, text.trim().chars().count()),
        };
        let column = char_column(text, start);
        let width = u32::try_from(width).unwrap_or(u32::MAX).max(1);
        diag.at(line, column)
            .with_source_line(text)
            .with_underline(column, width)
    }
}

/// 1-based character column of a byte offset within `text`.
fn char_column(text: &str, byte: usize) -> u32 {
    let chars = text.get(..byte).map_or(0, |s| s.chars().count());
    u32::try_from(chars).unwrap_or(u32::MAX).saturating_add(1)
}
