//! Byte offset to line/column mapping.
//!
//! Builds a table of line start offsets once per file so that every
//! diagnostic position lookup is a binary search instead of a rescan.

/// Pre-computed line offset table for source positions.
///
/// # Example
///
/// ```
/// use forge_ir::LineIndex;
///
/// let source = "line1\nline2\nline3";
/// let index = LineIndex::build(source);
///
/// assert_eq!(index.line_col(source, 0), (1, 1));
/// assert_eq!(index.line_col(source, 6), (2, 1));
/// assert_eq!(index.line_text(source, 3), Some("line3"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of each line start. `offsets[0]` is always 0.
    offsets: Vec<u32>,
}

impl LineIndex {
    /// Scan the source once for newlines.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)` of `offset`.
    ///
    /// Columns count characters, not bytes, so multi-byte identifiers and
    /// string contents line up with what an editor shows.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let start = self.line_start(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(start);
        let chars = source.get(start..end).map_or(0, |s| s.chars().count());
        let col = u32::try_from(chars).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let start = self.line_start(line)? as usize;
        let end = self
            .line_start(line + 1)
            .map_or(source.len(), |next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests;
