//! Byte ranges into a schema source file.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `start..end` into one source file.
///
/// Offsets are `u32`; schema files never approach 4 GiB, and ranges past
/// that are clamped rather than rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Span>() == 8);

impl Span {
    /// Span of synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `offset`, used for carets at end of input.
    pub const fn point(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Span of a lexer range, clamped to `u32::MAX`.
    pub fn from_range(range: Range<usize>) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both, e.g. a call from callee to `)`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// The text under the span, or `""` when it does not fall on
    /// character boundaries of `source`.
    pub fn slice(self, source: &str) -> &str {
        source.get(self.to_range()).unwrap_or("")
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::from_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_covers_both_in_any_order() {
        let callee = Span::new(4, 10);
        let close = Span::new(21, 22);
        assert_eq!(callee.merge(close), Span::new(4, 22));
        assert_eq!(close.merge(callee), Span::new(4, 22));
    }

    #[test]
    fn from_range_clamps() {
        assert_eq!(Span::from(3..9), Span::new(3, 9));
        let huge = u32::MAX as usize + 10;
        assert_eq!(Span::from_range(huge..huge), Span::point(u32::MAX));
    }

    #[test]
    fn slice_is_total() {
        let source = "schema.String(\"Título\")";
        assert_eq!(Span::new(0, 6).slice(source), "schema");
        assert_eq!(Span::new(16, 17).slice(source), "");
        assert_eq!(Span::new(40, 50).slice(source), "");
    }

    #[test]
    fn inverted_span_is_empty() {
        assert!(Span::point(7).is_empty());
        assert_eq!(Span::new(9, 3).len(), 0);
        assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
    }
}
