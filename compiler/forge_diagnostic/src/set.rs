use std::fmt;

use crate::emitter::{render_set, StyleTable};
use crate::Diagnostic;

/// An ordered collection of diagnostics.
///
/// Insertion order is kept; [`DiagnosticSet::sort`] orders by position when
/// diagnostics from several files were merged.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct DiagnosticSet {
    items: Vec<Diagnostic>,
}

impl DiagnosticSet {
    pub fn new() -> Self {
        DiagnosticSet { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: DiagnosticSet) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Stable sort by file, line and column.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| a.position().cmp(&b.position()));
    }

    /// Render every diagnostic with the given styles.
    pub fn render(&self, styles: &StyleTable) -> String {
        render_set(self, styles)
    }
}

impl From<Vec<Diagnostic>> for DiagnosticSet {
    fn from(items: Vec<Diagnostic>) -> Self {
        DiagnosticSet { items }
    }
}

impl FromIterator<Diagnostic> for DiagnosticSet {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        DiagnosticSet {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiagnosticSet {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticSet {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for DiagnosticSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&StyleTable::plain()))
    }
}
