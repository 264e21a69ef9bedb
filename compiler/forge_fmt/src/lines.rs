//! Output buffer for re-indented lines.

/// Accumulates formatted lines. Blank lines are held back until the next
/// content line, so leading and trailing blanks vanish and runs collapse to
/// a single blank line.
pub(crate) struct Lines {
    out: String,
    blank_pending: bool,
}

impl Lines {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Lines {
            out: String::with_capacity(capacity),
            blank_pending: false,
        }
    }

    pub(crate) fn blank(&mut self) {
        self.blank_pending = !self.out.is_empty();
    }

    /// Push `text` after `level` tabs.
    pub(crate) fn line(&mut self, level: usize, text: &str) {
        if std::mem::take(&mut self.blank_pending) {
            self.out.push('\n');
        }
        for _ in 0..level {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Push a line exactly as it appeared, e.g. inside a raw string.
    pub(crate) fn verbatim(&mut self, text: &str) {
        self.line(0, text);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
