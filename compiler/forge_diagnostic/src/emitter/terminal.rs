//! Terminal Emitter
//!
//! Human-readable diagnostic output:
//!
//! ```text
//! error[dynamic_value]: argument to `MaxLen` must be a literal
//!   --> resources/product/schema.go:6:32
//!     |
//!   6 |     schema.String("Title").MaxLen(maxLen),
//!     |                                   ^^^^^^
//!   = hint: replace `maxLen` with a literal value
//!   = help: forge explain dynamic_value
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{Diagnostic, DiagnosticSet};

use super::{DiagnosticEmitter, Role, StyleTable};

const HINT_LABEL: &str = "  = hint: ";

/// Render a diagnostic to a string.
///
/// Blocks whose data is missing are left out; rendering itself cannot fail.
pub fn render(diagnostic: &Diagnostic, styles: &StyleTable) -> String {
    let mut out = String::new();

    // Header: error[code]: message
    let header = format!("error[{}]", diagnostic.code.as_str());
    let _ = write!(out, "{}", styles.paint(Role::Header, &header));
    if diagnostic.message.is_empty() {
        out.push('\n');
    } else {
        let _ = writeln!(out, ": {}", diagnostic.message);
    }

    // Position
    if let Some(position) = position(diagnostic) {
        let _ = writeln!(
            out,
            "  {} {}",
            styles.paint(Role::Dim, "-->"),
            styles.paint(Role::File, &position)
        );
    }

    // Gutter block
    if let (Some(line), Some(source_line)) = (diagnostic.line, diagnostic.source_line.as_deref()) {
        let number = line.to_string();
        let padding = " ".repeat(number.len());
        let bar = styles.paint(Role::Dim, "|");

        let _ = writeln!(out, "  {padding} {bar}");
        let _ = writeln!(
            out,
            "  {} {bar} {source_line}",
            styles.paint(Role::Dim, &number)
        );

        if let Some(underline) = diagnostic.underline {
            let lead = caret_padding(source_line, underline.start);
            let carets = "^".repeat(underline.len.max(1) as usize);
            let _ = writeln!(
                out,
                "  {padding} {bar} {lead}{}",
                styles.paint(Role::Underline, &carets)
            );
        }
    }

    // Hint, continuation lines aligned under the first
    if let Some(hint) = diagnostic.hint.as_deref() {
        let indent = " ".repeat(HINT_LABEL.len());
        for (i, text) in hint.lines().enumerate() {
            if i == 0 {
                let _ = writeln!(out, "  = {}: {text}", styles.paint(Role::Hint, "hint"));
            } else {
                let _ = writeln!(out, "{indent}{text}");
            }
        }
    }

    let _ = writeln!(
        out,
        "  = {}: {}",
        styles.paint(Role::Hint, "help"),
        diagnostic.code.help_pointer()
    );

    out
}

/// Render a set, diagnostics separated by blank lines.
pub fn render_set(set: &DiagnosticSet, styles: &StyleTable) -> String {
    set.iter()
        .map(|d| render(d, styles))
        .collect::<Vec<_>>()
        .join("\n")
}

fn position(diagnostic: &Diagnostic) -> Option<String> {
    match (diagnostic.file.as_deref(), diagnostic.line) {
        (Some(file), Some(line)) => Some(format!(
            "{file}:{line}:{}",
            diagnostic.column.unwrap_or(1)
        )),
        (Some(file), None) => Some(file.to_string()),
        (None, Some(line)) => Some(format!("{line}:{}", diagnostic.column.unwrap_or(1))),
        (None, None) => None,
    }
}

/// Whitespace that lines the carets up with column `start` of `line`.
///
/// Tabs in the source are reproduced so the terminal expands both rows the
/// same way.
fn caret_padding(line: &str, start: u32) -> String {
    let want = start.saturating_sub(1) as usize;
    let mut lead: String = line
        .chars()
        .take(want)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let have = lead.chars().count();
    lead.extend(std::iter::repeat(' ').take(want.saturating_sub(have)));
    lead
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Terminal emitter over any writer.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    styles: StyleTable,
    emitted: usize,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, styles: StyleTable) -> Self {
        TerminalEmitter {
            writer,
            styles,
            emitted: 0,
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    ///
    /// * `is_tty` - Whether stderr is a TTY (used for `ColorMode::Auto`)
    pub fn stderr(mode: super::ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::new(io::stderr(), StyleTable::for_mode(mode, is_tty))
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if self.emitted > 0 {
            let _ = writeln!(self.writer);
        }
        let _ = write!(self.writer, "{}", render(diagnostic, &self.styles));
        self.emitted += 1;
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        let _ = writeln!(
            self.writer,
            "\n{}: aborting due to {error_count} error{}",
            self.styles.paint(Role::Header, "error"),
            plural_s(error_count)
        );
    }
}
