//! Diagnostic Emitters
//!
//! Rendering is split in two: [`render`] turns one diagnostic into text
//! using a [`StyleTable`], and [`TerminalEmitter`] writes rendered text to a
//! stream. Styling never changes structure; a plain table yields the same
//! lines without ANSI sequences.

mod style;
mod terminal;

pub use style::{ColorMode, Role, Style, StyleTable};
pub use terminal::{render, render_set, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics, separated by blank lines.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a one-line summary of how many errors were reported.
    fn emit_summary(&mut self, error_count: usize);
}
