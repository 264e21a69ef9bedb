//! Diagnostic system for Forge.
//!
//! A diagnostic names what went wrong (a registered [`ErrorCode`] and a
//! message), where (file, line, column, the source line and a caret range)
//! and how to fix it (an optional hint). Diagnostics are values: the
//! extractor collects them into a [`DiagnosticSet`] and keeps going, and the
//! CLI renders the whole set at the end of a run.
//!
//! Rendering is split from styling. [`emitter::render`] takes a
//! [`StyleTable`] keyed by presentation role, so non-TTY output keeps the
//! exact same structure without ANSI sequences.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod set;

pub use diagnostic::{Diagnostic, Underline};
pub use emitter::{ColorMode, DiagnosticEmitter, StyleTable, TerminalEmitter};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use set::DiagnosticSet;
