//! Forge Codegen - from resource IR to files on disk.
//!
//! - [`emit`] regenerates the generated tree: it wipes it, then runs the
//!   sub-emitters in a fixed order, rendering embedded templates and
//!   formatting every generated Go file.
//! - [`scaffold`] writes the user-owned files of a resource once, and
//!   [`scaffold::diff`] previews what a fresh render would change.
//! - [`schema_hcl`] is the declarative schema handed to the migration
//!   engine.
//! - [`routes`] and [`openapi`] describe the generated HTTP surface without
//!   touching disk.

pub mod context;
mod emit;
mod error;
pub mod helpers;
pub mod openapi;
pub mod pagination;
pub mod routes;
pub mod scaffold;
pub mod schema_hcl;
pub mod template;
pub mod templates;
mod writer;

#[cfg(test)]
mod test_support;

pub use context::{columns, foreign_key_column, global_context, resource_context, EmitContext};
pub use emit::{emit, SubEmitter, SUB_EMITTERS};
pub use error::EmitError;
pub use openapi::ExportFormat;
pub use routes::{render_table, Method, Route};
pub use scaffold::{FileDiff, ScaffoldReport};
pub use template::{Template, TemplateError, TemplateErrorKind};
pub use writer::{generated_header, wipe, EmitReport, Writer, GENERATED_MARKER};
