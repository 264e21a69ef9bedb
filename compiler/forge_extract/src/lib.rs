//! Forge Extract - from resource source files to validated IR.
//!
//! Pipeline per run:
//! 1. [`extract`] reads each file's `Define` calls into resources, applying
//!    the literal rule to every argument.
//! 2. [`validate`] checks the resource set as a whole.
//! 3. [`check_policy`] checks modifier/type combinations.
//!
//! [`parse_dir`] runs all three over a resource tree. Problems are returned
//! as diagnostics alongside whatever IR could be built.

mod driver;
mod extractor;
mod literal;
mod policy;
mod sources;
mod validate;

pub use driver::{parse_dir, parse_files, schema_files, ParseOutput, SCHEMA_FILE};
pub use extractor::{dsl_namespace, extract, is_pascal_identifier, Extraction, DEFAULT_NAMESPACE};
pub use policy::{check_policy, default_fits, not_applicable};
pub use sources::SourceMap;
pub use validate::validate;
