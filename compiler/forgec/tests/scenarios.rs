// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end scenarios for the `forge` command line.
//!
//! Each test builds a throwaway project in a temporary directory and runs
//! commands through the library entry points, the way `main` does. A few
//! tests run the compiled binary to check exit codes and stderr.
//!
//! # Organization
//!
//! - `common/` - project fixture and shared resource sources
//! - `generate` - emission, purity, determinism
//! - `diagnostics` - schema errors and their rendering
//! - `migrate` - the destructive-migration guard
//! - `scaffold` - scaffolding and diff preview
//! - `inspect` - routes and OpenAPI export
//! - `binary` - exit codes of the `forge` executable

#[path = "scenarios/binary.rs"]
mod binary;
#[path = "scenarios/common/mod.rs"]
mod common;
#[path = "scenarios/diagnostics.rs"]
mod diagnostics;
#[path = "scenarios/generate.rs"]
mod generate;
#[path = "scenarios/inspect.rs"]
mod inspect;
#[path = "scenarios/migrate.rs"]
mod migrate;
#[path = "scenarios/scaffold.rs"]
mod scaffold;
