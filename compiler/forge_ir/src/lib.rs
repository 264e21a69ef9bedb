//! Forge IR - Intermediate Representation Types
//!
//! This crate contains the data the rest of the compiler passes around:
//! - Spans for source locations
//! - A line index for turning byte offsets into line/column positions
//! - The resource model produced by the extractor and consumed by codegen
//!
//! Resource types are plain values. They are built once by the extractor,
//! validated once, and then read by every emitter without mutation. Ordering
//! of fields, relationships and modifiers is exactly the source order.

mod line_index;
mod resource;
mod span;

pub use line_index::LineIndex;
pub use resource::{
    Field, FieldType, Hooks, JobRef, Literal, Modifier, ModifierKind, OnDeleteAction, Operation,
    Options, Relationship, RelationshipKind, Resource,
};
pub use span::Span;
