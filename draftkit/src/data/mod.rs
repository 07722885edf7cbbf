//! Schema-driven nested data model.
//!
//! This module holds the engine behind template data forms:
//!
//! - Parsing JSON Schema into a typed schema tree
//! - Addressing values in a data instance with mixed dot/bracket paths
//! - Generating sample data and blank array rows from a schema
//! - Rendering data instances as read-only display trees
//!
//! ## Architecture
//!
//! - [`path`] - Path parsing and get/set on data instances
//! - [`schema`] - Schema tree types and JSON Schema parsing
//! - [`infer`] - Schema synthesis from template field names
//! - [`walker`] - Field enumeration for form rendering
//! - [`fill`] - Recursive instance construction shared by the generators
//! - [`sample`] - Sample data generation
//! - [`array`] - Blank items and array row mutation
//! - [`tree`] - Display tree rendering
//! - [`format`] - JSON/TOML file formats
//! - [`draft`] - Per-flow draft ownership and persistence

/// Blank items and array row mutation.
pub mod array;

/// Per-flow draft ownership and persistence.
pub mod draft;

/// Recursive instance construction shared by sample data and blank items.
pub mod fill;

/// JSON and TOML file formats.
pub mod format;

/// Schema synthesis from dot-notation template field names.
pub mod infer;

/// Mixed dot/bracket path parsing and value access.
pub mod path;

/// Sample data generation.
pub mod sample;

/// Schema tree types and JSON Schema parsing.
pub mod schema;

/// Display tree rendering.
pub mod tree;

/// Field enumeration over schema trees.
pub mod walker;

pub use draft::{Draft, DraftFlow, TestDataSet};
pub use path::{DataPath, PathSegment};
pub use schema::{LeafType, SchemaNode};
