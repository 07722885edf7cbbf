//! # draftkit
//!
//! Schema-driven nested data engine for document template drafts.
//!
//! Templates describe the data they expect with a JSON Schema tree of
//! objects, arrays and scalar leaves. `draftkit` turns such a schema into
//! form fields, seeds new drafts with sample data, edits drafts through
//! dot/bracket paths, adds and removes array rows, and renders stored data
//! as a sorted, read-only tree.
//!
//! ## Features
//!
//! - Typed schema tree parsed once from JSON Schema
//! - Paths such as `customer.positions[2].name` with container auto-creation
//! - Sample data with visible placeholders, blank rows with zero values
//! - Display trees with sorted keys and numbered array items
//! - Separately owned drafts per create/edit flow, saved as JSON or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use draftkit::data::{Draft, SchemaNode, tree};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(&json!({
//!     "properties": {
//!         "customer": {"type": "object", "properties": {"name": {"type": "string"}}},
//!         "positions": {
//!             "type": "array",
//!             "items": {"type": "object", "properties": {"qty": {"type": "number"}}}
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let mut draft = Draft::create(&schema);
//! assert_eq!(
//!     draft.data(),
//!     &json!({"customer": {"name": "name_example"}, "positions": [{"qty": 0}]})
//! );
//!
//! draft.set(&"positions[0].qty".into(), json!(5));
//! draft.add_item_by_schema(&schema, &"positions".into()).unwrap();
//! println!("{}", tree::render_text(&draft.display_tree()));
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema tree, paths, generators and drafts
//! - [`error`] - Error types for file handling

#[macro_use]
extern crate log;

/// Schema-driven nested data model.
///
/// Parsing, path addressing, sample and blank-item generation, display
/// trees, and draft persistence.
pub mod data;

/// Error types and result definitions.
pub mod error;

pub use error::{DraftError, Result};
pub use serde_json::Value;
