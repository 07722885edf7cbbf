//! Placeholder data for seeding new drafts.
//!
//! Sample values are meant to look like placeholders: strings read
//! `<field>_example`, numbers are `0`, booleans `false`, and every array gets
//! exactly one representative row so the shape of repeated sections is
//! visible.

use serde_json::{Map, Value};

use crate::data::{
    fill::{self, ANONYMOUS, LeafFill},
    schema::{LeafType, SchemaNode},
};

/// [`LeafFill`] producing visible placeholder values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleFill;

impl LeafFill for SampleFill {
    fn leaf(&self, name: &str, leaf_type: LeafType) -> Value {
        match leaf_type {
            LeafType::String => Value::String(format!("{name}_example")),
            LeafType::Number | LeafType::Integer => Value::from(0),
            LeafType::Boolean => Value::Bool(false),
        }
    }

    fn array(&self, items: Option<&SchemaNode>) -> Value {
        match items {
            Some(items) => Value::Array(vec![fill::build(items, ANONYMOUS, self)]),
            None => Value::Array(Vec::new()),
        }
    }
}

/// Generate a sample instance of `schema`.
///
/// Deterministic: the same schema always yields an equal value.
pub fn generate(schema: &SchemaNode) -> Value {
    fill::build(schema, ANONYMOUS, &SampleFill)
}

/// Parse a JSON Schema and generate a sample instance.
///
/// Input that is not a schema object yields an empty object.
pub fn generate_from_value(schema: &Value) -> Value {
    match SchemaNode::from_value(schema) {
        Some(node) => generate(&node),
        None => {
            debug!("no usable schema, sample is empty");
            Value::Object(Map::new())
        }
    }
}
