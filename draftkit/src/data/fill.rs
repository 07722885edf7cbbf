//! Recursive instance construction shared by sample data and blank items.
//!
//! Both walk a schema the same way: objects become mappings of their
//! properties, leaves with a `default` take it verbatim. What differs is the
//! value a leaf gets without a default and how an array is seeded; that is
//! the [`LeafFill`] strategy.

use serde_json::{Map, Value};

use crate::data::schema::{LeafType, SchemaNode};

/// Name given to leaves that have no enclosing property, such as the schema
/// root or array items.
pub const ANONYMOUS: &str = "item";

/// Values for the parts of an instance the schema leaves open.
pub trait LeafFill {
    /// Value for a leaf without a `default`.
    fn leaf(&self, name: &str, leaf_type: LeafType) -> Value;

    /// Value for an array with the given item schema.
    fn array(&self, items: Option<&SchemaNode>) -> Value;
}

/// Build an instance of `schema`.
///
/// `name` is the property name the node lives under. Properties whose value
/// comes out as `null` (an explicit `"default": null`) are left out of their
/// object.
pub fn build<F: LeafFill + ?Sized>(schema: &SchemaNode, name: &str, fill: &F) -> Value {
    match schema {
        SchemaNode::Leaf {
            default: Some(default),
            ..
        } => default.clone(),
        SchemaNode::Leaf {
            leaf_type,
            default: None,
        } => fill.leaf(name, *leaf_type),
        SchemaNode::Object { properties } => {
            let map: Map<String, Value> = properties
                .iter()
                .filter_map(|(prop, node)| {
                    let value = build(node, prop, fill);
                    (!value.is_null()).then(|| (prop.clone(), value))
                })
                .collect();
            Value::Object(map)
        }
        SchemaNode::Array { items } => fill.array(items.as_deref()),
    }
}
