//! Field enumeration over a schema tree.
//!
//! A form renderer asks [`walk`] which controls to draw. Descriptors come out
//! depth-first in pre-order, one per object property. Arrays are reported as
//! a single field carrying their item schema: how many rows exist is a
//! property of the data, not of the schema.

use serde_json::Value;

use crate::data::{
    path::{DataPath, PathSegment},
    schema::{LeafType, SchemaNode},
};

/// What kind of input a field needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind<'a> {
    /// Nested group; its children follow it in the walk.
    Object {
        /// Child schemas of the group.
        children: &'a [(String, SchemaNode)],
    },
    /// Repeating rows built from `items`.
    Array {
        /// Item schema, if the source declared one.
        items: Option<&'a SchemaNode>,
    },
    /// Single scalar input.
    Leaf {
        /// Scalar type of the input.
        leaf_type: LeafType,
        /// Schema default, if any.
        default: Option<&'a Value>,
    },
}

impl FieldKind<'_> {
    /// `"object"`, `"array"` or `"leaf"`.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Object { .. } => "object",
            FieldKind::Array { .. } => "array",
            FieldKind::Leaf { .. } => "leaf",
        }
    }
}

/// One field found by [`walk`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<'a> {
    /// Property name, or `item` for an anonymous root.
    pub name: String,
    /// Full path of the field inside a data instance.
    pub path: DataPath,
    /// Field kind with its borrowed sub-schema.
    pub kind: FieldKind<'a>,
}

impl FieldDescriptor<'_> {
    /// Scalar type for leaf fields.
    pub fn leaf_type(&self) -> Option<LeafType> {
        match self.kind {
            FieldKind::Leaf { leaf_type, .. } => Some(leaf_type),
            _ => None,
        }
    }
}

/// Lazy pre-order iterator returned by [`walk`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    stack: Vec<(String, DataPath, &'a SchemaNode)>,
}

impl<'a> Fields<'a> {
    fn push_children(&mut self, properties: &'a [(String, SchemaNode)], prefix: &DataPath) {
        for (name, node) in properties.iter().rev() {
            self.stack
                .push((name.clone(), prefix.push_property(name), node));
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = FieldDescriptor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (name, path, node) = self.stack.pop()?;
        let kind = match node {
            SchemaNode::Object { properties } => {
                self.push_children(properties, &path);
                FieldKind::Object {
                    children: properties,
                }
            }
            SchemaNode::Array { items } => FieldKind::Array {
                items: items.as_deref(),
            },
            SchemaNode::Leaf { leaf_type, default } => FieldKind::Leaf {
                leaf_type: *leaf_type,
                default: default.as_ref(),
            },
        };
        Some(FieldDescriptor { name, path, kind })
    }
}

/// Enumerate the fields of `schema` below `prefix`.
///
/// The object passed in is not reported itself, only what it contains. A
/// non-object root is reported as one field at `prefix`. An absent schema
/// yields nothing. The walk borrows the schema and holds no other state, so
/// calling it again starts over.
pub fn walk<'a>(schema: Option<&'a SchemaNode>, prefix: &DataPath) -> Fields<'a> {
    let mut fields = Fields { stack: Vec::new() };
    match schema {
        None => {}
        Some(SchemaNode::Object { properties }) => fields.push_children(properties, prefix),
        Some(node) => {
            let name = match prefix.last() {
                Some(PathSegment::Property(name)) => name.clone(),
                _ => "item".to_string(),
            };
            fields.stack.push((name, prefix.clone(), node));
        }
    }
    fields
}

impl SchemaNode {
    /// Fields of this schema from the data root. See [`walk`].
    pub fn fields(&self) -> Fields<'_> {
        walk(Some(self), &DataPath::root())
    }
}
