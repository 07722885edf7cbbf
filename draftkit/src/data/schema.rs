//! Schema tree parsed from JSON Schema.
//!
//! The template metadata service hands out a JSON Schema subset: `object`
//! nodes with `properties`, `array` nodes with `items`, and scalar leaves
//! with an optional `default`. It is classified once into [`SchemaNode`],
//! so the rest of the engine matches on variants instead of `type` strings.

use serde_json::{Map, Value, json};

use crate::data::path::{DataPath, PathSegment};

/// Scalar type of a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafType {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"integer"`
    Integer,
    /// `"boolean"`
    Boolean,
}

impl LeafType {
    /// Resolve a JSON Schema `type` keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(LeafType::String),
            "number" => Some(LeafType::Number),
            "integer" => Some(LeafType::Integer),
            "boolean" => Some(LeafType::Boolean),
            _ => None,
        }
    }

    /// The JSON Schema `type` keyword for this leaf.
    pub fn name(&self) -> &'static str {
        match self {
            LeafType::String => "string",
            LeafType::Number => "number",
            LeafType::Integer => "integer",
            LeafType::Boolean => "boolean",
        }
    }

    /// Leaf type matching a JSON value, if it is a scalar.
    pub fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(LeafType::String),
            Value::Number(n) if n.is_f64() => Some(LeafType::Number),
            Value::Number(_) => Some(LeafType::Integer),
            Value::Bool(_) => Some(LeafType::Boolean),
            _ => None,
        }
    }
}

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Mapping with named children, in declaration order.
    Object {
        /// Child schemas keyed by property name.
        properties: Vec<(String, SchemaNode)>,
    },
    /// Sequence of items sharing one schema.
    Array {
        /// Item schema; `None` when the source had none or it was malformed.
        items: Option<Box<SchemaNode>>,
    },
    /// Scalar value.
    Leaf {
        /// Scalar type.
        leaf_type: LeafType,
        /// Explicit `default`, kept verbatim (including `null`).
        default: Option<Value>,
    },
}

impl SchemaNode {
    /// Object node from `(name, schema)` pairs.
    pub fn object<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        SchemaNode::Object {
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }
    }

    /// Array node with the given item schema.
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Some(Box::new(items)),
        }
    }

    /// Leaf node without a default.
    pub fn leaf(leaf_type: LeafType) -> Self {
        SchemaNode::Leaf {
            leaf_type,
            default: None,
        }
    }

    /// Leaf node with an explicit default.
    pub fn leaf_with_default(leaf_type: LeafType, default: Value) -> Self {
        SchemaNode::Leaf {
            leaf_type,
            default: Some(default),
        }
    }

    /// Parse a JSON Schema value.
    ///
    /// Returns `None` when `value` is not a JSON object. Missing or malformed
    /// `properties` count as empty and malformed `items` as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let ty = type_keyword(obj);

        if ty == Some("object") || obj.contains_key("properties") {
            let properties = obj
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .filter_map(|(name, prop)| match Self::from_value(prop) {
                            Some(node) => Some((name.clone(), node)),
                            None => {
                                warn!("skipping malformed schema for property `{name}`: {prop}");
                                None
                            }
                        })
                        .collect()
                })
                .unwrap_or_default();
            return Some(SchemaNode::Object { properties });
        }

        if ty == Some("array") || obj.contains_key("items") {
            let items = obj.get("items").and_then(Self::from_value).map(Box::new);
            return Some(SchemaNode::Array { items });
        }

        let default = obj.get("default").cloned();
        let leaf_type = ty
            .and_then(LeafType::from_name)
            .or_else(|| default.as_ref().and_then(LeafType::of_value))
            .unwrap_or(LeafType::String);
        Some(SchemaNode::Leaf { leaf_type, default })
    }

    /// Render back to JSON Schema.
    pub fn to_value(&self) -> Value {
        match self {
            SchemaNode::Object { properties } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_value()))
                    .collect();
                json!({"type": "object", "properties": props})
            }
            SchemaNode::Array { items: Some(items) } => {
                json!({"type": "array", "items": items.to_value()})
            }
            SchemaNode::Array { items: None } => json!({"type": "array"}),
            SchemaNode::Leaf { leaf_type, default } => {
                let mut v = json!({"type": leaf_type.name()});
                if let (Some(default), Some(obj)) = (default, v.as_object_mut()) {
                    obj.insert("default".to_string(), default.clone());
                }
                v
            }
        }
    }

    /// Child schema of an object node.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object { properties } => properties
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Item schema of an array node.
    pub fn items(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Array { items } => items.as_deref(),
            _ => None,
        }
    }

    /// Schema describing the data at `path`.
    ///
    /// Index segments step into an array's items. A property segment applied
    /// to an array steps into its items first, so `positions.qty` and
    /// `positions[0].qty` resolve to the same leaf.
    pub fn lookup(&self, path: &DataPath) -> Option<&SchemaNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, seg| match (node, seg) {
                (SchemaNode::Array { .. }, PathSegment::Property(name)) => {
                    node.items()?.property(name)
                }
                (_, PathSegment::Property(name)) => node.property(name),
                (_, PathSegment::Index(_)) => node.items(),
            })
    }
}

/// The `type` keyword, taking the first non-null entry of a type list.
fn type_keyword(obj: &Map<String, Value>) -> Option<&str> {
    match obj.get("type")? {
        Value::String(s) => Some(s.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}
