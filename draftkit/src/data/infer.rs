//! Schema synthesis from template field names.
//!
//! Document templates only expose flat, dot-notation user field names such
//! as `customer.name` plus the paths of their repetition groups. This module
//! folds those into a nested [`SchemaNode`]: every dotted prefix becomes an
//! object, prefixes named as repetition groups become arrays of objects, and
//! the final part becomes a leaf typed by [`infer_leaf_type`].

use std::collections::HashSet;

use crate::data::schema::{LeafType, SchemaNode};

const NUMBER_HINTS: &[&str] = &[
    "price",
    "amount",
    "quantity",
    "total",
    "rate",
    "discount",
    "tax",
    "fee",
    "cost",
    "salary",
    "paymentterms",
    "daysterm",
    "percent",
    "weight",
    "height",
    "width",
    "depth",
    "volume",
    "area",
    "temperature",
];

const BOOLEAN_HINTS: &[&str] = &[
    "active",
    "enabled",
    "deleted",
    "flag",
    "checked",
    "success",
    "valid",
    "approved",
    "confirmed",
    "required",
];

/// Build a schema from dot-notation field names and repetition-group paths.
///
/// Field names are merged in order and duplicates are ignored. A node created
/// by an earlier name is reused when it already has the kind a later name
/// needs; a leaf that turns out to be a prefix of another name is promoted to
/// a container.
///
/// ```rust
/// use draftkit::data::infer::infer_schema;
/// use serde_json::json;
///
/// let schema = infer_schema(&["customer.name", "items.price"], &["items"]);
/// assert_eq!(
///     schema.to_value()["properties"]["items"]["items"]["properties"]["price"],
///     json!({"type": "number"})
/// );
/// ```
pub fn infer_schema<F, A>(field_names: &[F], array_paths: &[A]) -> SchemaNode
where
    F: AsRef<str>,
    A: AsRef<str>,
{
    let arrays: HashSet<&str> = array_paths.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();
    let mut root = Vec::new();

    for name in field_names.iter().map(AsRef::as_ref) {
        if !seen.insert(name) {
            continue;
        }
        let parts: Vec<&str> = name.split('.').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            debug!("skipping empty field name");
            continue;
        }
        add_property(&mut root, &parts, 0, &arrays);
    }

    SchemaNode::Object { properties: root }
}

/// Guess a leaf type from a field name.
///
/// Numeric keywords win over boolean ones; everything else is a string.
/// Ambiguous names such as `number` or `id` stay strings because templates
/// mostly use them for identifiers.
pub fn infer_leaf_type(name: &str) -> LeafType {
    let lower = name.to_lowercase();
    if NUMBER_HINTS.iter().any(|hint| lower.contains(hint)) {
        return LeafType::Number;
    }
    if BOOLEAN_HINTS.iter().any(|hint| lower.contains(hint)) || has_flag_prefix(name) {
        return LeafType::Boolean;
    }
    LeafType::String
}

/// `isPaid`, `hasDiscount`, `is_open`: a camel-case or snake-case predicate.
fn has_flag_prefix(name: &str) -> bool {
    ["is", "has"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_uppercase() || c == '_')
    })
}

fn add_property(
    properties: &mut Vec<(String, SchemaNode)>,
    parts: &[&str],
    depth: usize,
    arrays: &HashSet<&str>,
) {
    let part = parts[depth];
    let full_path = parts[..=depth].join(".");
    let is_array = arrays.contains(full_path.as_str());
    let is_last = depth == parts.len() - 1;

    let pos = properties.iter().position(|(n, _)| n == part);
    let existing = pos.map(|i| &properties[i].1);

    let wanted_kind_exists = match existing {
        Some(SchemaNode::Array { .. }) => is_array,
        Some(SchemaNode::Object { .. }) => !is_array && !is_last,
        Some(SchemaNode::Leaf { .. }) => !is_array && is_last,
        None => false,
    };

    let idx = match pos {
        Some(i) if wanted_kind_exists || (is_last && !is_array) => i,
        Some(i) => {
            trace!("promoting `{full_path}` to a container");
            properties[i].1 = empty_node(is_array);
            i
        }
        None => {
            let node = if is_last && !is_array {
                SchemaNode::leaf(infer_leaf_type(part))
            } else {
                empty_node(is_array)
            };
            properties.push((part.to_string(), node));
            properties.len() - 1
        }
    };

    if is_last {
        return;
    }

    match &mut properties[idx].1 {
        SchemaNode::Object { properties: nested } => {
            add_property(nested, parts, depth + 1, arrays);
        }
        SchemaNode::Array { items } => {
            if let Some(SchemaNode::Object { properties: nested }) = items.as_deref_mut() {
                add_property(nested, parts, depth + 1, arrays);
            }
        }
        SchemaNode::Leaf { .. } => {}
    }
}

/// An array of empty objects, or an empty object.
fn empty_node(is_array: bool) -> SchemaNode {
    let obj = SchemaNode::Object {
        properties: Vec::new(),
    };
    if is_array { SchemaNode::array(obj) } else { obj }
}
