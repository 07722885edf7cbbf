//! Read-only display tree of a data instance.
//!
//! Object keys are listed in ascending order at every level and array items
//! are numbered from 1, so equal data always renders the same regardless of
//! how it was built.

use serde_json::{Number, Value};

use crate::data::path::DataPath;

/// Text shown for `null`.
pub const EMPTY_TEXT: &str = "(empty)";

/// One renderable entry of a display tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
    /// Scalar value, labeled with its key when it belongs to an object.
    Value {
        /// Object key, if any.
        label: Option<String>,
        /// Display text of the scalar.
        text: String,
        /// Indentation level.
        depth: usize,
    },
    /// `Array (<n> items)` line opening a sequence.
    Header {
        /// Header text.
        text: String,
        /// Indentation level.
        depth: usize,
    },
    /// Labeled subtree: an object entry holding a container, or an array item.
    Branch {
        /// Object key or `Item <n>`.
        label: String,
        /// Where the subtree lives in the instance.
        path: DataPath,
        /// Indentation level.
        depth: usize,
        /// Entries of the subtree.
        children: Vec<DisplayNode>,
    },
}

/// Build the display tree of `value`, which lives at `path`.
///
/// `depth` is the indentation level of the returned entries; it only
/// affects presentation.
pub fn to_display_tree(value: &Value, path: &DataPath, depth: usize) -> Vec<DisplayNode> {
    match value {
        Value::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len() + 1);
            nodes.push(DisplayNode::Header {
                text: format!("Array ({} items)", items.len()),
                depth,
            });
            nodes.extend(items.iter().enumerate().map(|(i, item)| {
                let item_path = path.push_index(i);
                DisplayNode::Branch {
                    label: format!("Item {}", i + 1),
                    children: to_display_tree(item, &item_path, depth + 2),
                    path: item_path,
                    depth: depth + 1,
                }
            }));
            nodes
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            entries
                .into_iter()
                .map(|(key, v)| match v {
                    Value::Array(_) | Value::Object(_) => {
                        let child_path = path.push_property(key);
                        DisplayNode::Branch {
                            label: key.clone(),
                            children: to_display_tree(v, &child_path, depth + 1),
                            path: child_path,
                            depth,
                        }
                    }
                    scalar => DisplayNode::Value {
                        label: Some(key.clone()),
                        text: scalar_text(scalar),
                        depth,
                    },
                })
                .collect()
        }
        scalar => vec![DisplayNode::Value {
            label: None,
            text: scalar_text(scalar),
            depth,
        }],
    }
}

/// Render a display tree as indented text, two spaces per level.
pub fn render_text(nodes: &[DisplayNode]) -> String {
    let mut out = String::new();
    render_into(&mut out, nodes);
    out
}

fn render_into(out: &mut String, nodes: &[DisplayNode]) {
    for node in nodes {
        match node {
            DisplayNode::Value {
                label: Some(label),
                text,
                depth,
            } => out.push_str(&format!("{}{label}: {text}\n", indent(*depth))),
            DisplayNode::Value {
                label: None,
                text,
                depth,
            }
            | DisplayNode::Header { text, depth } => {
                out.push_str(&format!("{}{text}\n", indent(*depth)))
            }
            DisplayNode::Branch {
                label,
                depth,
                children,
                ..
            } => {
                out.push_str(&format!("{}{label}:\n", indent(*depth)));
                render_into(out, children);
            }
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Display text of a scalar. Whole floats print without a fraction.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_TEXT.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
