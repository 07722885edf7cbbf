//! Adding and removing rows of array-valued fields.
//!
//! New rows are blank items: the same shape [`sample`](crate::data::sample)
//! would build, but filled with zero values so the user edits from empty
//! rather than from placeholder text.

use serde_json::Value;

use crate::data::{
    fill::{self, ANONYMOUS, LeafFill},
    path::{self, DataPath, Overwrite, kind_name},
    schema::{LeafType, SchemaNode},
};

/// [`LeafFill`] producing zero values. Nested arrays start empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankFill;

impl LeafFill for BlankFill {
    fn leaf(&self, _name: &str, leaf_type: LeafType) -> Value {
        match leaf_type {
            LeafType::String => Value::String(String::new()),
            LeafType::Number | LeafType::Integer => Value::from(0),
            LeafType::Boolean => Value::Bool(false),
        }
    }

    fn array(&self, _items: Option<&SchemaNode>) -> Value {
        Value::Array(Vec::new())
    }
}

/// Row appended by [`add_item`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedItem {
    /// Index of the new row.
    pub index: usize,
    /// Values dropped while creating the array, see [`path::set`].
    pub overwrites: Vec<Overwrite>,
}

/// A zero-valued instance of `item_schema`.
pub fn create_blank_item(item_schema: &SchemaNode) -> Value {
    fill::build(item_schema, ANONYMOUS, &BlankFill)
}

/// Append a blank item to the array at `array_path`.
///
/// A missing array is created. A value of another kind at the path is
/// treated as an empty array and replaced, and reported like any other
/// overwrite. Returns `None` when [`path::set`] refuses the path.
pub fn add_item(
    data: &mut Value,
    array_path: &DataPath,
    item_schema: &SchemaNode,
) -> Option<AddedItem> {
    let blank = create_blank_item(item_schema);

    if let Some(Value::Array(items)) = path::get_mut(data, array_path) {
        items.push(blank);
        return Some(AddedItem {
            index: items.len() - 1,
            overwrites: Vec::new(),
        });
    }

    let existing = path::get(data, array_path)
        .filter(|existing| !existing.is_null())
        .cloned();
    if let Some(existing) = &existing {
        warn!(
            "`{array_path}` holds a {} instead of an array, starting a new one",
            kind_name(existing)
        );
    }
    let mut overwrites = path::set(data, array_path, Value::Array(vec![blank]))?;
    // `set` assigns the final slot without reporting it.
    if let Some(replaced) = existing {
        overwrites.push(Overwrite {
            at: array_path.clone(),
            replaced,
        });
    }
    Some(AddedItem {
        index: 0,
        overwrites,
    })
}

/// Remove and return the item at `index` of the array at `array_path`.
///
/// Nothing is written when there is no array at the path or `index` is out
/// of range. Remaining items keep their order.
pub fn remove_item(data: &mut Value, array_path: &DataPath, index: usize) -> Option<Value> {
    let Some(Value::Array(items)) = path::get_mut(data, array_path) else {
        debug!("no array at `{array_path}`, nothing to remove");
        return None;
    };
    if index >= items.len() {
        debug!(
            "index {index} out of range for `{array_path}` ({} items)",
            items.len()
        );
        return None;
    }
    Some(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn qty_item() -> SchemaNode {
        SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {"qty": {"type": "number"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_add_item_appends_blank() {
        let mut data = json!({"positions": [{"qty": 5}]});
        let added = add_item(&mut data, &"positions".into(), &qty_item()).unwrap();
        assert_eq!(added.index, 1);
        assert!(added.overwrites.is_empty());
        assert_eq!(data, json!({"positions": [{"qty": 5}, {"qty": 0}]}));
    }

    #[test]
    fn test_remove_item() {
        let mut data = json!({"positions": [{"qty": 5}, {"qty": 0}]});
        let removed = remove_item(&mut data, &"positions".into(), 0);
        assert_eq!(removed, Some(json!({"qty": 5})));
        assert_eq!(data, json!({"positions": [{"qty": 0}]}));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut data = json!({"positions": [1, 2]});
        assert_eq!(remove_item(&mut data, &"positions".into(), 2), None);
        assert_eq!(data, json!({"positions": [1, 2]}));

        let mut data = json!({});
        assert_eq!(remove_item(&mut data, &"positions".into(), 0), None);
        assert_eq!(data, json!({}));
    }

    #[test]
    fn test_add_then_remove_restores() {
        let mut data = json!({"order": {"lines": [{"qty": 1}, {"qty": 2}]}});
        let before = data.clone();
        let lines = DataPath::parse("order.lines");
        let idx = add_item(&mut data, &lines, &qty_item()).unwrap().index;
        let len = path::get(&data, &lines).and_then(Value::as_array).map(Vec::len);
        assert_eq!(len, Some(3));
        remove_item(&mut data, &lines, idx);
        assert_eq!(data, before);
    }

    #[test]
    fn test_add_creates_missing_array() {
        let mut data = json!({});
        add_item(&mut data, &"order.lines".into(), &qty_item());
        assert_eq!(data, json!({"order": {"lines": [{"qty": 0}]}}));
    }

    #[test]
    fn test_add_replaces_non_array() {
        let mut data = json!({"lines": "n/a"});
        let added = add_item(&mut data, &"lines".into(), &qty_item()).unwrap();
        assert_eq!(data, json!({"lines": [{"qty": 0}]}));
        assert_eq!(
            added.overwrites,
            vec![Overwrite {
                at: "lines".into(),
                replaced: json!("n/a"),
            }]
        );
    }

    #[test]
    fn test_add_reports_overwritten_parents() {
        let mut data = json!({"order": 7});
        let added = add_item(&mut data, &"order.lines".into(), &qty_item()).unwrap();
        assert_eq!(added.index, 0);
        assert_eq!(data, json!({"order": {"lines": [{"qty": 0}]}}));
        assert_eq!(
            added.overwrites,
            vec![Overwrite {
                at: "order".into(),
                replaced: json!(7),
            }]
        );
    }

    #[test]
    fn test_add_under_unreachable_index_is_noop() {
        let mut data = json!({"groups": [{"rows": []}]});
        let before = data.clone();
        let path = DataPath::parse("groups[99999999999999999999].rows");
        assert_eq!(add_item(&mut data, &path, &qty_item()), None);
        assert_eq!(data, before);
    }

    #[test]
    fn test_add_into_nested_row() {
        let mut data = json!({"groups": [{"rows": []}, {"rows": [{"qty": 3}]}]});
        add_item(&mut data, &"groups[1].rows".into(), &qty_item());
        assert_eq!(
            data,
            json!({"groups": [{"rows": []}, {"rows": [{"qty": 3}, {"qty": 0}]}]})
        );
    }

    #[test]
    fn test_blank_item_shape() {
        let schema = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "label": {"type": "string"},
                "unit": {"type": "string", "default": "pcs"},
                "count": {"type": "integer"},
                "taxed": {"type": "boolean"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "dims": {"type": "object", "properties": {"w": {"type": "number"}}},
                "extra": {"type": "object"}
            }
        }))
        .unwrap();
        assert_eq!(
            create_blank_item(&schema),
            json!({
                "label": "",
                "unit": "pcs",
                "count": 0,
                "taxed": false,
                "tags": [],
                "dims": {"w": 0},
                "extra": {}
            })
        );
    }
}
