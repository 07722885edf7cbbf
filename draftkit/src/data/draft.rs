//! Drafts owned by one editing flow.
//!
//! Creating a new test data set and editing a stored one each get their own
//! [`Draft`]. Every engine call goes through the draft it edits, so two open
//! flows can never write into each other's data.

use std::{
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    data::{
        array::{self, AddedItem},
        format::{self, DataFormat},
        path::{self, DataPath, Overwrite},
        sample,
        schema::SchemaNode,
        tree::{self, DisplayNode},
    },
    error::{DraftError, Result},
};

/// Which flow a draft belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftFlow {
    /// A new data set seeded from sample data.
    Create,
    /// An existing data set.
    Edit {
        /// Identifier of the stored data set.
        id: String,
    },
}

/// A data instance being edited, together with its flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    flow: DraftFlow,
    data: Value,
    dirty: bool,
}

/// Wire payload for storing a draft as a named test data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDataSet {
    /// Display name of the data set.
    pub name: String,
    /// The draft data.
    pub test_data: Value,
}

impl Draft {
    /// Start a create flow seeded with sample data for `schema`.
    pub fn create(schema: &SchemaNode) -> Self {
        Self {
            flow: DraftFlow::Create,
            data: sample::generate(schema),
            dirty: false,
        }
    }

    /// Start an edit flow on stored data.
    pub fn edit(id: impl Into<String>, data: Value) -> Self {
        Self {
            flow: DraftFlow::Edit { id: id.into() },
            data,
            dirty: false,
        }
    }

    /// Load a JSON or TOML file into an edit flow keyed by its path.
    pub fn load(path: &Path) -> Result<Self> {
        let data = format::read_value(path)?;
        info!("loaded draft from {}", path.display());
        Ok(Self::edit(path.display().to_string(), data))
    }

    /// Write the draft to a JSON or TOML file.
    ///
    /// An existing file is first copied to `<name>.bk-<unix secs>.<ext>`.
    /// Clears the dirty flag on success.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let format = DataFormat::from_path(path)?;
        let content = format.render(&self.data)?;
        let io_err = |source| DraftError::Io {
            path: path.to_path_buf(),
            source,
        };

        if path.exists() {
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            let backup = path.with_extension(format!("bk-{secs}.{ext}"));
            fs::copy(path, &backup).map_err(io_err)?;
            debug!("backed up {} to {}", path.display(), backup.display());
        }
        fs::write(path, content).map_err(io_err)?;
        info!("saved draft to {}", path.display());
        self.dirty = false;
        Ok(())
    }

    /// The flow this draft belongs to.
    pub fn flow(&self) -> &DraftFlow {
        &self.flow
    }

    /// Current data.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Whether the data changed since creation or the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Value at `path`, if present.
    pub fn get(&self, path: &DataPath) -> Option<&Value> {
        path::get(&self.data, path)
    }

    /// Write `value` at `path`. See [`path::set`].
    pub fn set(&mut self, path: &DataPath, value: Value) -> Option<Vec<Overwrite>> {
        let overwrites = path::set(&mut self.data, path, value)?;
        self.dirty = true;
        Some(overwrites)
    }

    /// Append a blank row to the array at `array_path`. See [`array::add_item`].
    pub fn add_item(
        &mut self,
        array_path: &DataPath,
        item_schema: &SchemaNode,
    ) -> Option<AddedItem> {
        let added = array::add_item(&mut self.data, array_path, item_schema)?;
        self.dirty = true;
        Some(added)
    }

    /// Append a blank row, taking the item schema from the draft's root schema.
    pub fn add_item_by_schema(
        &mut self,
        schema: &SchemaNode,
        array_path: &DataPath,
    ) -> Result<AddedItem> {
        let items = schema
            .lookup(array_path)
            .and_then(SchemaNode::items)
            .ok_or_else(|| DraftError::MissingSchema(array_path.to_string()))?;
        self.add_item(array_path, items)
            .ok_or_else(|| DraftError::UnreachablePath(array_path.to_string()))
    }

    /// Remove row `index` of the array at `array_path`.
    pub fn remove_item(&mut self, array_path: &DataPath, index: usize) -> Option<Value> {
        let removed = array::remove_item(&mut self.data, array_path, index);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Display tree of the current data.
    pub fn display_tree(&self) -> Vec<DisplayNode> {
        tree::to_display_tree(&self.data, &DataPath::root(), 0)
    }

    /// Payload for storing the draft under `name`.
    pub fn to_test_data_set(&self, name: impl Into<String>) -> TestDataSet {
        TestDataSet {
            name: name.into(),
            test_data: self.data.clone(),
        }
    }

    /// Give up the draft and keep its data.
    pub fn into_data(self) -> Value {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaNode {
        SchemaNode::from_value(&json!({
            "properties": {
                "customer": {"type": "object", "properties": {"name": {"type": "string"}}},
                "positions": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"qty": {"type": "number"}}}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_create_and_edit_are_independent() {
        let schema = schema();
        let mut create = Draft::create(&schema);
        let mut edit = Draft::edit("42", json!({"customer": {"name": "Ada"}}));

        create.set(&"customer.name".into(), json!("Bob"));
        edit.add_item_by_schema(&schema, &"positions".into()).unwrap();

        assert_eq!(create.flow(), &DraftFlow::Create);
        assert_eq!(
            create.data(),
            &json!({"customer": {"name": "Bob"}, "positions": [{"qty": 0}]})
        );
        assert_eq!(
            edit.into_data(),
            json!({"customer": {"name": "Ada"}, "positions": [{"qty": 0}]})
        );
    }

    #[test]
    fn test_dirty_tracking() {
        let mut draft = Draft::create(&schema());
        assert!(!draft.is_dirty());
        assert_eq!(draft.remove_item(&"positions".into(), 9), None);
        assert!(!draft.is_dirty());
        assert!(draft.remove_item(&"positions".into(), 0).is_some());
        assert!(draft.is_dirty());

        let mut draft = Draft::edit("7", json!({"positions": []}));
        assert_eq!(draft.set(&"positions[99999999999999999999]".into(), json!(1)), None);
        assert!(!draft.is_dirty());
        assert_eq!(draft.data(), &json!({"positions": []}));
    }

    #[test]
    fn test_add_item_without_schema() {
        let mut draft = Draft::create(&schema());
        let err = draft
            .add_item_by_schema(&schema(), &"customer.name".into())
            .unwrap_err();
        assert!(matches!(err, DraftError::MissingSchema(p) if p == "customer.name"));
    }

    #[test]
    fn test_add_item_at_unreachable_path() {
        let schema = SchemaNode::from_value(&json!({
            "properties": {
                "groups": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "rows": {"type": "array", "items": {"type": "string"}}
                        }
                    }
                }
            }
        }))
        .unwrap();
        let mut draft = Draft::edit("g", json!({"groups": []}));
        let err = draft
            .add_item_by_schema(&schema, &"groups[20000].rows".into())
            .unwrap_err();
        assert!(matches!(err, DraftError::UnreachablePath(p) if p == "groups[20000].rows"));
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_payload_shape() {
        let draft = Draft::edit("1", json!({"a": 1}));
        let payload = serde_json::to_value(draft.to_test_data_set("smoke")).unwrap();
        assert_eq!(payload, json!({"name": "smoke", "testData": {"a": 1}}));
    }

    #[test]
    fn test_save_and_load_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("draft.json");

        let mut draft = Draft::create(&schema());
        draft.set(&"customer.name".into(), json!("Ada"));
        draft.save(&file).unwrap();
        assert!(!draft.is_dirty());

        let mut loaded = Draft::load(&file).unwrap();
        assert_eq!(loaded.data(), draft.data());
        assert!(matches!(loaded.flow(), DraftFlow::Edit { .. }));

        loaded.add_item_by_schema(&schema(), &"positions".into()).unwrap();
        loaded.save(&file).unwrap();

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bk-"))
            .count();
        assert_eq!(backups, 1);
        assert_eq!(
            Draft::load(&file).unwrap().get(&"positions[1].qty".into()),
            Some(&json!(0))
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("draft.toml");
        let mut draft = Draft::edit("t", json!({"title": "Offer", "rows": [{"qty": 1}]}));
        draft.save(&file).unwrap();
        assert_eq!(Draft::load(&file).unwrap().data(), draft.data());
    }
}
