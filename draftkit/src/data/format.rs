//! JSON and TOML file formats, chosen by extension.

use std::{fs, path::Path};

use serde_json::Value;

use crate::error::{DraftError, Result};

/// On-disk format of a draft or schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `.json`
    Json,
    /// `.toml` / `.tml`
    Toml,
}

impl DataFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match ext {
            "json" => Ok(DataFormat::Json),
            "toml" | "tml" => Ok(DataFormat::Toml),
            _ => Err(DraftError::UnsupportedFormat {
                path: path.to_path_buf(),
                ext: ext.to_string(),
            }),
        }
    }

    /// Parse file content. Blank content is an empty object.
    pub fn parse(&self, content: &str) -> Result<Value> {
        if content.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        let value = match self {
            DataFormat::Json => serde_json::from_str(content)?,
            DataFormat::Toml => {
                let v: toml::Value = toml::from_str(content)?;
                serde_json::to_value(v)?
            }
        };
        Ok(value)
    }

    /// Pretty-print a value.
    pub fn render(&self, value: &Value) -> Result<String> {
        let s = match self {
            DataFormat::Json => serde_json::to_string_pretty(value)?,
            DataFormat::Toml => toml::to_string_pretty(value)?,
        };
        Ok(s)
    }
}

/// Read and parse a JSON or TOML file.
pub fn read_value(path: &Path) -> Result<Value> {
    let format = DataFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| DraftError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&content)
}
