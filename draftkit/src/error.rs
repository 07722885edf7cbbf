//! Error types for draft file handling.
//!
//! The data engine itself never fails: missing containers are created and
//! malformed schemas degrade to empty. Errors come from reading and writing
//! draft or schema files, and from draft calls that had nothing to write.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving drafts and schemas.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// File content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// File content is not valid TOML.
    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Data cannot be expressed as TOML (for example it contains `null`).
    #[error("cannot write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    /// The file extension maps to no supported format.
    #[error("unsupported file extension {ext:?} for {}", .path.display())]
    UnsupportedFormat {
        /// Offending file.
        path: PathBuf,
        /// Its extension, empty when there is none.
        ext: String,
    },
    /// No schema describes the data at the given path.
    #[error("no schema for `{0}`")]
    MissingSchema(String),
    /// The path points past the reach of its array.
    #[error("cannot write `{0}`: index too far past the end of its array")]
    UnreachablePath(String),
    /// The schema file holds no usable schema.
    #[error("{} does not contain a schema object", .0.display())]
    InvalidSchema(PathBuf),
}

/// Result alias using [`DraftError`].
pub type Result<T, E = DraftError> = std::result::Result<T, E>;
