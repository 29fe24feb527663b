//! # Schema Document Loading
//!
//! Reads a target schema document from disk. The format is chosen from the
//! file extension: `.yaml`/`.yml` go through `serde_yaml`, everything else
//! is parsed as JSON. Loading does not run the guard; callers pass the
//! returned value to [`crate::validate_schema`].

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error reading or parsing a schema document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read schema document '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in schema document '{path}': {source}")]
    Json {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in schema document '{path}': {source}")]
    Yaml {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Serialization format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl SchemaFormat {
    /// Pick the format from a file extension. Unknown extensions are JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a schema document from `path`.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or `LoadError::Json`
/// / `LoadError::Yaml` if it does not parse.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_schema_str(&content, SchemaFormat::from_path(path), &path.display().to_string())
}

/// Parse schema text in the given format. `origin` names the source in errors.
///
/// # Errors
///
/// Returns `LoadError::Json` or `LoadError::Yaml` if the text does not parse.
pub fn parse_schema_str(
    content: &str,
    format: SchemaFormat,
    origin: &str,
) -> Result<Value, LoadError> {
    match format {
        SchemaFormat::Json => serde_json::from_str(content).map_err(|source| LoadError::Json {
            path: origin.to_string(),
            source,
        }),
        SchemaFormat::Yaml => serde_yaml::from_str(content).map_err(|source| LoadError::Yaml {
            path: origin.to_string(),
            source,
        }),
    }
}
