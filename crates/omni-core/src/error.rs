//! # Error Types -- Closed Failure Taxonomy
//!
//! The alignment pipeline has exactly two failure points: the schema guard
//! and the output validator. Everything else (unmatched properties,
//! ambiguous nested matches, source paths that vanish between planning and
//! execution) is recorded as a warning or a drop and never stops the run.
//!
//! ## Design
//!
//! - Every variant that names keys carries them sorted, so messages are
//!   stable across runs.
//! - Neither error kind is retried by the pipeline. The caller must fix the
//!   schema or the payload.

use std::fmt;

use thiserror::Error;

/// Top-level error returned by a transform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The target schema is outside the supported subset.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The output payload violates an invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// The target schema is outside the supported subset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The root `type` is absent or not `"object"`.
    #[error("only object root schema supported (found type {found})")]
    UnsupportedRootType {
        /// The `type` value found, rendered as JSON (`null` when absent).
        found: String,
    },

    /// `properties` is absent or not a JSON object.
    #[error("schema must define object properties")]
    MissingProperties,

    /// Top-level keys other than `type`, `properties`, `required`.
    #[error("unsupported top-level schema keys: {}", KeyList(.keys))]
    UnsupportedKeys {
        /// Offending keys, sorted.
        keys: Vec<String>,
    },

    /// The schema document itself is not a JSON object.
    #[error("schema document must be a JSON object")]
    NotAnObject,
}

/// The output payload violates an invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Output contains keys outside the schema's `properties`.
    #[error("output contains unknown keys: {}", KeyList(.keys))]
    UnknownKeys {
        /// Offending keys, sorted.
        keys: Vec<String>,
    },

    /// Required properties are absent from the output.
    #[error("missing required fields: {}", KeyList(.keys))]
    MissingRequired {
        /// Missing property names, sorted.
        keys: Vec<String>,
    },

    /// A generative aligner produced something that is not a JSON object.
    #[error("aligner output is not a JSON object: {reason}")]
    MalformedAlignerOutput {
        /// Parser or shape diagnostic.
        reason: String,
    },
}

impl ValidationError {
    /// The offending keys carried by this error, if any.
    pub fn keys(&self) -> &[String] {
        match self {
            Self::UnknownKeys { keys } | Self::MissingRequired { keys } => keys,
            Self::MalformedAlignerOutput { .. } => &[],
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Renders `["a", "b"]` the same way on every run.
struct KeyList<'a>(&'a [String]);

impl fmt::Display for KeyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{key}'")?;
        }
        f.write_str("]")
    }
}
