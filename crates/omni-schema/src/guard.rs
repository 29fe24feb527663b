//! # Schema Subset Guard
//!
//! Checks, in order:
//!
//! 1. `type` equals `"object"`.
//! 2. `properties` is a JSON object.
//! 3. Top-level keys are a subset of `type`, `properties`, `required`.
//!
//! The first failing check determines the error. On success the document
//! is converted into a [`TargetSchema`]; `required` entries that are not
//! strings are dropped at this point so later stages never see them.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use omni_core::SchemaError;

/// Top-level keys a target schema may carry.
pub const SUPPORTED_SCHEMA_KEYS: [&str; 3] = ["type", "properties", "required"];

/// A target schema that passed the guard.
///
/// Property names iterate in sorted order, which fixes the order in which
/// the planner visits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSchema {
    properties: BTreeMap<String, Value>,
    required: Vec<String>,
}

impl TargetSchema {
    /// Property names, sorted.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// The unexamined descriptor for a property.
    pub fn descriptor(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// True if `key` is a declared property.
    pub fn allows(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// String entries of `required`, in document order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Number of declared properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl TryFrom<&Value> for TargetSchema {
    type Error = SchemaError;

    fn try_from(doc: &Value) -> Result<Self, Self::Error> {
        validate_schema(doc)
    }
}

/// Run the subset checks and build a [`TargetSchema`].
///
/// # Errors
///
/// - `SchemaError::NotAnObject` if `doc` is not a JSON object.
/// - `SchemaError::UnsupportedRootType` if `type` is not `"object"`.
/// - `SchemaError::MissingProperties` if `properties` is absent or not an object.
/// - `SchemaError::UnsupportedKeys` with the sorted extra keys otherwise.
pub fn validate_schema(doc: &Value) -> Result<TargetSchema, SchemaError> {
    let Value::Object(root) = doc else {
        return Err(SchemaError::NotAnObject);
    };

    match root.get("type") {
        Some(Value::String(t)) if t == "object" => {}
        other => {
            return Err(SchemaError::UnsupportedRootType {
                found: other.map_or_else(|| "null".to_string(), Value::to_string),
            })
        }
    }

    let Some(Value::Object(properties)) = root.get("properties") else {
        return Err(SchemaError::MissingProperties);
    };

    let mut unsupported: Vec<String> = root
        .keys()
        .filter(|k| !SUPPORTED_SCHEMA_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !unsupported.is_empty() {
        unsupported.sort();
        return Err(SchemaError::UnsupportedKeys { keys: unsupported });
    }

    let required = match root.get("required") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    Ok(TargetSchema {
        properties: properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        required,
    })
}
