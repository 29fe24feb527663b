//! # Path Flattening
//!
//! Turns a nested payload into the ordered list of its leaves. Objects are
//! descended into; every other value, arrays included, is a leaf. Sibling
//! keys are visited in sorted order at every level so the leaf order does
//! not depend on how the payload was built.
//!
//! An empty nested object contributes no leaves.

use serde_json::Value;

use omni_core::{FieldPath, Payload};

/// One leaf of a flattened payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'a> {
    /// Dot-joined path from the root.
    pub path: FieldPath,
    /// The value stored there.
    pub value: &'a Value,
}

/// Flatten `payload` depth-first with sorted sibling keys.
pub fn flatten(payload: &Payload) -> Vec<Leaf<'_>> {
    let mut leaves = Vec::new();
    walk(payload, None, &mut leaves);
    leaves
}

fn walk<'a>(object: &'a Payload, prefix: Option<&FieldPath>, out: &mut Vec<Leaf<'a>>) {
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();
    for key in keys {
        let Some(value) = object.get(key) else {
            continue;
        };
        let path = match prefix {
            Some(parent) => parent.child(key),
            None => FieldPath::root(key),
        };
        match value {
            Value::Object(nested) => walk(nested, Some(&path), out),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => out.push(Leaf { path, value }),
        }
    }
}

/// Walk `path` through nested objects of `payload`.
///
/// Returns `None` if a segment is absent or an intermediate value is not an
/// object.
pub fn resolve<'a>(payload: &'a Payload, path: &FieldPath) -> Option<&'a Value> {
    let mut segments = path.segments();
    let mut current = payload.get(segments.next()?)?;
    for segment in segments {
        match current {
            Value::Object(nested) => current = nested.get(segment)?,
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => return None,
        }
    }
    Some(current)
}
