//! # Leaf Paths
//!
//! A `FieldPath` names one leaf of a source payload: the object keys walked
//! from the root, joined with `.`. Arrays are leaves and are never indexed
//! into, so a path never contains a numeric segment unless the source used
//! a numeric-looking key.
//!
//! Paths sort as plain strings. The planner's tie-break counts characters,
//! not UTF-8 bytes, before falling back to that ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between object keys in a flattened path.
pub const PATH_SEPARATOR: char = '.';

/// A dot-joined sequence of object keys identifying a leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// A single-segment path for a top-level key.
    pub fn root(key: &str) -> Self {
        Self(key.to_string())
    }

    /// This path extended by one more object key.
    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}{PATH_SEPARATOR}{key}", self.0))
    }

    /// The path as written, e.g. `contact.email`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The object keys walked from the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }

    /// The final segment: the key the leaf is stored under.
    pub fn leaf(&self) -> &str {
        self.0
            .rsplit_once(PATH_SEPARATOR)
            .map_or(self.0.as_str(), |(_, leaf)| leaf)
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// True for top-level keys (no separator).
    pub fn is_shallow(&self) -> bool {
        !self.0.contains(PATH_SEPARATOR)
    }

    /// Total order used to pick among equally eligible candidates:
    /// fewer characters first, then lexicographically smaller.
    pub fn tie_break_cmp(&self, other: &Self) -> Ordering {
        self.0
            .chars()
            .count()
            .cmp(&other.0.chars().count())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
