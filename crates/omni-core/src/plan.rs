//! # Plans, Reports, and Results
//!
//! The records produced by one transform call. All of them are created
//! fresh per call and never mutated after construction; the pipeline stages
//! hand them forward by value.
//!
//! Sets in the data model (`drops`, `mapped`, `missing_required`) are
//! represented as sorted, duplicate-free `Vec`s so they serialize in a
//! stable order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::CanonicalBytes;
use crate::digest::{sha256_digest, PlanDigest};
use crate::error::CanonicalizationError;
use crate::path::FieldPath;
use crate::Payload;

/// Plan format version.
pub const PLAN_VERSION: &str = "1";

/// How a mapped value is transferred. Only verbatim copy exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingOp {
    /// Move the leaf value into the output untransformed.
    #[default]
    Copy,
}

/// One decision: fill `to_key` from the leaf at `from_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Source leaf path.
    pub from_path: FieldPath,
    /// Target property name.
    pub to_key: String,
    /// Transfer operation.
    #[serde(default)]
    pub op: MappingOp,
}

impl Mapping {
    /// A verbatim copy from `from_path` into `to_key`.
    pub fn copy(from_path: FieldPath, to_key: impl Into<String>) -> Self {
        Self {
            from_path,
            to_key: to_key.into(),
            op: MappingOp::Copy,
        }
    }
}

/// The complete, inspectable set of mapping decisions for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformPlan {
    /// Plan format version, always [`PLAN_VERSION`].
    pub version: String,
    /// Mappings in target property order.
    pub mappings: Vec<Mapping>,
    /// Default-value injections. Always empty.
    #[serde(default)]
    pub defaults: Vec<Value>,
    /// Source leaf paths not consumed by any mapping, sorted.
    pub drops: Vec<FieldPath>,
    /// String entries of the schema's `required` list, in schema order.
    pub required: Vec<String>,
    /// Planner diagnostics, in the order they were raised.
    pub warnings: Vec<String>,
}

impl TransformPlan {
    /// Assemble a plan at the current [`PLAN_VERSION`].
    pub fn new(
        mappings: Vec<Mapping>,
        drops: Vec<FieldPath>,
        required: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            version: PLAN_VERSION.to_string(),
            mappings,
            defaults: Vec::new(),
            drops,
            required,
            warnings,
        }
    }

    /// The mapping that fills `to_key`, if the planner found one.
    pub fn mapping_for(&self, to_key: &str) -> Option<&Mapping> {
        self.mappings.iter().find(|m| m.to_key == to_key)
    }

    /// SHA-256 over the plan's canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError` if the plan cannot be serialized,
    /// which only happens if a `defaults` entry is not representable.
    pub fn digest(&self) -> Result<PlanDigest, CanonicalizationError> {
        let bytes = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&bytes))
    }
}

/// What a run actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Target properties populated in the output, sorted.
    pub mapped: Vec<String>,
    /// Source leaf paths not carried into the output, sorted.
    pub dropped: Vec<FieldPath>,
    /// Required properties absent after validation, sorted. Empty on success.
    pub missing_required: Vec<String>,
    /// Planner warnings followed by execution warnings.
    pub warnings: Vec<String>,
}

/// The aligned payload together with the plan and report that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Output object, keys a subset of the schema's properties.
    pub payload: Payload,
    /// Decisions taken.
    pub plan: TransformPlan,
    /// Outcome summary.
    pub report: TransformReport,
}
