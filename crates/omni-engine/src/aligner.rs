//! # Aligner Capability
//!
//! An [`Aligner`] turns a source payload and a guarded schema into a
//! candidate output object. The deterministic planner/executor pipeline is
//! one implementation; generative collaborators (a text-generation service,
//! for instance) are others. Whatever an aligner returns is passed through
//! [`validate_payload`] before it is accepted, so the invariants hold for
//! every strategy.
//!
//! Aligners are synchronous. An implementation that performs network I/O
//! blocks inside `align`; the engine itself never does.

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use omni_core::{
    FieldPath, Payload, SchemaError, TransformError, TransformPlan, TransformReport,
    TransformResult, ValidationError,
};
use omni_schema::{validate_schema, TargetSchema};

use crate::executor::apply_plan;
use crate::flatten::flatten;
use crate::planner::build_plan;
use crate::validator::validate_payload;

/// Failure of an alignment strategy.
#[derive(Error, Debug)]
pub enum AlignError {
    /// Schema guard or output validation failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The aligner's own machinery failed (transport, upstream error).
    #[error("aligner '{aligner}' failed: {reason}")]
    Collaborator {
        /// Name of the failing aligner.
        aligner: String,
        /// Diagnostic from the aligner.
        reason: String,
    },
}

impl From<SchemaError> for AlignError {
    fn from(err: SchemaError) -> Self {
        Self::Transform(err.into())
    }
}

impl From<ValidationError> for AlignError {
    fn from(err: ValidationError) -> Self {
        Self::Transform(err.into())
    }
}

/// A candidate output together with the plan and report that explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// The candidate output object, not yet validated.
    pub payload: Payload,
    /// How the payload was derived, as far as the aligner can say.
    pub plan: TransformPlan,
    /// Execution summary. `missing_required` is filled in by the gate.
    pub report: TransformReport,
}

impl Alignment {
    /// Wrap the output of an aligner that exposes no mappings.
    ///
    /// Nothing is selected, so every source leaf is dropped. The warnings
    /// name the aligner so the result is distinguishable from a planned one.
    pub fn opaque(
        aligner: &str,
        source: &Payload,
        schema: &TargetSchema,
        payload: Payload,
    ) -> Self {
        let mut drops: Vec<FieldPath> = flatten(source).into_iter().map(|leaf| leaf.path).collect();
        drops.sort();
        let warnings = vec![format!("payload aligned by '{aligner}'")];
        let mapped: Vec<String> = payload
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let report = TransformReport {
            mapped,
            dropped: drops.clone(),
            missing_required: Vec::new(),
            warnings: warnings.clone(),
        };
        let plan = TransformPlan::new(Vec::new(), drops, schema.required().to_vec(), warnings);
        Self {
            payload,
            plan,
            report,
        }
    }
}

/// A strategy that aligns a source payload to a target schema.
pub trait Aligner: Send + Sync {
    /// Short identifier used in warnings and logs.
    fn name(&self) -> &str;

    /// Produce a candidate output object. The result is validated by the
    /// caller; implementations need not check it themselves.
    fn align(&self, source: &Payload, schema: &TargetSchema) -> Result<Payload, AlignError>;

    /// Produce a candidate with its plan and report.
    ///
    /// The default wraps [`Aligner::align`] with [`Alignment::opaque`].
    /// Aligners that know which source leaves they used override this.
    fn align_with_plan(
        &self,
        source: &Payload,
        schema: &TargetSchema,
    ) -> Result<Alignment, AlignError> {
        let payload = self.align(source, schema)?;
        Ok(Alignment::opaque(self.name(), source, schema, payload))
    }
}

/// The planner/executor pipeline as an [`Aligner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicAligner;

impl Aligner for DeterministicAligner {
    fn name(&self) -> &str {
        "deterministic"
    }

    fn align(&self, source: &Payload, schema: &TargetSchema) -> Result<Payload, AlignError> {
        Ok(self.align_with_plan(source, schema)?.payload)
    }

    fn align_with_plan(
        &self,
        source: &Payload,
        schema: &TargetSchema,
    ) -> Result<Alignment, AlignError> {
        let plan = build_plan(source, schema);
        let (payload, report) = apply_plan(source, schema, &plan);
        Ok(Alignment {
            payload,
            plan,
            report,
        })
    }
}

/// Run `aligner` behind the schema guard and the output validator.
///
/// The plan and report come from [`Aligner::align_with_plan`], so the
/// deterministic aligner yields the same result as [`crate::transform`].
///
/// # Errors
///
/// `AlignError::Transform` for schema or validation failures,
/// `AlignError::Collaborator` for failures inside the aligner.
pub fn transform_with(
    aligner: &dyn Aligner,
    source: &Payload,
    schema_doc: &Value,
) -> Result<TransformResult, AlignError> {
    let schema = validate_schema(schema_doc)?;
    let Alignment {
        payload,
        plan,
        report,
    } = aligner.align_with_plan(source, &schema)?;
    let missing_required = validate_payload(&payload, &schema, schema.required())?;

    tracing::info!(
        aligner = aligner.name(),
        mapped = report.mapped.len(),
        dropped = report.dropped.len(),
        "aligner output accepted"
    );

    let report = TransformReport {
        missing_required,
        ..report
    };
    Ok(TransformResult {
        payload,
        plan,
        report,
    })
}
