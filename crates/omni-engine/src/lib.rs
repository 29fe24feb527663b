//! # omni-engine -- Deterministic Payload Alignment
//!
//! Aligns an arbitrary nested payload to a flat target schema without a
//! hand-written mapping. The pipeline is linear:
//!
//! ```text
//! guard ─▶ plan ─▶ apply ─▶ validate ─▶ TransformResult
//! ```
//!
//! Only the guard and the validator can fail. Planning and application are
//! best-effort and record what they could not do as warnings and drops.
//!
//! ## Modules
//!
//! - [`flatten`] -- nested payload to sorted leaf paths.
//! - [`planner`] -- tiered property matching and plan construction.
//! - [`executor`] -- applying a plan to the original payload.
//! - [`validator`] -- the output gate shared by every aligner.
//! - [`aligner`] -- the [`Aligner`] capability and [`transform_with`].
//!
//! ## Determinism
//!
//! Every call is a pure function of its inputs. Sibling keys are visited in
//! sorted order, ties are broken by (character count, lexicographic) path order, and
//! no state survives between calls. Repeated calls yield identical plans,
//! payloads, and reports.

pub mod aligner;
pub mod executor;
pub mod flatten;
pub mod planner;
pub mod validator;

pub use aligner::{transform_with, AlignError, Aligner, Alignment, DeterministicAligner};
pub use executor::apply_plan;
pub use flatten::{flatten, resolve, Leaf};
pub use planner::{build_plan, match_property, normalize, tie_break, MatchTier, PropertyMatch};
pub use validator::validate_payload;

use serde_json::Value;

use omni_core::{Payload, TransformError, TransformReport, TransformResult};
use omni_schema::validate_schema;

/// Align `source` to the schema document `schema_doc`.
///
/// # Errors
///
/// - `TransformError::Schema` if the schema is outside the supported subset.
/// - `TransformError::Validation` if the aligned output is missing required
///   properties (or, unreachably here, carries undeclared keys).
pub fn transform(source: &Payload, schema_doc: &Value) -> Result<TransformResult, TransformError> {
    let schema = validate_schema(schema_doc)?;
    let plan = build_plan(source, &schema);
    let (payload, report) = apply_plan(source, &schema, &plan);
    let missing_required = validate_payload(&payload, &schema, &plan.required)?;

    tracing::info!(
        mapped = report.mapped.len(),
        dropped = report.dropped.len(),
        warnings = report.warnings.len(),
        "transform complete"
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
