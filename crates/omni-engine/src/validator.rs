//! # Output Validator
//!
//! The gate every aligned payload passes before it is returned, whichever
//! aligner produced it. Two hard guarantees:
//!
//! 1. No output key outside the schema's `properties`.
//! 2. No required property missing.
//!
//! The unknown-key check cannot trip for the deterministic path, since the
//! executor filters on the same property set, but generative aligners are
//! free to invent keys.

use omni_core::{Payload, ValidationError};
use omni_schema::TargetSchema;

/// Check `output` against `schema` and the plan's `required` list.
///
/// Returns the (empty) missing-required list on success so it can be placed
/// in the final report.
///
/// # Errors
///
/// - `ValidationError::UnknownKeys` with the sorted undeclared keys.
/// - `ValidationError::MissingRequired` with the sorted missing names.
pub fn validate_payload(
    output: &Payload,
    schema: &TargetSchema,
    required: &[String],
) -> Result<Vec<String>, ValidationError> {
    let mut unknown: Vec<String> = output
        .keys()
        .filter(|k| !schema.allows(k))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(ValidationError::UnknownKeys { keys: unknown });
    }

    let mut missing: Vec<String> = required
        .iter()
        .filter(|k| !output.contains_key(k.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequired { keys: missing });
    }

    Ok(missing)
}
