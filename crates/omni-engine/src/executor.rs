//! # Executor
//!
//! Applies a [`TransformPlan`] to the original source payload. Execution
//! never fails. A mapping whose target is not a declared property is skipped
//! without comment; a mapping whose source path no longer resolves is
//! skipped with a warning. `missing_required` is left empty here and filled
//! in after validation.

use std::collections::BTreeSet;

use omni_core::{Payload, TransformPlan, TransformReport};
use omni_schema::TargetSchema;

use crate::flatten::resolve;

/// Copy every mapped leaf into a fresh output object.
pub fn apply_plan(
    source: &Payload,
    schema: &TargetSchema,
    plan: &TransformPlan,
) -> (Payload, TransformReport) {
    let mut output = Payload::new();
    let mut mapped = BTreeSet::new();
    let mut warnings = plan.warnings.clone();

    for mapping in &plan.mappings {
        if !schema.allows(&mapping.to_key) {
            continue;
        }
        let Some(value) = resolve(source, &mapping.from_path) else {
            let warning = format!(
                "missing source path '{}' for target '{}'",
                mapping.from_path, mapping.to_key
            );
            tracing::warn!("{warning}");
            warnings.push(warning);
            continue;
        };
        tracing::debug!(from = %mapping.from_path, to = %mapping.to_key, "copied");
        output.insert(mapping.to_key.clone(), value.clone());
        mapped.insert(mapping.to_key.clone());
    }

    let mut dropped = plan.drops.clone();
    dropped.sort();

    let report = TransformReport {
        mapped: mapped.into_iter().collect(),
        dropped,
        missing_required: Vec::new(),
        warnings,
    };
    (output, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_core::Mapping;
    use omni_schema::validate_schema;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn schema() -> TargetSchema {
        validate_schema(&json!({
            "type": "object",
            "properties": {"name": {}, "email": {}, "tags": {}},
            "required": ["name"]
        }))
        .unwrap()
    }

    #[test]
    fn copies_values_verbatim() {
        let source = payload(json!({
            "full_name": "John",
            "contact": {"email": "j@x.io"},
            "labels": [1, {"a": null}]
        }));
        let plan = TransformPlan::new(
            vec![
                Mapping::copy("full_name".into(), "name"),
                Mapping::copy("contact.email".into(), "email"),
                Mapping::copy("labels".into(), "tags"),
            ],
            vec![],
            vec!["name".into()],
            vec![],
        );
        let (output, report) = apply_plan(&source, &schema(), &plan);
        assert_eq!(
            Value::Object(output),
            json!({"name": "John", "email": "j@x.io", "tags": [1, {"a": null}]})
        );
        assert_eq!(report.mapped, vec!["email", "name", "tags"]);
        assert!(report.missing_required.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_source_path_becomes_warning() {
        let source = payload(json!({"contact": "not-an-object"}));
        let plan = TransformPlan::new(
            vec![Mapping::copy("contact.email".into(), "email")],
            vec![],
            vec![],
            vec!["planner note".into()],
        );
        let (output, report) = apply_plan(&source, &schema(), &plan);
        assert!(output.is_empty());
        assert!(report.mapped.is_empty());
        assert_eq!(
            report.warnings,
            vec![
                "planner note".to_string(),
                "missing source path 'contact.email' for target 'email'".to_string()
            ]
        );
    }

    #[test]
    fn undeclared_target_is_skipped_silently() {
        let source = payload(json!({"zip": "12345"}));
        let plan = TransformPlan::new(
            vec![Mapping::copy("zip".into(), "postcode")],
            vec![],
            vec![],
            vec![],
        );
        let (output, report) = apply_plan(&source, &schema(), &plan);
        assert!(output.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn drops_are_carried_sorted() {
        let source = payload(json!({}));
        let plan = TransformPlan::new(vec![], vec!["z".into(), "a.b".into()], vec![], vec![]);
        let (_, report) = apply_plan(&source, &schema(), &plan);
        let expected: Vec<omni_core::FieldPath> = vec!["a.b".into(), "z".into()];
        assert_eq!(report.dropped, expected);
    }
}
