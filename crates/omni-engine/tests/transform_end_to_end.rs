//! Integration tests: full transform calls from source payload and schema
//! document to result or error.

use omni_core::{FieldPath, Payload, SchemaError, TransformError, ValidationError};
use omni_engine::transform;
use serde_json::{json, Value};

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object payload, got {other}"),
    }
}

fn profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "number"},
            "email": {"type": "string"}
        },
        "required": ["name", "age", "email"]
    })
}

#[test]
fn end_to_end_returns_payload_plan_and_report() {
    let source = payload(json!({
        "name": "John Doe",
        "contact": {"email": "john@example.com"},
        "age": 30,
        "extra_data": "ignore"
    }));
    let result = transform(&source, &profile_schema()).unwrap();

    assert_eq!(
        Value::Object(result.payload),
        json!({"name": "John Doe", "age": 30, "email": "john@example.com"})
    );
    assert!(result.report.missing_required.is_empty());
    assert_eq!(result.report.mapped, vec!["age", "email", "name"]);
    assert_eq!(result.report.dropped, vec![FieldPath::from("extra_data")]);
    assert!(result.report.warnings.is_empty());
    assert_eq!(result.plan.version, "1");
}

#[test]
fn full_name_is_not_a_synonym_for_name() {
    let source = payload(json!({
        "full_name": "John Doe",
        "contact": {"email": "john@example.com"},
        "age": 30,
        "extra_data": "ignore"
    }));
    let err = transform(&source, &profile_schema()).unwrap_err();
    assert_eq!(
        err,
        TransformError::Validation(ValidationError::MissingRequired {
            keys: vec!["name".into()]
        })
    );
}

#[test]
fn extra_source_fields_are_dropped_and_reported() {
    let result = transform(
        &payload(json!({"name": "John", "age": 30, "extra": "x"})),
        &json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "age": {"type": "number"}},
            "required": ["name"]
        }),
    )
    .unwrap();
    assert_eq!(Value::Object(result.payload), json!({"name": "John", "age": 30}));
    assert!(result.report.dropped.contains(&FieldPath::from("extra")));
}

#[test]
fn missing_required_field_is_fatal() {
    let err = transform(
        &payload(json!({"full_name": "John"})),
        &json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "email": {"type": "string"}},
            "required": ["name", "email"]
        }),
    )
    .unwrap_err();
    assert_eq!(
        err,
        TransformError::Validation(ValidationError::MissingRequired {
            keys: vec!["email".into(), "name".into()]
        })
    );
    assert!(err.to_string().contains("['email', 'name']"));
}

#[test]
fn non_object_root_schema_is_rejected() {
    let err = transform(&payload(json!({"name": "x"})), &json!({"type": "array"})).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Schema(SchemaError::UnsupportedRootType { .. })
    ));
}

#[test]
fn ambiguous_nested_match_warns_and_picks_first() {
    let result = transform(
        &payload(json!({"a": {"email": "x"}, "b": {"email": "y"}})),
        &json!({"type": "object", "properties": {"email": {"type": "string"}}}),
    )
    .unwrap();
    assert_eq!(Value::Object(result.payload), json!({"email": "x"}));
    assert!(result
        .report
        .warnings
        .iter()
        .any(|w| w.to_lowercase().contains("ambiguous")));
    assert_eq!(result.plan.warnings, result.report.warnings);
}

#[test]
fn case_differing_top_level_key_is_matched() {
    let result = transform(
        &payload(json!({"Name": "John"})),
        &json!({"type": "object", "properties": {"name": {}}, "required": ["name"]}),
    )
    .unwrap();
    assert_eq!(Value::Object(result.payload), json!({"name": "John"}));
}

#[test]
fn values_are_not_coerced() {
    let result = transform(
        &payload(json!({"user": {"age": "30", "score": 1.5, "tags": ["a"]}})),
        &json!({"type": "object", "properties": {"age": {"type": "number"}, "score": {}, "tags": {}}}),
    )
    .unwrap();
    assert_eq!(
        Value::Object(result.payload),
        json!({"age": "30", "score": 1.5, "tags": ["a"]})
    );
}

#[test]
fn repeated_calls_are_byte_identical() {
    let source = payload(json!({
        "x": {"id": 1, "email": "a"},
        "y": {"email": "b", "id": 2},
        "Id": 9
    }));
    let schema = json!({"type": "object", "properties": {"id": {}, "email": {}}});
    let first = serde_json::to_vec(&transform(&source, &schema).unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_vec(&transform(&source, &schema).unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn plan_digest_ignores_schema_key_order() {
    let source = payload(json!({"contact": {"email": "e"}, "name": "n"}));
    let a = transform(
        &source,
        &json!({
            "type": "object",
            "properties": {"name": {}, "age": {}, "email": {}},
            "required": []
        }),
    )
    .unwrap();
    let b = transform(
        &source,
        &json!({
            "required": [],
            "properties": {"email": {}, "age": {}, "name": {}},
            "type": "object"
        }),
    )
    .unwrap();
    assert_eq!(a.plan.digest().unwrap(), b.plan.digest().unwrap());
}
