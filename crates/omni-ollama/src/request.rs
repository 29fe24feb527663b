//! Wire types for `POST /api/generate` and the request shaping used by
//! proxy callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use omni_core::Payload;
use omni_schema::TargetSchema;

/// Optional generate-request fields forwarded by [`shape_generate_request`].
pub const PASSTHROUGH_KEYS: [&str; 3] = ["stream", "format", "options"];

/// Reduce an arbitrary caller payload to the fields a generate endpoint
/// accepts.
///
/// `model` is always carried (as `null` when absent). `messages` wins over
/// `prompt` when both are present. If neither is present only `model` is
/// kept, with no passthrough fields. Every other key is discarded.
pub fn shape_generate_request(source: &Payload) -> Payload {
    let mut shaped = Payload::new();
    shaped.insert(
        "model".to_string(),
        source.get("model").cloned().unwrap_or(Value::Null),
    );

    let body_key = if source.contains_key("messages") {
        "messages"
    } else if source.contains_key("prompt") {
        "prompt"
    } else {
        return shaped;
    };
    if let Some(body) = source.get(body_key) {
        shaped.insert(body_key.to_string(), body.clone());
    }

    for key in PASSTHROUGH_KEYS {
        if let Some(value) = source.get(key) {
            shaped.insert(key.to_string(), value.clone());
        }
    }
    shaped
}

/// Body of a non-streaming generate call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    /// Model tag, e.g. `llama3.1:latest`.
    pub model: String,
    /// Full prompt text.
    pub prompt: String,
    /// Always `false`; the aligner reads one complete response.
    pub stream: bool,
    /// `"json"` constrains the model to emit a JSON value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Sampling options such as `temperature`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl GenerateRequest {
    /// A JSON-mode, zero-temperature request asking `model` to align
    /// `source` to `schema`.
    pub fn alignment(model: &str, source: &Payload, schema: &TargetSchema) -> Self {
        Self {
            model: model.to_string(),
            prompt: alignment_prompt(source, schema),
            stream: false,
            format: Some("json".to_string()),
            options: Some(serde_json::json!({"temperature": 0})),
        }
    }
}

/// Body of a non-streaming generate response. Only the fields the aligner
/// reads are modelled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateResponse {
    /// Generated text. In JSON mode this should be one JSON value.
    #[serde(default)]
    pub response: String,
    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,
    /// Set by the server when the request failed, e.g. an unknown model.
    #[serde(default)]
    pub error: Option<String>,
}

fn alignment_prompt(source: &Payload, schema: &TargetSchema) -> String {
    let fields = schema.property_names().collect::<Vec<_>>().join(", ");
    let required = schema.required().join(", ");
    // Map serialization cannot fail.
    let source_json = serde_json::to_string(source).unwrap_or_default();
    format!(
        "Map the source JSON object onto the target fields.\n\
         Return only a JSON object. Use only these keys: {fields}.\n\
         Required keys: {required}.\n\
         Copy values verbatim from the source. Omit a key when the source has no value for it.\n\
         Source:\n{source_json}\n"
    )
}
