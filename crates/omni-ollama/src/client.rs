//! Blocking Ollama client and the generative [`Aligner`].

use std::time::Duration;

use serde_json::Value;

use omni_core::{Payload, ValidationError};
use omni_engine::{AlignError, Aligner};
use omni_schema::TargetSchema;

use crate::config::{ConfigError, OllamaConfig};
use crate::error::OllamaError;
use crate::request::{GenerateRequest, GenerateResponse};

const GENERATE_PATH: &str = "api/generate";

/// Aligns payloads by asking an Ollama model for a JSON object.
///
/// The model's answer is only a candidate. [`omni_engine::transform_with`]
/// passes it through the output validator like any other aligner result.
#[derive(Debug, Clone)]
pub struct OllamaAligner {
    http: reqwest::blocking::Client,
    config: OllamaConfig,
}

impl OllamaAligner {
    /// Build an aligner from configuration.
    pub fn new(config: OllamaConfig) -> Result<Self, OllamaError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OllamaError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Call `POST {base_url}/api/generate` and decode the response.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, OllamaError> {
        let endpoint = "POST /api/generate";
        let url = self
            .config
            .base_url
            .join(GENERATE_PATH)
            .map_err(|e| ConfigError::InvalidUrl(GENERATE_PATH.into(), e.to_string()))?;

        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .map_err(|e| OllamaError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(OllamaError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let decoded: GenerateResponse = resp.json().map_err(|e| OllamaError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        if let Some(message) = decoded.error {
            return Err(OllamaError::Upstream(message));
        }
        Ok(decoded)
    }

    fn collaborator(&self, err: OllamaError) -> AlignError {
        AlignError::Collaborator {
            aligner: self.name().to_string(),
            reason: err.to_string(),
        }
    }
}

impl Aligner for OllamaAligner {
    fn name(&self) -> &str {
        "ollama"
    }

    fn align(&self, source: &Payload, schema: &TargetSchema) -> Result<Payload, AlignError> {
        let request = GenerateRequest::alignment(&self.config.model, source, schema);
        tracing::debug!(model = %self.config.model, "requesting generative alignment");

        let response = self.generate(&request).map_err(|e| {
            tracing::warn!(error = %e, "generative alignment failed");
            self.collaborator(e)
        })?;

        parse_candidate(&response.response).map_err(AlignError::from)
    }
}

/// Parse the model's `response` text as a JSON object.
fn parse_candidate(text: &str) -> Result<Payload, ValidationError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ValidationError::MalformedAlignerOutput {
            reason: format!("expected a JSON object, got {}", kind(&other)),
        }),
        Err(e) => Err(ValidationError::MalformedAlignerOutput {
            reason: format!("response is not JSON: {e}"),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
