//! Ollama client configuration.
//!
//! Defaults target a local Ollama daemon. Override via environment
//! variables or explicit construction for remote hosts and tests.

use url::Url;

/// Default base URL of a local Ollama daemon.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
/// Default model tag.
pub const DEFAULT_MODEL: &str = "llama3.1:latest";
/// Default request timeout in seconds. Generation is slow on CPU hosts.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Ollama aligner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API. Always ends with `/`, so endpoint
    /// paths join beneath any path prefix.
    pub base_url: Url,
    /// Model tag passed as `model` in every request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `OLLAMA_BASE_URL` (default: `http://127.0.0.1:11434`)
    /// - `OLLAMA_MODEL` (default: `llama3.1:latest`)
    /// - `OLLAMA_TIMEOUT_SECS` (default: 60)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `OLLAMA_BASE_URL` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("OLLAMA_BASE_URL", DEFAULT_BASE_URL)?,
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("OLLAMA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Build a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url, base_url)?,
            model: model.to_string(),
            timeout_secs,
        })
    }

    /// Replace the base URL, keeping model and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url, base_url)?,
            ..self
        })
    }

    /// A configuration pointing at a mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `uri` does not parse.
    pub fn local_mock(uri: &str) -> Result<Self, ConfigError> {
        Self::new(uri, "test-model", 5)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(&raw, var)
}

/// Parse `raw` and give it a trailing slash. `label` names the source in
/// errors.
fn parse_base_url(raw: &str, label: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(label.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The URL (first field: its value or variable name) did not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
