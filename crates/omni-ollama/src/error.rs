//! Ollama aligner errors.

use crate::config::ConfigError;

/// Failure talking to an Ollama endpoint.
#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request could not be sent or timed out.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Method and path of the failed call.
        endpoint: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status from the server.
    #[error("Ollama returned {status} for {endpoint}: {body}")]
    Api {
        /// Method and path of the failed call.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, empty if it could not be read.
        body: String,
    },

    /// The response body is not a generate response.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        /// Method and path of the call.
        endpoint: String,
        /// Decoding error.
        #[source]
        source: reqwest::Error,
    },

    /// A success status carrying an `error` field.
    #[error("Ollama reported an error: {0}")]
    Upstream(String),
}
