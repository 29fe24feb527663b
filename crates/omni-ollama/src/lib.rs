#![warn(missing_docs)]
//! # omni-ollama -- Generative Aligner
//!
//! An [`omni_engine::Aligner`] that asks a local or remote Ollama model to
//! map a source payload onto a target schema. Model output is treated as an
//! untrusted candidate: it must parse as a JSON object and then pass the same
//! output validator as the deterministic pipeline.
//!
//! The client is blocking so it fits the synchronous aligner interface.
//! Async callers should run it on a blocking thread.
//!
//! [`shape_generate_request`] is exposed separately for proxies that forward
//! arbitrary caller payloads to a generate endpoint.

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::OllamaAligner;
pub use config::{ConfigError, OllamaConfig};
pub use error::OllamaError;
pub use request::{shape_generate_request, GenerateRequest, GenerateResponse, PASSTHROUGH_KEYS};
