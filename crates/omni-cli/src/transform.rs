//! # Transform Subcommand
//!
//! Aligns a source payload to a target schema and prints the payload, plan,
//! and report as one JSON document on stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use omni_core::TransformResult;
use omni_engine::{transform, transform_with, AlignError};
use omni_ollama::{OllamaAligner, OllamaConfig};

/// Alignment strategy selectable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignerKind {
    /// Tiered name matching. No network access.
    #[default]
    Deterministic,
    /// An Ollama model, configured by the `OLLAMA_*` environment variables
    /// and the `--ollama-*` flags.
    Ollama,
}

/// Arguments for the `omni transform` subcommand.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Target schema (.json, .yaml, or .yml).
    #[arg(long, short, value_name = "FILE")]
    pub schema: PathBuf,

    /// Source payload JSON file. Reads stdin when absent or `-`.
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Alignment strategy.
    #[arg(long, value_enum, default_value_t = AlignerKind::Deterministic)]
    pub aligner: AlignerKind,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,

    /// Ollama base URL. Overrides `OLLAMA_BASE_URL`.
    #[arg(long, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Ollama model tag. Overrides `OLLAMA_MODEL`.
    #[arg(long, value_name = "TAG")]
    pub ollama_model: Option<String>,

    /// Ollama request timeout in seconds. Overrides `OLLAMA_TIMEOUT_SECS`.
    #[arg(long, value_name = "SECS")]
    pub ollama_timeout: Option<u64>,
}

impl TransformArgs {
    /// Environment configuration with any `--ollama-*` flags applied on top.
    fn ollama_config(&self) -> Result<OllamaConfig> {
        let mut config = OllamaConfig::from_env().context("failed to configure Ollama aligner")?;
        if let Some(url) = &self.ollama_url {
            config = config
                .with_base_url(url)
                .context("failed to configure Ollama aligner")?;
        }
        if let Some(model) = &self.ollama_model {
            config.model = model.clone();
        }
        if let Some(timeout) = self.ollama_timeout {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}

/// Execute the transform subcommand.
///
/// Returns exit code: 0 on success, 1 if the schema or output is rejected.
/// Operational failures are returned as errors.
pub fn run_transform(args: &TransformArgs, out: &mut dyn Write) -> Result<u8> {
    let schema = crate::read_schema(&args.schema)?;
    let source = crate::read_source(args.source.as_deref())?;

    let outcome = match args.aligner {
        AlignerKind::Deterministic => transform(&source, &schema).map_err(AlignError::from),
        AlignerKind::Ollama => {
            let aligner = OllamaAligner::new(args.ollama_config()?)?;
            transform_with(&aligner, &source, &schema)
        }
    };

    let result = match outcome {
        Ok(result) => result,
        Err(AlignError::Transform(err)) => {
            tracing::error!("transform rejected: {err}");
            return Ok(1);
        }
        Err(err @ AlignError::Collaborator { .. }) => return Err(err.into()),
    };

    log_summary(&result)?;
    crate::write_json(out, &result, args.compact)?;
    Ok(0)
}

fn log_summary(result: &TransformResult) -> Result<()> {
    let digest = result.plan.digest().context("failed to digest plan")?;
    for warning in &result.report.warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        plan_digest = %digest,
        mapped = result.report.mapped.len(),
        dropped = result.report.dropped.len(),
        "payload aligned"
    );
    Ok(())
}
