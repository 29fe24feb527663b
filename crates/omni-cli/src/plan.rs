//! # Plan Subcommand
//!
//! Prints the deterministic alignment plan for a source payload and its
//! canonical digest. The output is not validated, so a plan that would fail
//! on missing required properties is still printed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use omni_core::TransformPlan;
use omni_engine::build_plan;
use omni_schema::validate_schema;

/// Arguments for the `omni plan` subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Target schema (.json, .yaml, or .yml).
    #[arg(long, short, value_name = "FILE")]
    pub schema: PathBuf,

    /// Source payload JSON file. Reads stdin when absent or `-`.
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    digest: String,
    plan: &'a TransformPlan,
}

/// Execute the plan subcommand.
///
/// Returns exit code: 0 on success, 1 if the schema is unsupported.
pub fn run_plan(args: &PlanArgs, out: &mut dyn Write) -> Result<u8> {
    let schema_doc = crate::read_schema(&args.schema)?;
    let source = crate::read_source(args.source.as_deref())?;

    let schema = match validate_schema(&schema_doc) {
        Ok(schema) => schema,
        Err(err) => {
            tracing::error!("schema rejected: {err}");
            return Ok(1);
        }
    };

    let plan = build_plan(&source, &schema);
    let digest = plan.digest().context("failed to digest plan")?;
    tracing::info!(plan_digest = %digest, mappings = plan.mappings.len(), "plan built");

    crate::write_json(
        out,
        &PlanOutput {
            digest: digest.to_string(),
            plan: &plan,
        },
        args.compact,
    )?;
    Ok(0)
}
