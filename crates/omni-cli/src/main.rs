//! # omni CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Diagnostics go to stderr so stdout carries only the JSON result.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use omni_cli::check::{run_check_schema, CheckSchemaArgs};
use omni_cli::plan::{run_plan, PlanArgs};
use omni_cli::transform::{run_transform, TransformArgs};

/// Align arbitrary JSON payloads to a flat target schema.
#[derive(Parser, Debug)]
#[command(name = "omni", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align a source payload to a schema and print payload, plan, and report.
    Transform(TransformArgs),

    /// Print the alignment plan and its digest.
    Plan(PlanArgs),

    /// Check that a schema is inside the supported subset.
    CheckSchema(CheckSchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "omni CLI starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::Transform(args) => run_transform(&args, &mut out),
        Commands::Plan(args) => run_plan(&args, &mut out),
        Commands::CheckSchema(args) => run_check_schema(&args, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
