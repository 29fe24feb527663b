//! # omni-cli -- Command-Line Interface for omni-align
//!
//! Provides the `omni` binary.
//!
//! ## Subcommands
//!
//! - `omni transform` -- align a source payload to a schema and print the
//!   payload, plan, and report.
//! - `omni plan` -- print the alignment plan and its digest without
//!   validating the output.
//! - `omni check-schema` -- report whether a schema is inside the supported
//!   subset.
//!
//! ```bash
//! omni transform --schema profile.yaml user.json
//! cat user.json | omni plan --schema profile.json -
//! omni check-schema profile.yaml
//! ```
//!
//! ## Exit Codes
//!
//! 0 on success, 1 when the schema or the aligned output is rejected, 2 on
//! operational errors (unreadable files, malformed JSON, unreachable
//! collaborator).

pub mod check;
pub mod plan;
pub mod transform;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use omni_core::Payload;

/// Read the source payload from `path`, or from stdin when `path` is absent
/// or `-`.
pub fn read_source(path: Option<&Path>) -> Result<Payload> {
    let (content, origin) = match path {
        Some(p) if p != Path::new("-") => (
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read source payload: {}", p.display()))?,
            p.display().to_string(),
        ),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read source payload from stdin")?;
            (buf, "<stdin>".to_string())
        }
    };
    parse_source(&content, &origin)
}

/// Parse a source payload document. The root must be a JSON object.
pub fn parse_source(content: &str, origin: &str) -> Result<Payload> {
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("failed to parse source payload as JSON: {origin}"))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("source payload must be a JSON object: {origin}"),
    }
}

/// Load a schema document from a `.json`, `.yaml`, or `.yml` file.
pub fn read_schema(path: &Path) -> Result<Value> {
    omni_schema::load_schema(path).map_err(anyhow::Error::from)
}

/// Write `value` as JSON followed by a newline.
pub fn write_json(out: &mut dyn Write, value: &impl Serialize, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
