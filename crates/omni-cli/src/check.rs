//! # Check-Schema Subcommand
//!
//! Loads a schema document and reports whether it is inside the supported
//! subset: an object root with `properties` and no keys beyond `type`,
//! `properties`, and `required`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use omni_schema::validate_schema;

/// Arguments for the `omni check-schema` subcommand.
#[derive(Args, Debug)]
pub struct CheckSchemaArgs {
    /// Schema file (.json, .yaml, or .yml).
    #[arg(value_name = "FILE")]
    pub schema: PathBuf,
}

/// Execute the check-schema subcommand.
///
/// Returns exit code: 0 if the schema is supported, 1 otherwise.
pub fn run_check_schema(args: &CheckSchemaArgs, out: &mut dyn Write) -> Result<u8> {
    let doc = crate::read_schema(&args.schema)?;
    match validate_schema(&doc) {
        Ok(schema) => {
            let properties: Vec<&str> = schema.property_names().collect();
            writeln!(out, "OK: {}", args.schema.display())?;
            writeln!(out, "  properties: {}", properties.join(", "))?;
            writeln!(out, "  required: {}", schema.required().join(", "))?;
            Ok(0)
        }
        Err(err) => {
            writeln!(out, "FAIL: {}", args.schema.display())?;
            writeln!(out, "  {err}")?;
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str, name: &str) -> (u8, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        let mut out = Vec::new();
        let code = run_check_schema(&CheckSchemaArgs { schema: path }, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn supported_schema_lists_properties() {
        let (code, out) = check(
            "type: object\nproperties:\n  b: {}\n  a: {}\nrequired: [a]\n",
            "s.yaml",
        );
        assert_eq!(code, 0);
        assert!(out.contains("properties: a, b"));
        assert!(out.contains("required: a"));
    }

    #[test]
    fn composition_keywords_fail() {
        let (code, out) = check(
            r#"{"type": "object", "properties": {}, "oneOf": [], "$defs": {}}"#,
            "s.json",
        );
        assert_eq!(code, 1);
        assert!(out.contains("unsupported top-level schema keys: ['$defs', 'oneOf']"));
    }

    #[test]
    fn missing_properties_fail() {
        let (code, out) = check(r#"{"type": "object"}"#, "s.json");
        assert_eq!(code, 1);
        assert!(out.contains("schema must define object properties"));
    }
}
