//! # omni-schema -- Target Schema Guard
//!
//! The first stage of every transform. A target schema must be a flat
//! object schema:
//!
//! ```json
//! { "type": "object",
//!   "properties": { "<name>": { ... }, ... },
//!   "required": [ "<name>", ... ] }
//! ```
//!
//! Anything else is rejected with a [`SchemaError`](omni_core::SchemaError)
//! before planning starts. Property descriptors are kept but never
//! interpreted.
//!
//! ## Modules
//!
//! - [`guard`] -- the subset check and the typed [`TargetSchema`] it yields.
//! - [`load`] -- reading schema documents from `.json`, `.yaml` or `.yml` files.
//!
//! ## Crate Policy
//!
//! - Depends only on `omni-core` internally.
//! - No composition keywords (`$ref`, `oneOf`, ...) and no nested object
//!   targets. Those are rejected as unsupported top-level keys or simply
//!   not descended into.

pub mod guard;
pub mod load;

pub use guard::{validate_schema, TargetSchema, SUPPORTED_SCHEMA_KEYS};
pub use load::{load_schema, parse_schema_str, LoadError, SchemaFormat};
