//! # omni-core -- Foundational Types for Payload Alignment
//!
//! This crate defines the records every other `omni-*` crate exchanges:
//! the leaf path newtype, the mapping plan, the run report, the final
//! result, and the closed error taxonomy. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Payloads are `serde_json::Value`.** The source and output payloads
//!    are JSON objects ([`Payload`]). Traversal code matches exhaustively
//!    on the `Value` union; there is no dynamically typed side channel.
//!
//! 2. **Plans are immutable records.** A [`TransformPlan`] is built once by
//!    the planner and read by the executor. Nothing mutates it afterwards.
//!
//! 3. **Two error kinds, both fatal.** [`TransformError`] is either a
//!    [`SchemaError`] (the target schema is outside the supported subset)
//!    or a [`ValidationError`] (the output violates an invariant). Each
//!    carries the sorted offending keys.
//!
//! 4. **Reproducible plans.** [`TransformPlan::digest`] hashes the RFC 8785
//!    canonical form of a plan so two runs can be compared byte for byte.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `omni-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod path;
pub mod plan;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, PlanDigest};
pub use error::{CanonicalizationError, SchemaError, TransformError, ValidationError};
pub use path::FieldPath;
pub use plan::{Mapping, MappingOp, TransformPlan, TransformReport, TransformResult, PLAN_VERSION};

/// A JSON object payload: the shape of both the source and the aligned output.
pub type Payload = serde_json::Map<String, serde_json::Value>;
