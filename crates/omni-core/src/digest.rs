//! # Plan Digest
//!
//! A `PlanDigest` is the SHA-256 of a plan's canonical bytes. Two runs of
//! the planner over equivalent inputs must produce the same digest; the CLI
//! logs it so reproducibility can be checked from the outside.
//!
//! [`sha256_digest`] accepts only `&CanonicalBytes`, so no digest can be
//! computed over an arbitrary serialization.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// SHA-256 digest of a canonicalized plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanDigest(pub [u8; 32]);

impl PlanDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for PlanDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> PlanDigest {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    PlanDigest(hasher.finalize().into())
}
