//! Capability identifiers
//!
//! Capabilities are a closed set: dispatch goes through this enum and an
//! external registration table, never through string keys or inheritance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a named, pluggable deterministic executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityId {
    /// Densifies text payloads
    Sieve,
    /// Produces deterministic attestation tags
    Proof,
    /// Surfaces leverage points for a target
    Analysis,
}

impl CapabilityId {
    /// All built-in capabilities, in registry order
    pub fn all() -> [CapabilityId; 3] {
        [CapabilityId::Sieve, CapabilityId::Proof, CapabilityId::Analysis]
    }

    /// Stable lowercase name used in ledger payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityId::Sieve => "sieve",
            CapabilityId::Proof => "proof",
            CapabilityId::Analysis => "analysis",
        }
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
