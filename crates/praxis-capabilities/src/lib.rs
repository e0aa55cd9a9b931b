//! Praxis Capabilities - capability registry and built-in execution agents
//!
//! Dispatch goes through a closed `CapabilityId` enum plus an external
//! registration table: new capabilities are registered, never subclassed,
//! and the orchestrator never sees an agent directly.
//!
//! # Invariants
//!
//! 1. At most one in-flight execution per capability (atomic busy claims)
//! 2. Every agent output is validated (non-empty after trim) before it is
//!    released to the pipeline
//! 3. Agents are pure functions of their params and the active
//!    configuration snapshot

pub mod agents;
pub mod registry;

pub use agents::{AnalysisAgent, ProofAgent, SieveAgent, ATTESTATION_PROTOCOL, LEVERAGE_POINTS};
pub use registry::{
    AgentStatus, CapabilityAgent, CapabilityError, CapabilityProbe, CapabilityRegistry,
    ExecutionResult, Params, Result,
};
