//! Praxis Core - the mandate execution pipeline
//!
//! Composes the component crates into `Core::submit(mandate)`: readiness
//! gate, composite trust gate, intent normalization, capability
//! orchestration and dispatch, policy gate, sealing, and the hash-chained
//! audit trail behind all of it. A retryable fault degrades the core,
//! reinitializes it with an escalated configuration generation, and earns
//! the mandate exactly one retry.
//!
//! # Invariants
//!
//! 1. `Ready` is a precondition for accepting a submit; `Degraded` and
//!    `Initializing` fail fast with a system fault
//! 2. Every fault is recorded in the ledger before it propagates
//! 3. Configuration snapshots are immutable; reboots install a new
//!    generation rather than mutating the old one
//! 4. Retries are bounded by an explicit counter, never recursive

pub mod config;
pub mod controller;
pub mod core;
pub mod cultivation;
pub mod fault;
pub mod report;

pub use config::CoreConfig;
pub use controller::{CoreState, CoreStatus};
pub use core::{
    Core, MSG_CAPABILITY_EXECUTED, MSG_IMPACT_RECORDED, MSG_INTENT_NORMALIZED,
    MSG_MANDATE_ACCEPTED, MSG_OUTPUT_SEALED, MSG_PLAN_ORCHESTRATED, MSG_POLICY_PASSED,
    MSG_SUBTASK_DROPPED, MSG_TRUST_UPDATED,
};
pub use cultivation::{CultivationEngine, ImpactMetrics};
pub use fault::Fault;
pub use report::MandateReport;
