//! Praxis Types - Canonical domain types for the mandate execution core
//!
//! This crate contains the foundational types shared by every praxis crate,
//! with zero dependencies on other praxis crates:
//!
//! - Mandate types (Mandate, MandateId, Priority)
//! - Capability identifiers (a closed enum, no string dispatch)
//! - Configuration snapshots ("axiom weights") and generation escalation
//!
//! # Architectural Invariants
//!
//! 1. A `Mandate` is immutable once created; retries operate on clones
//! 2. A `ConfigurationSnapshot` is immutable once created; a reboot installs
//!    a new snapshot with an incremented generation
//! 3. Capabilities are identified by `CapabilityId` variants only

pub mod capability;
pub mod config;
pub mod mandate;

pub use capability::*;
pub use config::*;
pub use mandate::*;
