//! Capability registration and single-flight dispatch

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use praxis_types::{CapabilityId, ConfigurationSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agents::{AnalysisAgent, ProofAgent, SieveAgent};

/// Subtask parameters; ordered so digests over params are deterministic
pub type Params = BTreeMap<String, String>;

/// Errors that can occur during capability dispatch
#[derive(Error, Debug, Clone)]
pub enum CapabilityError {
    #[error("Capability not registered: {capability}")]
    NotRegistered { capability: CapabilityId },

    #[error("Capability busy: {capability}")]
    Busy { capability: CapabilityId },

    #[error("Capability {capability} produced an invalid result")]
    IntegrityViolation { capability: CapabilityId },
}

pub type Result<T> = std::result::Result<T, CapabilityError>;

/// Idle/busy flag per capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Busy,
}

/// Outcome of one capability execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub capability: CapabilityId,
    pub output: String,
    /// SHA-256 over the output text
    pub digest: String,
}

/// A named, pluggable deterministic executor
///
/// Implementations must be pure functions of `params` and `config`; the
/// registry validates the returned text before accepting it.
pub trait CapabilityAgent: Send + Sync {
    fn execute(&self, params: &Params, config: &ConfigurationSnapshot) -> String;
}

/// Read-only idle/busy view consumed by the planner
pub trait CapabilityProbe: Send + Sync {
    fn is_idle(&self, capability: CapabilityId) -> bool;
}

/// The capability registry
///
/// Maps capability ids to agents and tracks per-capability status.
/// Thread-safe; claims are atomic so two mandates can never dispatch the
/// same capability concurrently.
pub struct CapabilityRegistry {
    agents: DashMap<CapabilityId, Arc<dyn CapabilityAgent>>,
    status: DashMap<CapabilityId, AgentStatus>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            agents: DashMap::new(),
            status: DashMap::new(),
        }
    }

    /// Create a registry with the three built-in agents registered
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(CapabilityId::Sieve, Arc::new(SieveAgent));
        registry.register(CapabilityId::Proof, Arc::new(ProofAgent));
        registry.register(CapabilityId::Analysis, Arc::new(AnalysisAgent));
        registry
    }

    /// Register (or replace) the agent behind a capability
    pub fn register(&self, capability: CapabilityId, agent: Arc<dyn CapabilityAgent>) {
        self.agents.insert(capability, agent);
        self.status.insert(capability, AgentStatus::Idle);
    }

    pub fn is_registered(&self, capability: CapabilityId) -> bool {
        self.agents.contains_key(&capability)
    }

    /// Atomically reserve a capability for execution
    pub fn try_claim(&self, capability: CapabilityId) -> Result<()> {
        let mut slot = self
            .status
            .get_mut(&capability)
            .ok_or(CapabilityError::NotRegistered { capability })?;
        if *slot == AgentStatus::Busy {
            return Err(CapabilityError::Busy { capability });
        }
        *slot = AgentStatus::Busy;
        Ok(())
    }

    /// Return a capability to the idle pool
    pub fn release(&self, capability: CapabilityId) {
        if let Some(mut slot) = self.status.get_mut(&capability) {
            *slot = AgentStatus::Idle;
        }
    }

    /// Claim, execute, release, and validate one capability invocation
    pub fn dispatch(
        &self,
        capability: CapabilityId,
        params: &Params,
        config: &ConfigurationSnapshot,
    ) -> Result<ExecutionResult> {
        let agent = {
            let slot = self
                .agents
                .get(&capability)
                .ok_or(CapabilityError::NotRegistered { capability })?;
            Arc::clone(&slot)
        };

        self.try_claim(capability)?;
        let output = agent.execute(params, config);
        self.release(capability);

        if output.trim().is_empty() {
            return Err(CapabilityError::IntegrityViolation { capability });
        }

        let digest = praxis_crypto::sha256_hex(output.as_bytes());
        Ok(ExecutionResult {
            capability,
            output,
            digest,
        })
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl CapabilityProbe for CapabilityRegistry {
    fn is_idle(&self, capability: CapabilityId) -> bool {
        matches!(
            self.status.get(&capability).map(|s| *s),
            Some(AgentStatus::Idle)
        )
    }
}
