//! The mandate execution pipeline
//!
//! `Core::submit` runs one mandate through the full stage sequence:
//! readiness check, trust gate, normalization, orchestration, capability
//! execution, policy gate, sealing. Any retryable fault parks the core
//! through the reboot controller and earns exactly one retry of the same
//! mandate; a second failure surfaces.

use std::sync::Arc;

use parking_lot::Mutex;
use praxis_capabilities::{CapabilityError, CapabilityRegistry, ExecutionResult};
use praxis_ledger::{Clock, EntrySink, Ledger, LedgerEntry, LogLevel, SystemClock};
use praxis_policy::PolicyGate;
use praxis_trust::{TrustGate, TrustSnapshot};
use praxis_types::{ConfigurationSnapshot, Mandate};

use crate::config::CoreConfig;
use crate::controller::{CoreStatus, RebootController};
use crate::cultivation::CultivationEngine;
use crate::fault::Fault;
use crate::report::MandateReport;

// Stage messages; stable so ledger consumers can count per-stage entries.
pub const MSG_MANDATE_ACCEPTED: &str = "mandate accepted";
pub const MSG_TRUST_UPDATED: &str = "trust metrics updated";
pub const MSG_INTENT_NORMALIZED: &str = "intent normalized";
pub const MSG_PLAN_ORCHESTRATED: &str = "execution plan orchestrated";
pub const MSG_CAPABILITY_EXECUTED: &str = "capability executed";
pub const MSG_SUBTASK_DROPPED: &str = "subtask dropped: capability busy";
pub const MSG_POLICY_PASSED: &str = "policy check passed";
pub const MSG_OUTPUT_SEALED: &str = "output sealed";
pub const MSG_IMPACT_RECORDED: &str = "impact metrics recorded";

/// The Praxis mandate execution core
///
/// Thread-safe: the ledger serializes appends, the registry serializes
/// capability claims, and state transitions go through the reboot
/// controller's lock.
pub struct Core {
    config: CoreConfig,
    ledger: Arc<Ledger>,
    registry: Arc<CapabilityRegistry>,
    policy: PolicyGate,
    trust: TrustGate,
    controller: RebootController,
    cultivation: Mutex<CultivationEngine>,
}

impl Core {
    /// Create a core with the built-in capability registry and system clock
    pub fn new(config: CoreConfig) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(CapabilityRegistry::with_builtins()),
            Arc::new(SystemClock),
            None,
        )
    }

    /// Create a core with injected collaborators
    pub fn with_collaborators(
        config: CoreConfig,
        registry: Arc<CapabilityRegistry>,
        clock: Arc<dyn Clock>,
        sink: Option<Arc<dyn EntrySink>>,
    ) -> Self {
        let mut ledger = Ledger::with_clock(config.node_id(), clock);
        if let Some(sink) = sink {
            ledger = ledger.with_sink(sink);
        }

        let controller = RebootController::new(config.baseline.clone(), config.escalation_factor);
        let trust = TrustGate::new(config.trust_threshold);

        let core = Self {
            config,
            ledger: Arc::new(ledger),
            registry,
            policy: PolicyGate::new(),
            trust,
            controller,
            cultivation: Mutex::new(CultivationEngine::new()),
        };

        core.ledger.append(
            LogLevel::System,
            "core online",
            Some(serde_json::json!({
                "node_id": core.ledger.node_id(),
                "generation": core.controller.active_config().generation,
            })),
        );
        core.ledger.append(
            LogLevel::Security,
            "capability isolation boundaries applied",
            None,
        );
        core.controller.mark_ready();
        tracing::info!(target: "praxis::core", node_id = core.ledger.node_id(), "core ready");
        core
    }

    /// Execute a mandate end to end
    pub fn submit(&self, mandate: Mandate) -> Result<MandateReport, Fault> {
        if mandate.intent.trim().is_empty() {
            let fault = Fault::Validation {
                reason: "mandate intent is empty".to_string(),
            };
            self.ledger.append(
                LogLevel::Error,
                "mandate rejected: empty intent",
                Some(serde_json::json!({ "mandate_id": mandate.id.to_string() })),
            );
            return Err(fault);
        }

        match self.controller.status() {
            CoreStatus::Ready => {}
            CoreStatus::Degraded { reason } => {
                let fault = Fault::System {
                    reason: format!("core degraded: {reason}"),
                };
                self.ledger.append(
                    LogLevel::Error,
                    "mandate refused: core degraded",
                    Some(serde_json::json!({ "mandate_id": mandate.id.to_string() })),
                );
                return Err(fault);
            }
            CoreStatus::Initializing => {
                let fault = Fault::System {
                    reason: "core initializing, resubmit shortly".to_string(),
                };
                self.ledger.append(
                    LogLevel::Error,
                    "mandate refused: core initializing",
                    Some(serde_json::json!({ "mandate_id": mandate.id.to_string() })),
                );
                return Err(fault);
            }
        }

        // Bounded retry: one reboot cycle, then whatever happens surfaces.
        let mut retry_depth = 0u8;
        loop {
            let config = self.controller.active_config();
            match self.run_pipeline(&mandate, &config) {
                Ok(report) => return Ok(report),
                Err(fault) => {
                    self.ledger.append(
                        LogLevel::Error,
                        format!("mandate stage fault: {fault}"),
                        Some(serde_json::json!({
                            "mandate_id": mandate.id.to_string(),
                            "kind": fault.kind(),
                            "attempt": retry_depth,
                        })),
                    );

                    if fault.is_retryable() && retry_depth == 0 {
                        retry_depth += 1;
                        self.controller
                            .fault_and_reinitialize(&fault.to_string(), &self.ledger);
                        continue;
                    }
                    return Err(fault);
                }
            }
        }
    }

    fn run_pipeline(
        &self,
        mandate: &Mandate,
        config: &ConfigurationSnapshot,
    ) -> Result<MandateReport, Fault> {
        let mandate_id = mandate.id.to_string();

        self.ledger.append(
            LogLevel::Info,
            MSG_MANDATE_ACCEPTED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "priority": mandate.priority,
                "intent_digest": praxis_crypto::sha256_hex(mandate.intent.as_bytes()),
            })),
        );

        // Trust gate
        let trust = self.trust.evaluate(&self.ledger.snapshot(), config);
        self.ledger.append(
            LogLevel::Metrics,
            MSG_TRUST_UPDATED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "composite": trust.composite,
                "metrics": trust.metrics,
            })),
        );
        if !self.trust.is_trustworthy(&trust) {
            return Err(Fault::Trust {
                composite: trust.composite,
                threshold: self.trust.threshold(),
            });
        }

        // Normalization
        let normalized =
            praxis_intent::normalize(&mandate.intent, config.aggressive_noise_filter());
        self.ledger.append(
            LogLevel::Info,
            MSG_INTENT_NORMALIZED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "normalized": normalized,
            })),
        );

        // Orchestration
        let plan = praxis_orchestrator::plan(&normalized, self.registry.as_ref());
        self.ledger.append(
            LogLevel::Info,
            MSG_PLAN_ORCHESTRATED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "plan_id": plan.plan_id,
                "scheduled": plan.subtasks.iter().map(|s| s.capability.as_str()).collect::<Vec<_>>(),
                "dropped": plan.dropped.iter().map(|d| d.capability.as_str()).collect::<Vec<_>>(),
            })),
        );

        // Execution
        let mut results: Vec<ExecutionResult> = Vec::new();
        for subtask in &plan.subtasks {
            match self.registry.dispatch(subtask.capability, &subtask.params, config) {
                Ok(result) => {
                    self.ledger.append(
                        LogLevel::Info,
                        MSG_CAPABILITY_EXECUTED,
                        Some(serde_json::json!({
                            "mandate_id": mandate_id,
                            "capability": result.capability.as_str(),
                            "action": subtask.action,
                            "digest": result.digest,
                        })),
                    );
                    results.push(result);
                }
                Err(CapabilityError::Busy { capability }) => {
                    // Lost a claim race to a concurrent mandate; the subtask
                    // is dropped, never queued or double-dispatched.
                    self.ledger.append(
                        LogLevel::Warning,
                        MSG_SUBTASK_DROPPED,
                        Some(serde_json::json!({
                            "mandate_id": mandate_id,
                            "capability": capability.as_str(),
                        })),
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        let combined = if results.is_empty() {
            // Nothing executed: the candidate output is the normalized
            // intent itself, so the policy gate still sees the request.
            normalized.clone()
        } else {
            results
                .iter()
                .map(|r| r.output.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let combined_digest = praxis_crypto::sha256_hex(combined.as_bytes());

        // Policy gate
        self.policy.check(&combined, config)?;
        self.ledger.append(
            LogLevel::Info,
            MSG_POLICY_PASSED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "combined_digest": combined_digest,
            })),
        );

        // Densify and seal
        let output = self.policy.densify(&combined, self.config.density_threshold);
        let verification = praxis_crypto::sha256_hex(output.as_bytes());
        self.ledger.append(
            LogLevel::Security,
            MSG_OUTPUT_SEALED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "digest": verification,
            })),
        );

        // Cultivation metrics
        let impact = {
            let mut cultivation = self.cultivation.lock();
            cultivation.reinforce();
            cultivation.impact()
        };
        self.ledger.append(
            LogLevel::Metrics,
            MSG_IMPACT_RECORDED,
            Some(serde_json::json!({
                "mandate_id": mandate_id,
                "shift_index": impact.shift_index,
                "capture_velocity": impact.capture_velocity,
                "adoption_multiplier": impact.adoption_multiplier,
            })),
        );

        Ok(MandateReport {
            mandate_id: mandate.id.clone(),
            output,
            verification,
            generation: config.generation,
            impact,
        })
    }

    /// Full copy of the audit chain
    pub fn ledger_snapshot(&self) -> Vec<LedgerEntry> {
        self.ledger.snapshot()
    }

    /// The shared ledger handle
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Trust metrics over the current ledger and active configuration
    pub fn trust_snapshot(&self) -> TrustSnapshot {
        self.trust
            .evaluate(&self.ledger.snapshot(), &self.controller.active_config())
    }

    /// Current pipeline status
    pub fn state(&self) -> CoreStatus {
        self.controller.status()
    }

    /// The active configuration snapshot
    pub fn active_config(&self) -> Arc<ConfigurationSnapshot> {
        self.controller.active_config()
    }

    /// The capability registry backing this core
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_while_degraded_fails_fast() {
        let core = Core::new(CoreConfig::default());
        core.controller.degrade("operator hold");

        let err = core.submit(Mandate::new("compress the data stream")).unwrap_err();
        assert_eq!(err.kind(), "system");
        // No pipeline stage ran
        let entries = core.ledger_snapshot();
        assert!(!entries.iter().any(|e| e.message == MSG_MANDATE_ACCEPTED));
    }

    #[test]
    fn test_startup_appends_system_and_security_entries() {
        let core = Core::new(CoreConfig::default());
        let entries = core.ledger_snapshot();
        assert_eq!(entries[0].level, LogLevel::System);
        assert_eq!(entries[0].message, "core online");
        assert_eq!(entries[1].level, LogLevel::Security);
        assert_eq!(core.state(), CoreStatus::Ready);
    }

    #[test]
    fn test_empty_intent_is_a_validation_fault_without_reboot() {
        let core = Core::new(CoreConfig::default());
        let err = core.submit(Mandate::new("   ")).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(core.active_config().generation, 0);
    }
}
