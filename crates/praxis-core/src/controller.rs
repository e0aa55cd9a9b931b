//! Reboot controller
//!
//! State machine governing when the core may accept work:
//! `Ready --fault--> Degraded --reinit--> Initializing --success--> Ready`.
//! Transitions happen under one write lock, so no mandate can observe or
//! act under a half-transitioned state. Reinitialization installs a new,
//! escalated configuration snapshot; it never mutates the old one.

use std::sync::Arc;

use parking_lot::RwLock;
use praxis_ledger::{Ledger, LogLevel};
use praxis_types::ConfigurationSnapshot;
use serde::{Deserialize, Serialize};

/// Whether the core is accepting work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoreStatus {
    Initializing,
    Ready,
    Degraded { reason: String },
}

/// Process-wide pipeline state; transitions only through the controller
#[derive(Debug, Clone)]
pub struct CoreState {
    pub status: CoreStatus,
    pub config: Arc<ConfigurationSnapshot>,
}

pub(crate) struct RebootController {
    state: RwLock<CoreState>,
    escalation_factor: f64,
}

impl RebootController {
    pub(crate) fn new(baseline: ConfigurationSnapshot, escalation_factor: f64) -> Self {
        Self {
            state: RwLock::new(CoreState {
                status: CoreStatus::Initializing,
                config: Arc::new(baseline),
            }),
            escalation_factor,
        }
    }

    pub(crate) fn status(&self) -> CoreStatus {
        self.state.read().status.clone()
    }

    pub(crate) fn active_config(&self) -> Arc<ConfigurationSnapshot> {
        self.state.read().config.clone()
    }

    /// Startup transition out of `Initializing`
    pub(crate) fn mark_ready(&self) {
        self.state.write().status = CoreStatus::Ready;
    }

    /// Force the degraded state without reinitializing (used when a caller
    /// needs the core parked)
    pub(crate) fn degrade(&self, reason: impl Into<String>) {
        self.state.write().status = CoreStatus::Degraded {
            reason: reason.into(),
        };
    }

    /// Full fault cycle: degrade, then reinitialize with an escalated
    /// snapshot and return to `Ready`
    ///
    /// Appends a CRITICAL entry for the fault and a SYSTEM entry once the
    /// new generation is online.
    pub(crate) fn fault_and_reinitialize(
        &self,
        reason: &str,
        ledger: &Ledger,
    ) -> Arc<ConfigurationSnapshot> {
        self.degrade(reason);
        ledger.append(
            LogLevel::Critical,
            format!("reboot triggered: {reason}"),
            None,
        );

        let next = {
            let mut state = self.state.write();
            state.status = CoreStatus::Initializing;
            let next = Arc::new(state.config.escalate(self.escalation_factor));
            state.config = next.clone();
            state.status = CoreStatus::Ready;
            next
        };

        tracing::warn!(
            target: "praxis::core",
            generation = next.generation,
            "core reinitialized after fault"
        );
        ledger.append(
            LogLevel::System,
            format!("core reinitialized, generation {} online", next.generation),
            Some(serde_json::json!({ "generation": next.generation })),
        );
        next
    }
}
