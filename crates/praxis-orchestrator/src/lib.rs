//! Praxis Orchestrator - maps normalized intents onto capability subtasks
//!
//! Planning is a fixed trigger table: each trigger is tested independently
//! against the intent, in a fixed priority order, and maps to exactly one
//! `(capability, action, params)` template. A candidate whose capability is
//! busy is never queued — it is reported as a dropped outcome so callers
//! and tests can observe starvation instead of inferring it from silence.

use chrono::{DateTime, Utc};
use praxis_capabilities::{CapabilityProbe, Params, ATTESTATION_PROTOCOL};
use praxis_types::CapabilityId;
use serde::{Deserialize, Serialize};

/// Plan ids are truncated intent digests
pub const PLAN_ID_LEN: usize = 8;

/// One planned capability invocation; immutable after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    pub capability: CapabilityId,
    pub action: String,
    pub params: Params,
}

/// A candidate that matched a trigger but lost to a busy capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedSubTask {
    pub capability: CapabilityId,
    pub trigger: String,
}

/// The ordered outcome of planning one intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationPlan {
    pub plan_id: String,
    pub subtasks: Vec<SubTask>,
    pub dropped: Vec<DroppedSubTask>,
    pub created_at: DateTime<Utc>,
}

impl OrchestrationPlan {
    pub fn is_empty(&self) -> bool {
        self.subtasks.is_empty()
    }
}

/// Map a normalized intent onto an ordered subtask list
///
/// Triggers are independent, not mutually exclusive; the subtask order is
/// the trigger priority order.
pub fn plan(intent: &str, probe: &dyn CapabilityProbe) -> OrchestrationPlan {
    let plan_id = praxis_crypto::short_digest(intent.as_bytes(), PLAN_ID_LEN);
    let mut subtasks = Vec::new();
    let mut dropped = Vec::new();

    let mut schedule = |capability: CapabilityId, trigger: &str, action: &str, params: Params| {
        if probe.is_idle(capability) {
            subtasks.push(SubTask {
                capability,
                action: action.to_string(),
                params,
            });
        } else {
            dropped.push(DroppedSubTask {
                capability,
                trigger: trigger.to_string(),
            });
        }
    };

    if intent.contains("market dominance") {
        schedule(
            CapabilityId::Analysis,
            "market dominance",
            "analyze_signals",
            pairs(&[("target", "dominance")]),
        );
    }
    if intent.contains("verifiable systems") {
        schedule(
            CapabilityId::Proof,
            "verifiable systems",
            "attest",
            pairs(&[("protocol", ATTESTATION_PROTOCOL)]),
        );
    }
    if intent.contains("data") || intent.contains("filter") {
        let trigger = if intent.contains("data") { "data" } else { "filter" };
        schedule(
            CapabilityId::Sieve,
            trigger,
            "sieve",
            pairs(&[("data", intent)]),
        );
    }

    OrchestrationPlan {
        plan_id,
        subtasks,
        dropped,
        created_at: Utc::now(),
    }
}

fn pairs(entries: &[(&str, &str)]) -> Params {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
