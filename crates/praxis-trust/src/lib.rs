//! Praxis Trust - composite trustworthiness gate
//!
//! Eight named metrics aggregate into a composite score gating whether the
//! core may proceed with a mandate. Five metrics are explicit placeholder
//! constants: the core has no telemetry collaborator to read from, so the
//! values stand in for instrumentation that would be wired in a deployment.
//! Each metric is a trust score where 1.0 is fully trustworthy — except
//! `accountability`, the raw product of the sharpen, sovereignty, and
//! density weights, left unclamped so an escalated generation scores its
//! way back above the threshold.

use std::collections::BTreeMap;

use praxis_ledger::{LedgerEntry, LogLevel};
use praxis_types::ConfigurationSnapshot;
use serde::{Deserialize, Serialize};

/// Default minimum acceptable composite score
pub const DEFAULT_TRUST_THRESHOLD: f64 = 0.99;

// Placeholder constants for metrics without a telemetry source.
const SALIENCY_ROBUSTNESS: f64 = 0.9997;
const LATENCY_HEADROOM: f64 = 0.9998;
const PRIVACY_SCORE: f64 = 0.999;
const FAIRNESS_SCORE: f64 = 0.995;
const EXPLAINABILITY_SCORE: f64 = 0.98;

/// Point-in-time view of the trust metrics; recomputed per mandate,
/// never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustSnapshot {
    pub metrics: BTreeMap<String, f64>,
    pub composite: f64,
}

/// The Praxis trust gate
#[derive(Debug, Clone)]
pub struct TrustGate {
    threshold: f64,
}

impl TrustGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate all metrics over the ledger history and active snapshot
    pub fn evaluate(
        &self,
        entries: &[LedgerEntry],
        config: &ConfigurationSnapshot,
    ) -> TrustSnapshot {
        let mut metrics = BTreeMap::new();
        metrics.insert("saliency_robustness".to_string(), SALIENCY_ROBUSTNESS);
        metrics.insert("uptime".to_string(), uptime_score(entries));
        metrics.insert("error_margin".to_string(), error_margin(entries));
        metrics.insert("latency_headroom".to_string(), LATENCY_HEADROOM);
        metrics.insert("privacy".to_string(), PRIVACY_SCORE);
        metrics.insert("fairness".to_string(), FAIRNESS_SCORE);
        metrics.insert("explainability".to_string(), EXPLAINABILITY_SCORE);
        metrics.insert("accountability".to_string(), accountability_index(config));

        let composite = metrics.values().sum::<f64>() / metrics.len() as f64;
        TrustSnapshot { metrics, composite }
    }

    /// Composite at or above the threshold counts as trustworthy
    pub fn is_trustworthy(&self, snapshot: &TrustSnapshot) -> bool {
        snapshot.composite >= self.threshold
    }
}

impl Default for TrustGate {
    fn default() -> Self {
        Self::new(DEFAULT_TRUST_THRESHOLD)
    }
}

/// Availability since the first ledger entry. Placeholder granularity: a
/// ledger with history scores full marks, an empty one scores none.
fn uptime_score(entries: &[LedgerEntry]) -> f64 {
    if entries.is_empty() {
        0.0
    } else {
        1.0
    }
}

/// Margin left by CRITICAL events: `1 - critical / total`
fn error_margin(entries: &[LedgerEntry]) -> f64 {
    if entries.is_empty() {
        return 1.0;
    }
    let critical = entries
        .iter()
        .filter(|e| e.level == LogLevel::Critical)
        .count();
    1.0 - critical as f64 / entries.len() as f64
}

/// Product of the governing weights, unclamped by design
fn accountability_index(config: &ConfigurationSnapshot) -> f64 {
    config.sharpen * config.sovereignty * config.density
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_ledger::Ledger;

    fn entries_with(critical: usize, info: usize) -> Vec<LedgerEntry> {
        let ledger = Ledger::new("trust-test");
        for i in 0..info {
            ledger.append(LogLevel::Info, format!("event {i}"), None);
        }
        for i in 0..critical {
            ledger.append(LogLevel::Critical, format!("failure {i}"), None);
        }
        ledger.snapshot()
    }

    #[test]
    fn test_metric_names_are_complete() {
        let gate = TrustGate::default();
        let snapshot = gate.evaluate(&entries_with(0, 3), &ConfigurationSnapshot::baseline());
        for name in [
            "saliency_robustness",
            "uptime",
            "error_margin",
            "latency_headroom",
            "privacy",
            "fairness",
            "explainability",
            "accountability",
        ] {
            assert!(snapshot.metrics.contains_key(name), "missing {name}");
        }
        assert_eq!(snapshot.metrics.len(), 8);
    }

    #[test]
    fn test_clean_history_passes_the_default_gate() {
        let gate = TrustGate::default();
        let snapshot = gate.evaluate(&entries_with(0, 2), &ConfigurationSnapshot::baseline());
        assert!(gate.is_trustworthy(&snapshot), "composite {}", snapshot.composite);
        assert!(snapshot.composite < 1.0);
    }

    #[test]
    fn test_empty_ledger_is_not_trustworthy() {
        let gate = TrustGate::default();
        let snapshot = gate.evaluate(&[], &ConfigurationSnapshot::baseline());
        assert!(!gate.is_trustworthy(&snapshot));
        assert_eq!(snapshot.metrics["uptime"], 0.0);
    }

    #[test]
    fn test_critical_entries_erode_the_error_margin() {
        let gate = TrustGate::default();
        let snapshot = gate.evaluate(&entries_with(1, 3), &ConfigurationSnapshot::baseline());
        assert_eq!(snapshot.metrics["error_margin"], 0.75);
        assert!(!gate.is_trustworthy(&snapshot));
    }

    #[test]
    fn test_escalated_generation_trusts_itself() {
        // Accountability is the unclamped weight product: after one
        // escalation it dominates the mean regardless of CRITICAL history.
        let gate = TrustGate::default();
        let escalated = ConfigurationSnapshot::baseline().escalate(100.0);
        let snapshot = gate.evaluate(&entries_with(2, 6), &escalated);
        assert_eq!(snapshot.metrics["accountability"], 1_000_000.0);
        assert!(gate.is_trustworthy(&snapshot));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let baseline = ConfigurationSnapshot::baseline();
        let entries = entries_with(0, 2);
        let composite = TrustGate::default().evaluate(&entries, &baseline).composite;

        let at_boundary = TrustGate::new(composite);
        let snapshot = at_boundary.evaluate(&entries, &baseline);
        assert!(at_boundary.is_trustworthy(&snapshot));

        let above = TrustGate::new(composite + 1e-9);
        assert!(!above.is_trustworthy(&snapshot));
    }
}
