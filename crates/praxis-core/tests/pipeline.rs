use std::sync::Arc;

use praxis_capabilities::{CapabilityAgent, CapabilityRegistry, Params};
use praxis_core::{
    Core, CoreConfig, CoreStatus, Fault, MSG_CAPABILITY_EXECUTED, MSG_INTENT_NORMALIZED,
    MSG_PLAN_ORCHESTRATED, MSG_POLICY_PASSED, MSG_TRUST_UPDATED,
};
use praxis_ledger::{LedgerEntry, LogLevel, SystemClock};
use praxis_types::{CapabilityId, ConfigurationSnapshot, Mandate};

const SCENARIO_A_INTENT: &str =
    "Architect market dominance through verifiable systems and data optimization.";
const SCENARIO_B_INTENT: &str = "initiate destruction sequence";

struct BlankAgent;

impl CapabilityAgent for BlankAgent {
    fn execute(&self, _params: &Params, _config: &ConfigurationSnapshot) -> String {
        String::new()
    }
}

fn build_core() -> Core {
    Core::new(CoreConfig::default())
}

fn count_stage(entries: &[LedgerEntry], message: &str) -> usize {
    entries.iter().filter(|e| e.message == message).count()
}

#[test]
fn test_scenario_a_executes_end_to_end() {
    let core = build_core();
    let report = core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap();

    // All three capabilities contributed to the combined output
    assert!(report.output.contains("Leverage analysis"));
    assert!(report.output.contains("Attestation"));
    assert!(report.output.contains("Distilled payload"));

    // Formatted result carries the verification and success markers
    let rendered = report.to_string();
    assert!(rendered.contains("VERIFICATION:"));
    assert!(rendered.contains("SUCCESS:"));
    assert_eq!(report.verification.len(), 64);
    assert_eq!(report.generation, 0);

    // Exactly one ledger entry per stage, one per execution
    let entries = core.ledger_snapshot();
    assert_eq!(count_stage(&entries, MSG_TRUST_UPDATED), 1);
    assert_eq!(count_stage(&entries, MSG_INTENT_NORMALIZED), 1);
    assert_eq!(count_stage(&entries, MSG_PLAN_ORCHESTRATED), 1);
    assert_eq!(count_stage(&entries, MSG_CAPABILITY_EXECUTED), 3);
    assert_eq!(count_stage(&entries, MSG_POLICY_PASSED), 1);

    assert_eq!(core.state(), CoreStatus::Ready);
    assert!(core.ledger().verify().is_ok());
}

#[test]
fn test_scenario_a_subtasks_follow_priority_order() {
    let core = build_core();
    core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap();

    let executed: Vec<String> = core
        .ledger_snapshot()
        .iter()
        .filter(|e| e.message == MSG_CAPABILITY_EXECUTED)
        .filter_map(|e| {
            e.payload
                .as_ref()
                .and_then(|p| p.get("capability"))
                .and_then(|c| c.as_str())
                .map(str::to_string)
        })
        .collect();
    assert_eq!(executed, vec!["analysis", "proof", "sieve"]);
}

#[test]
fn test_scenario_b_surfaces_a_policy_fault_after_one_reboot() {
    let core = build_core();
    let err = core.submit(Mandate::new(SCENARIO_B_INTENT)).unwrap_err();

    assert!(matches!(err, Fault::Policy(_)), "got {err}");

    // Exactly one reboot: generation incremented once, weights escalated
    let config = core.active_config();
    assert_eq!(config.generation, 1);
    assert_eq!(config.sharpen, 100.0);
    assert_eq!(config.sovereignty, 100.0);
    assert_eq!(config.density, 100.0);

    // The bounded retry re-ran the pipeline exactly once
    let entries = core.ledger_snapshot();
    assert_eq!(count_stage(&entries, MSG_INTENT_NORMALIZED), 2);
    assert_eq!(count_stage(&entries, MSG_POLICY_PASSED), 0);

    // Reboot left a CRITICAL then a SYSTEM entry and recovered to READY
    let critical = entries
        .iter()
        .position(|e| e.level == LogLevel::Critical)
        .expect("critical entry");
    assert_eq!(entries[critical + 1].level, LogLevel::System);
    assert_eq!(core.state(), CoreStatus::Ready);

    // The chain survived the whole ride intact
    assert!(core.ledger().verify().is_ok());
}

#[test]
fn test_integrity_fault_is_bounded_and_surfaced() {
    let registry = CapabilityRegistry::new();
    registry.register(CapabilityId::Sieve, Arc::new(BlankAgent));
    let core = Core::with_collaborators(
        CoreConfig::default(),
        Arc::new(registry),
        Arc::new(SystemClock),
        None,
    );

    let err = core.submit(Mandate::new("filter the data stream")).unwrap_err();
    assert!(matches!(err, Fault::Integrity { .. }), "got {err}");

    // One reboot, then the retry's failure surfaced without another
    assert_eq!(core.active_config().generation, 1);
    let entries = core.ledger_snapshot();
    assert_eq!(count_stage(&entries, MSG_INTENT_NORMALIZED), 2);
}

#[test]
fn test_unreachable_trust_threshold_surfaces_a_trust_fault() {
    let config = CoreConfig {
        trust_threshold: f64::INFINITY,
        ..CoreConfig::default()
    };
    let core = Core::new(config);

    let err = core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap_err();
    assert!(matches!(err, Fault::Trust { .. }), "got {err}");

    // Both attempts stopped at the trust gate
    let entries = core.ledger_snapshot();
    assert_eq!(count_stage(&entries, MSG_TRUST_UPDATED), 2);
    assert_eq!(count_stage(&entries, MSG_INTENT_NORMALIZED), 0);
}

#[test]
fn test_busy_capability_is_dropped_not_queued() {
    let core = build_core();
    core.registry().try_claim(CapabilityId::Analysis).unwrap();

    let report = core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap();

    // The two idle capabilities still executed
    assert!(report.output.contains("Attestation"));
    assert!(report.output.contains("Distilled payload"));
    assert!(!report.output.contains("Leverage analysis"));

    // The starved candidate is visible in the orchestration record
    let entries = core.ledger_snapshot();
    let plan_entry = entries
        .iter()
        .find(|e| e.message == MSG_PLAN_ORCHESTRATED)
        .expect("plan entry");
    let dropped = plan_entry
        .payload
        .as_ref()
        .and_then(|p| p.get("dropped"))
        .and_then(|d| d.as_array())
        .expect("dropped list");
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].as_str(), Some("analysis"));

    core.registry().release(CapabilityId::Analysis);
}

#[test]
fn test_successful_mandates_reinforce_impact_metrics() {
    let core = build_core();
    let first = core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap();
    let second = core.submit(Mandate::new(SCENARIO_A_INTENT)).unwrap();

    assert!(second.impact.capture_velocity > first.impact.capture_velocity);
    assert!(second.impact.shift_index > first.impact.shift_index);
}
