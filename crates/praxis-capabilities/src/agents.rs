//! Built-in execution agents
//!
//! Each agent is a pure function of its params and the active
//! configuration snapshot. The numeric recipes here are deliberately
//! simple; callers treat agents as pluggable black boxes behind the
//! registry.

use praxis_types::ConfigurationSnapshot;

use crate::registry::{CapabilityAgent, Params};

/// Protocol id stamped into attestation tags
pub const ATTESTATION_PROTOCOL: &str = "PlonK-over-HyperPlonK";

/// Fixed catalogue the analysis agent filters
pub const LEVERAGE_POINTS: &[&str] = &[
    "competitive_intelligence_gaps",
    "supply_chain_optimization",
    "customer_behavior_patterns",
    "regulatory_arbitrage_opportunities",
    "technological_convergence_points",
];

/// Tokens the sieve drops when densifying
const SIEVE_STOP_WORDS: &[&str] = &["a", "an", "the", "is", "are", "and", "or"];

/// Longer sieve payloads are elided in the output
const SIEVE_PREVIEW_LEN: usize = 100;

/// Densifies text payloads
///
/// With a density weight of exactly 1.0 the payload is stripped of stop
/// words and short tokens; any other weight passes the text through
/// unchanged.
#[derive(Debug, Default, Clone)]
pub struct SieveAgent;

impl CapabilityAgent for SieveAgent {
    fn execute(&self, params: &Params, config: &ConfigurationSnapshot) -> String {
        let data = params.get("data").map(String::as_str).unwrap_or("");

        let distilled = if config.density == 1.0 {
            data.split_whitespace()
                .filter(|word| word.len() > 2 && !SIEVE_STOP_WORDS.contains(&word.to_lowercase().as_str()))
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            data.to_string()
        };

        let preview = if distilled.len() > SIEVE_PREVIEW_LEN {
            let cut: String = distilled.chars().take(SIEVE_PREVIEW_LEN).collect();
            format!("{cut}...")
        } else {
            distilled
        };

        format!("Distilled payload: {preview}")
    }
}

/// Produces deterministic attestation tags
///
/// The tag is a SHA-256 digest over the input, the protocol id, and the
/// sovereignty weight. It is a reproducibility marker, not a real
/// zero-knowledge proof; nothing here is cryptographically meaningful
/// beyond tamper evidence.
#[derive(Debug, Default, Clone)]
pub struct ProofAgent;

impl CapabilityAgent for ProofAgent {
    fn execute(&self, params: &Params, config: &ConfigurationSnapshot) -> String {
        let input = params.get("input").map(String::as_str).unwrap_or("");
        let protocol = params
            .get("protocol")
            .map(String::as_str)
            .unwrap_or(ATTESTATION_PROTOCOL);

        let material = format!("{input}:{protocol}:{}", config.sovereignty);
        let digest = praxis_crypto::sha256_hex(material.as_bytes());

        format!("Attestation [{protocol}]: {digest}")
    }
}

/// Surfaces leverage points for a target
///
/// The catalogue is filtered by the sharpen weight; the summary names the
/// surviving count and the first three points.
#[derive(Debug, Default, Clone)]
pub struct AnalysisAgent;

impl CapabilityAgent for AnalysisAgent {
    fn execute(&self, params: &Params, config: &ConfigurationSnapshot) -> String {
        let target = params.get("target").map(String::as_str).unwrap_or("general");

        let relevant: Vec<&str> = LEVERAGE_POINTS
            .iter()
            .filter(|_| config.sharpen > 0.5)
            .copied()
            .collect();

        let preview = relevant
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let ellipsis = if relevant.len() > 3 { "..." } else { "" };

        format!(
            "Leverage analysis for '{target}': {} points identified: {preview}{ellipsis}",
            relevant.len()
        )
    }
}
