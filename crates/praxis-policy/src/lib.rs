//! Praxis Policy - validates candidate outputs before they leave the core
//!
//! Output that names a denylisted term, or that was produced under a
//! drifted sovereignty weight, never passes. The check is deliberately a
//! plain case-sensitive substring scan: the gate rejects on evidence, it
//! does not interpret.

use praxis_types::ConfigurationSnapshot;
use thiserror::Error;

/// Terms that disqualify an output wherever they appear
pub const DENYLIST: &[&str] = &["shell_level", "destruction", "harmful_intent"];

/// Word budget applied when densification triggers
pub const DENSIFY_WORD_LIMIT: usize = 10;

/// Errors raised by the policy gate
#[derive(Error, Debug, Clone)]
pub enum PolicyError {
    #[error("Output contains denylisted term: {term}")]
    DeniedTerm { term: String },

    #[error("Sovereignty weight {weight} violates the policy baseline")]
    SovereigntyDrift { weight: f64 },
}

pub type Result<T> = std::result::Result<T, PolicyError>;

/// The Praxis policy gate
#[derive(Debug, Default, Clone)]
pub struct PolicyGate;

impl PolicyGate {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate output against the denylist and the active
    /// configuration
    pub fn check(&self, output: &str, config: &ConfigurationSnapshot) -> Result<()> {
        for term in DENYLIST {
            if output.contains(term) {
                return Err(PolicyError::DeniedTerm {
                    term: (*term).to_string(),
                });
            }
        }

        if config.sovereignty != 1.0 {
            return Err(PolicyError::SovereigntyDrift {
                weight: config.sovereignty,
            });
        }

        Ok(())
    }

    /// Truncate outputs whose word-to-character ratio exceeds `threshold`
    ///
    /// Ordinary prose sits far below any sane threshold; the transform only
    /// bites on degenerate streams of very short tokens.
    pub fn densify(&self, output: &str, threshold: f64) -> String {
        if output.is_empty() {
            return String::new();
        }

        let words: Vec<&str> = output.split_whitespace().collect();
        let ratio = words.len() as f64 / output.len() as f64;
        if ratio > threshold && words.len() > DENSIFY_WORD_LIMIT {
            let mut densified = words[..DENSIFY_WORD_LIMIT].join(" ");
            densified.push_str("...");
            densified
        } else {
            output.to_string()
        }
    }
}
