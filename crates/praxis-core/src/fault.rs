//! Fault taxonomy for the mandate pipeline
//!
//! Every fault is recorded in the ledger before it propagates; none are
//! swallowed. All kinds except `Validation` trigger the reboot controller
//! and one bounded retry of the triggering mandate.

use praxis_capabilities::CapabilityError;
use praxis_policy::PolicyError;
use thiserror::Error;

/// Terminal outcome of a failed `submit`
#[derive(Error, Debug)]
pub enum Fault {
    /// Malformed mandate; surfaced immediately, no reboot
    #[error("Mandate validation failed: {reason}")]
    Validation { reason: String },

    /// A capability returned an invalid result
    #[error("Capability integrity violation: {reason}")]
    Integrity { reason: String },

    /// The policy gate rejected the candidate output
    #[error("Policy violation: {0}")]
    Policy(#[from] PolicyError),

    /// The composite trust score fell below the threshold
    #[error("Trust composite {composite} below threshold {threshold}")]
    Trust { composite: f64, threshold: f64 },

    /// Any other unexpected failure
    #[error("System fault: {reason}")]
    System { reason: String },
}

impl Fault {
    /// Stable kind tag recorded in ledger payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Validation { .. } => "validation",
            Fault::Integrity { .. } => "integrity",
            Fault::Policy(_) => "policy",
            Fault::Trust { .. } => "trust",
            Fault::System { .. } => "system",
        }
    }

    /// Whether this fault earns the one bounded retry
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Fault::Validation { .. })
    }
}

impl From<CapabilityError> for Fault {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::IntegrityViolation { .. } => Fault::Integrity {
                reason: err.to_string(),
            },
            other => Fault::System {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_types::CapabilityId;

    #[test]
    fn test_validation_is_not_retryable() {
        let fault = Fault::Validation {
            reason: "empty".to_string(),
        };
        assert!(!fault.is_retryable());
        assert_eq!(fault.kind(), "validation");
    }

    #[test]
    fn test_other_faults_are_retryable() {
        let faults = [
            Fault::Integrity {
                reason: "blank".to_string(),
            },
            Fault::Policy(PolicyError::DeniedTerm {
                term: "destruction".to_string(),
            }),
            Fault::Trust {
                composite: 0.5,
                threshold: 0.99,
            },
            Fault::System {
                reason: "unexpected".to_string(),
            },
        ];
        for fault in faults {
            assert!(fault.is_retryable(), "{}", fault.kind());
        }
    }

    #[test]
    fn test_capability_errors_map_by_kind() {
        let integrity: Fault = CapabilityError::IntegrityViolation {
            capability: CapabilityId::Sieve,
        }
        .into();
        assert_eq!(integrity.kind(), "integrity");

        let system: Fault = CapabilityError::NotRegistered {
            capability: CapabilityId::Proof,
        }
        .into();
        assert_eq!(system.kind(), "system");
    }
}
