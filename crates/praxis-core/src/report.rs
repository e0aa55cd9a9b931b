//! Formatted mandate results

use praxis_types::MandateId;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cultivation::ImpactMetrics;

/// The formatted result of a successfully executed mandate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandateReport {
    pub mandate_id: MandateId,
    /// Densified combined capability output
    pub output: String,
    /// SHA-256 seal over the output
    pub verification: String,
    /// Configuration generation the mandate executed under
    pub generation: u32,
    pub impact: ImpactMetrics,
}

impl fmt::Display for MandateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PRAXIS MANDATE REPORT")?;
        writeln!(f, "OUTPUT: {}", self.output)?;
        writeln!(f, "VERIFICATION: {}", self.verification)?;
        writeln!(f, "SUCCESS: confirmed (generation {})", self.generation)?;
        writeln!(f, "IMPACT_METRICS:")?;
        writeln!(f, "  shift_index: {:.4}", self.impact.shift_index)?;
        writeln!(f, "  capture_velocity: {:.2}", self.impact.capture_velocity)?;
        write!(f, "  adoption_multiplier: {:.2}x", self.impact.adoption_multiplier)
    }
}
