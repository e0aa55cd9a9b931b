//! Configuration snapshots ("axiom weights")
//!
//! A snapshot is the immutable numeric parameter set governing gate
//! thresholds and capability behavior for one generation. Reboots never
//! mutate a snapshot; they install a new one with an incremented generation.

use serde::{Deserialize, Serialize};

/// Immutable weight set for one configuration generation
///
/// Every component call receives the snapshot explicitly; nothing reads
/// configuration through shared mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    pub sharpen: f64,
    pub sovereignty: f64,
    pub density: f64,
    pub noise: f64,
    pub depth: f64,
    pub flaw: f64,
    /// Monotonically increasing counter identifying the active snapshot
    pub generation: u32,
}

impl ConfigurationSnapshot {
    /// The generation-0 baseline weights
    pub fn baseline() -> Self {
        Self {
            sharpen: 1.0,
            sovereignty: 1.0,
            density: 1.0,
            noise: f64::NEG_INFINITY,
            depth: f64::INFINITY,
            flaw: 0.0,
            generation: 0,
        }
    }

    /// Derive the next generation: every weight multiplied by `factor`,
    /// generation incremented. The receiver is left untouched.
    pub fn escalate(&self, factor: f64) -> Self {
        Self {
            sharpen: self.sharpen * factor,
            sovereignty: self.sovereignty * factor,
            density: self.density * factor,
            noise: self.noise * factor,
            depth: self.depth * factor,
            flaw: self.flaw * factor,
            generation: self.generation + 1,
        }
    }

    /// Whether the noise weight demands the aggressive token filter
    pub fn aggressive_noise_filter(&self) -> bool {
        self.noise == f64::NEG_INFINITY
    }
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_weights() {
        let snapshot = ConfigurationSnapshot::baseline();
        assert_eq!(snapshot.sharpen, 1.0);
        assert_eq!(snapshot.sovereignty, 1.0);
        assert_eq!(snapshot.density, 1.0);
        assert_eq!(snapshot.noise, f64::NEG_INFINITY);
        assert_eq!(snapshot.depth, f64::INFINITY);
        assert_eq!(snapshot.flaw, 0.0);
        assert_eq!(snapshot.generation, 0);
    }

    #[test]
    fn test_escalate_produces_new_generation() {
        let base = ConfigurationSnapshot::baseline();
        let next = base.escalate(100.0);

        assert_eq!(next.generation, 1);
        assert_eq!(next.sharpen, 100.0);
        assert_eq!(next.sovereignty, 100.0);
        assert_eq!(next.density, 100.0);
        // Infinities and zero are fixed points of escalation
        assert_eq!(next.noise, f64::NEG_INFINITY);
        assert_eq!(next.depth, f64::INFINITY);
        assert_eq!(next.flaw, 0.0);
        // The old snapshot is untouched
        assert_eq!(base.generation, 0);
        assert_eq!(base.sharpen, 1.0);
    }

    #[test]
    fn test_aggressive_filter_tracks_noise_weight() {
        let base = ConfigurationSnapshot::baseline();
        assert!(base.aggressive_noise_filter());
        assert!(base.escalate(100.0).aggressive_noise_filter());

        let relaxed = ConfigurationSnapshot {
            noise: 0.0,
            ..ConfigurationSnapshot::baseline()
        };
        assert!(!relaxed.aggressive_noise_filter());
    }
}
