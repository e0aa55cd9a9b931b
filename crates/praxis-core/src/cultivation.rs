//! Cultivation metrics
//!
//! Tracks the self-reinforcing advantage built from successfully executed
//! mandates and derives the impact metrics reported with each result. The
//! recipes are fixed deterministic placeholders, amplified by accumulated
//! strength rather than external market data.

use serde::{Deserialize, Serialize};

const BASE_SHIFT_INDEX: f64 = 0.9997;
const BASE_CAPTURE_VELOCITY: f64 = 1.0e12;
const BASE_ADOPTION_MULTIPLIER: f64 = 100.0;

/// Strength grows by this factor per successful mandate, up to the cap
const REINFORCEMENT_RATE: f64 = 1.001;
const STRENGTH_CAP: f64 = 2.0;

/// Impact figures attached to a mandate report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub shift_index: f64,
    pub capture_velocity: f64,
    pub adoption_multiplier: f64,
}

/// Accumulates reinforcement across successful mandates
#[derive(Debug, Clone)]
pub struct CultivationEngine {
    strength: f64,
    refinements: u64,
}

impl CultivationEngine {
    pub fn new() -> Self {
        Self {
            strength: 1.0,
            refinements: 0,
        }
    }

    /// Record one successfully executed mandate
    pub fn reinforce(&mut self) {
        self.strength = (self.strength * REINFORCEMENT_RATE).min(STRENGTH_CAP);
        self.refinements += 1;
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn refinements(&self) -> u64 {
        self.refinements
    }

    /// Current impact figures
    pub fn impact(&self) -> ImpactMetrics {
        ImpactMetrics {
            shift_index: BASE_SHIFT_INDEX * self.strength,
            capture_velocity: BASE_CAPTURE_VELOCITY
                * self.strength
                * (1.0 + self.refinements as f64 * 0.01),
            adoption_multiplier: BASE_ADOPTION_MULTIPLIER * self.strength,
        }
    }
}

impl Default for CultivationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinforcement_compounds() {
        let mut engine = CultivationEngine::new();
        let before = engine.impact();
        engine.reinforce();
        let after = engine.impact();

        assert!(after.shift_index > before.shift_index);
        assert!(after.capture_velocity > before.capture_velocity);
        assert_eq!(engine.refinements(), 1);
    }

    #[test]
    fn test_strength_is_capped() {
        let mut engine = CultivationEngine::new();
        for _ in 0..10_000 {
            engine.reinforce();
        }
        assert!(engine.strength() <= STRENGTH_CAP);
        assert_eq!(engine.impact().adoption_multiplier, BASE_ADOPTION_MULTIPLIER * STRENGTH_CAP);
    }
}
