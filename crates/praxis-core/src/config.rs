//! Core configuration
//!
//! Values a deployment's configuration loader would supply. Loading from
//! files or the environment is out of scope; the defaults here are the
//! documented baseline.

use praxis_types::ConfigurationSnapshot;
use serde::{Deserialize, Serialize};

/// Hex chars of the node name digest used as the node id
const NODE_ID_LEN: usize = 16;

/// Static configuration for one core instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Human-readable node name; its digest prefix stamps every ledger entry
    pub node_name: String,
    /// Minimum acceptable composite trust score
    pub trust_threshold: f64,
    /// Word/char ratio above which outputs are densified
    pub density_threshold: f64,
    /// Multiplier applied to every weight on reboot
    pub escalation_factor: f64,
    /// Generation-0 weights
    pub baseline: ConfigurationSnapshot,
}

impl CoreConfig {
    /// Node id derived from the node name
    pub fn node_id(&self) -> String {
        praxis_crypto::short_digest(self.node_name.as_bytes(), NODE_ID_LEN)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            node_name: "praxis-node-prime".to_string(),
            trust_threshold: praxis_trust::DEFAULT_TRUST_THRESHOLD,
            density_threshold: 3.5,
            escalation_factor: 100.0,
            baseline: ConfigurationSnapshot::baseline(),
        }
    }
}
