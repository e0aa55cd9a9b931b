//! Mandate types
//!
//! A mandate is the top-level unit of work submitted to the core. It is
//! immutable; the pipeline clones it for each bounded retry attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a mandate submission
///
/// Correlates every ledger entry produced while executing one mandate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MandateId(pub Uuid);

impl MandateId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MandateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MandateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mandate_{}", self.0)
    }
}

/// Urgency attached to a mandate by its caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Routine,
    Elevated,
    Critical,
}

/// The top-level unit of work submitted to the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mandate {
    pub id: MandateId,
    /// Free-text statement of what the caller wants done
    pub intent: String,
    /// Free-text situational metadata
    pub context: String,
    pub priority: Priority,
}

impl Mandate {
    /// Create a mandate with default context and routine priority
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            id: MandateId::new(),
            intent: intent.into(),
            context: String::new(),
            priority: Priority::default(),
        }
    }

    /// Attach caller context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Override the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
