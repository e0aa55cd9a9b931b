//! Praxis Ledger - append-only, hash-chained audit log
//!
//! Every consequential action in the core produces a ledger entry. The
//! chain is tamper-evident: each entry's hash covers a canonical encoding
//! of its fields plus the previous entry's hash, so altering any stored
//! field invalidates that entry and every entry after it.
//!
//! # Invariants
//!
//! 1. Entries are append-only; nothing is mutated or removed
//! 2. `sequence` is strictly increasing from 0
//! 3. Appends are atomic — a single-writer lock serializes sequence and
//!    chain derivation
//! 4. The chain hash covers a versioned, length-prefixed encoding; field
//!    boundaries are never ambiguous

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use praxis_crypto::CanonicalEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parent hash of the first entry
pub const GENESIS_PARENT_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("Chain divergence at sequence {sequence}")]
    ChainDivergence { sequence: u64 },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Severity / channel of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
    System,
    Security,
    Metrics,
}

impl LogLevel {
    /// Stable name hashed into the chain
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::System => "SYSTEM",
            LogLevel::Security => "SECURITY",
            LogLevel::Metrics => "METRICS",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chained audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    pub prev_chain_hash: String,
    pub chain_hash: String,
    pub node_id: String,
}

impl LedgerEntry {
    /// Recompute this entry's chain hash from its stored fields
    pub fn compute_chain_hash(&self) -> String {
        chain_hash(
            self.sequence,
            &self.timestamp,
            self.level,
            &self.message,
            self.payload.as_ref(),
            &self.node_id,
            &self.prev_chain_hash,
        )
    }

    /// Verify the stored hash against the stored fields
    pub fn verify(&self) -> bool {
        self.chain_hash == self.compute_chain_hash()
    }
}

/// Chain hash over the canonical encoding of an entry's fields
fn chain_hash(
    sequence: u64,
    timestamp: &DateTime<Utc>,
    level: LogLevel,
    message: &str,
    payload: Option<&serde_json::Value>,
    node_id: &str,
    prev_chain_hash: &str,
) -> String {
    let payload_bytes = payload.and_then(|v| serde_json::to_vec(v).ok());
    CanonicalEncoder::new()
        .u64(sequence)
        .i64(timestamp.timestamp_micros())
        .text(level.as_str())
        .text(message)
        .optional(payload_bytes.as_deref())
        .text(node_id)
        .text(prev_chain_hash)
        .digest_hex()
}

/// Recompute the whole chain from stored fields, returning one hash per
/// entry. Used by tamper-evidence checks: a mutated entry shifts its own
/// recomputed hash and every later one.
pub fn recompute_chain(entries: &[LedgerEntry]) -> Vec<String> {
    let mut hashes = Vec::with_capacity(entries.len());
    let mut prev = GENESIS_PARENT_HASH.to_string();
    for entry in entries {
        let hash = chain_hash(
            entry.sequence,
            &entry.timestamp,
            entry.level,
            &entry.message,
            entry.payload.as_ref(),
            &entry.node_id,
            &prev,
        );
        prev = hash.clone();
        hashes.push(hash);
    }
    hashes
}

/// Verify a stored entry sequence against a full chain recomputation
pub fn verify_entries(entries: &[LedgerEntry]) -> Result<()> {
    let recomputed = recompute_chain(entries);
    for (entry, hash) in entries.iter().zip(recomputed.iter()) {
        if &entry.chain_hash != hash {
            return Err(LedgerError::ChainDivergence {
                sequence: entry.sequence,
            });
        }
    }
    Ok(())
}

/// Wall-clock provider for entry timestamps
///
/// Injected so tests can pin time and chains stay reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The default clock
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Append-only writer the ledger forwards entries to for durability.
/// Export and persistence live behind this seam, outside the core.
pub trait EntrySink: Send + Sync {
    fn record(&self, entry: &LedgerEntry);
}

/// The Praxis audit ledger
///
/// Thread-safe; appends from concurrent mandates serialize on an internal
/// single-writer lock.
pub struct Ledger {
    node_id: String,
    clock: Arc<dyn Clock>,
    sink: Option<Arc<dyn EntrySink>>,
    entries: Mutex<Vec<LedgerEntry>>,
}

impl Ledger {
    /// Create an in-memory ledger stamped with `node_id`
    pub fn new(node_id: impl Into<String>) -> Self {
        Self::with_clock(node_id, Arc::new(SystemClock))
    }

    /// Create a ledger with an injected clock
    pub fn with_clock(node_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            node_id: node_id.into(),
            clock,
            sink: None,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Forward every appended entry to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn EntrySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Append an entry and return it
    ///
    /// Atomic per call: sequence assignment, chain derivation, and the sink
    /// forward all happen under the writer lock.
    pub fn append(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> LedgerEntry {
        let message = message.into();
        let entry = {
            let mut entries = self.entries.lock();
            let sequence = entries.len() as u64;
            let prev_chain_hash = entries
                .last()
                .map(|e| e.chain_hash.clone())
                .unwrap_or_else(|| GENESIS_PARENT_HASH.to_string());
            let timestamp = self.clock.now();
            let chain_hash = chain_hash(
                sequence,
                &timestamp,
                level,
                &message,
                payload.as_ref(),
                &self.node_id,
                &prev_chain_hash,
            );
            let entry = LedgerEntry {
                sequence,
                timestamp,
                level,
                message,
                payload,
                prev_chain_hash,
                chain_hash,
                node_id: self.node_id.clone(),
            };
            entries.push(entry.clone());
            if let Some(sink) = &self.sink {
                sink.record(&entry);
            }
            entry
        };

        match entry.level {
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(target: "praxis::ledger", sequence = entry.sequence, level = %entry.level, "{}", entry.message)
            }
            LogLevel::Warning => {
                tracing::warn!(target: "praxis::ledger", sequence = entry.sequence, level = %entry.level, "{}", entry.message)
            }
            _ => {
                tracing::info!(target: "praxis::ledger", sequence = entry.sequence, level = %entry.level, "{}", entry.message)
            }
        }

        entry
    }

    /// Last `n` entries in chain order
    pub fn tail(&self, n: usize) -> Vec<LedgerEntry> {
        let entries = self.entries.lock();
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }

    /// Full copy of the chain
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Recompute and check the whole chain
    pub fn verify(&self) -> Result<()> {
        verify_entries(&self.entries.lock())
    }
}
