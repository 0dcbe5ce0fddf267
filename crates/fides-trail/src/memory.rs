//! In-memory implementation of `TrailWriter`.
//!
//! `InMemoryTrailWriter` is the reference implementation of the
//! `TrailWriter` trait.  It keeps all events in a `Vec` protected by a
//! `Mutex`, making it safe to share while the runner calls `append()` and
//! `finalize()`.
//!
//! Use `export_log()` after a workflow completes to obtain a sealed
//! `TrailLog`, and `verify_integrity()` at any time to confirm the chain
//! has not been tampered with in memory.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use fides_contracts::{
    error::{FidesResult, WorkflowError},
    trail::TrailRecord,
};
use fides_core::traits::TrailWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{TrailEvent, TrailLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryTrailWriter`.
///
/// Kept behind `Arc<Mutex<_>>` so the writer and any clones of the `Arc`
/// can safely observe or export the accumulated events.
pub(crate) struct InMemoryState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<TrailEvent>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last written event, or `GENESIS_HASH` before
    /// any event has been written.
    pub(crate) last_hash: String,
}

// ── Public writer ─────────────────────────────────────────────────────────────

/// An in-memory, append-only trail writer backed by a SHA-256 hash chain.
///
/// # Thread safety
///
/// `append()` and `finalize()` both acquire a `Mutex` internally.  Multiple
/// threads may hold clones of the internal `Arc` without additional
/// synchronization.
pub struct InMemoryTrailWriter {
    workflow_id: String,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryTrailWriter {
    /// Create a new writer for the given workflow.
    ///
    /// The internal `last_hash` is initialized to `TrailEvent::GENESIS_HASH`
    /// so the first event's `prev_hash` is automatically correct.
    pub fn new(workflow_id: impl Into<String>) -> Self {
        let workflow_id = workflow_id.into();
        let state = InMemoryState {
            events: Vec::new(),
            sequence: 0,
            last_hash: TrailEvent::GENESIS_HASH.to_string(),
        };
        Self {
            workflow_id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Export a sealed `TrailLog` containing all events written so far.
    ///
    /// The `terminal_hash` is the `this_hash` of the last event, or an empty
    /// string when no events have been written.
    pub fn export_log(&self) -> TrailLog {
        let state = self.state.lock().expect("trail state lock poisoned");
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        TrailLog {
            workflow_id: self.workflow_id.clone(),
            events: state.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// Delegates to `verify_chain`, which checks both prev-hash linkage and
    /// hash correctness for every event.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("trail state lock poisoned");
        verify_chain(&state.events)
    }
}

// ── TrailWriter impl ──────────────────────────────────────────────────────────

impl TrailWriter for InMemoryTrailWriter {
    /// Append one stage record to the hash chain.
    ///
    /// Computes `this_hash` from (workflow_id, sequence, prev_hash, record),
    /// wraps the record in a `TrailEvent`, appends it, then advances the
    /// sequence counter and `last_hash`.
    ///
    /// Returns `Err(Config)` only if the internal mutex is poisoned, which
    /// cannot happen under normal operation.
    fn append(&self, record: &TrailRecord) -> FidesResult<()> {
        let mut state = self.state.lock().map_err(|e| WorkflowError::Config {
            reason: format!("trail state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_event(&self.workflow_id, sequence, record, &prev_hash);

        let event = TrailEvent {
            sequence,
            workflow_id: self.workflow_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.events.push(event);
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    /// Mark the workflow as complete in the trail.
    ///
    /// Logs a structured message via `tracing`.  Implementations that persist
    /// to disk or a database would flush/seal here; the in-memory writer has
    /// nothing to flush.
    fn finalize(&self, workflow_id: &str) -> FidesResult<()> {
        let state = self.state.lock().map_err(|e| WorkflowError::Config {
            reason: format!("trail state lock poisoned: {}", e),
        })?;

        info!(
            workflow_id = %workflow_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "workflow trail finalized"
        );

        Ok(())
    }
}
