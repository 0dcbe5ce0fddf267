//! Trail event and log types.
//!
//! `TrailEvent` is a single entry in the hash chain — it wraps a
//! `TrailRecord` with sequence numbering and the SHA-256 hashes that make
//! tampering detectable.  `TrailLog` is the sealed record produced when a
//! workflow finalizes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fides_contracts::trail::TrailRecord;

/// A single entry in the SHA-256 hash chain for one workflow.
///
/// Each event commits to the previous event via `prev_hash`, forming an
/// append-only chain.  Modifying any field — including those of the embedded
/// `record` — invalidates `this_hash` and every subsequent `prev_hash`,
/// which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailEvent {
    /// Monotonically increasing position in the chain, starting at 0.
    pub sequence: u64,

    /// The workflow this event belongs to.
    pub workflow_id: String,

    /// The immutable stage record produced by the runner.
    pub record: TrailRecord,

    /// SHA-256 hash (hex) of the previous event, or `GENESIS_HASH` for the
    /// first event.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this event's canonical content.
    ///
    /// Computed by `hash_event()` over (workflow_id, sequence, prev_hash,
    /// canonical JSON of record).
    pub this_hash: String,
}

impl TrailEvent {
    /// The sentinel `prev_hash` used for the first event in every chain.
    ///
    /// 64 hex zeros — a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed, finalized trail log for a single workflow.
///
/// Produced by `InMemoryTrailWriter::export_log()` after the workflow
/// completes.  The `terminal_hash` is the `this_hash` of the last event and
/// can be used as a compact commitment to the entire log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailLog {
    /// The workflow whose stages are recorded here.
    pub workflow_id: String,

    /// All trail events in chain order (sequence 0 first).
    pub events: Vec<TrailEvent>,

    /// Wall-clock time (UTC) the log was exported / finalized.
    pub finalized_at: DateTime<Utc>,

    /// The `this_hash` of the last event.  Empty string if the log is empty.
    pub terminal_hash: String,
}
