//! # fides-trail
//!
//! Immutable, append-only, SHA-256 hash-chained workflow trail for the FIDES
//! runtime.
//!
//! ## Overview
//!
//! Every stage the workflow runner records is wrapped in a `TrailEvent` that
//! links to the previous event via its SHA-256 hash.  Tampering with any
//! event — even a single byte — breaks the chain and is detected by
//! `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fides_trail::{InMemoryTrailWriter, TrailEvent};
//! use fides_core::traits::TrailWriter;
//!
//! let writer = InMemoryTrailWriter::new("txn_12345");
//! writer.append(&trail_record)?;
//! writer.finalize("txn_12345")?;
//!
//! assert!(writer.verify_integrity());
//! let log = writer.export_log();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{TrailEvent, TrailLog};
pub use memory::InMemoryTrailWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
