//! Runtime error types for the FIDES workflow pipeline.
//!
//! All fallible operations return `FidesResult<T>`. Every variant is fatal:
//! nothing is retried internally, and each error carries enough context
//! (which step, which agent, the authority's original reason) to diagnose
//! a failed invocation without re-running it.

use thiserror::Error;

/// The unified error type for the FIDES runtime.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The name resolver does not know the requested logical name.
    #[error("agent name '{name}' could not be resolved: {reason}")]
    Resolution { name: String, reason: String },

    /// Credential verification returned false for one of the parties.
    ///
    /// This is a hard gate — the workflow never proceeds past a failed
    /// verification, and the delegation checker is never consulted.
    #[error("agent credential verification failed for '{did}'")]
    Credential { did: String },

    /// The delegation checker denied the hand-off.
    ///
    /// `reason` is the authority's denial reason, surfaced verbatim.
    #[error("delegation denied: {reason}")]
    Delegation { reason: String },

    /// Human approval was withheld, or no approval collaborator is
    /// configured for a policy that demands one.
    #[error("human approval withheld: {reason}")]
    Approval { reason: String },

    /// The downstream domain computation itself failed.
    #[error("downstream invocation of '{endpoint}' failed: {reason}")]
    Downstream { endpoint: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the FIDES crates.
pub type FidesResult<T> = Result<T, WorkflowError>;
