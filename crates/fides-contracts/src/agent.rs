//! Agent naming and identity types.
//!
//! These types describe the actors flowing through a FIDES workflow.
//! They are intentionally minimal — FIDES does not prescribe agent internals,
//! only how agents are named, identified, and reached.

use serde::{Deserialize, Serialize};

/// Stable, human-readable logical name for an agent.
///
/// This is what application code hands to the name resolver.
/// Example: AgentName("fraud-detector.risk.dbs.example.agent")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentName(pub String);

impl AgentName {
    /// Construct an agent name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Decentralized identifier uniquely naming an agent.
///
/// Produced by the name resolver and consumed by the credential verifier
/// and delegation checker. FIDES treats the DID as an opaque string.
/// Example: Did("did:web:fraud-detector.risk.dbs.example")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Did(pub String);

impl Did {
    /// Construct a DID from any string-like value.
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }
}

/// Unique identifier for a single workflow invocation.
///
/// Every call to `WorkflowRunner::run()` operates under one of these UUIDs,
/// which appears in the returned result and in every trail record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(pub uuid::Uuid);

impl WorkflowId {
    /// Create a new, unique workflow ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

/// A resolved agent identity: logical name, DID, and reachable endpoint.
///
/// Produced by the name resolver per call. Identities are never cached by
/// the runtime and are discarded when the workflow completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// The logical name the identity was resolved from.
    pub name: AgentName,
    /// The agent's decentralized identifier.
    pub did: Did,
    /// Reference to the agent's reachable endpoint (opaque to the runtime).
    pub endpoint: String,
}
