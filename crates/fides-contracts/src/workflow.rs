//! Workflow input, endpoint response, and result types.
//!
//! `WorkflowInput` is what the caller supplies; it is never mutated.
//! `WorkflowResult` is constructed exactly once at the end of a successful
//! run and returned to the caller — a denied delegation never produces one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{Did, WorkflowId};

/// The domain-specific payload a workflow operates on.
///
/// `kind` is a discriminant string (e.g. "transaction", "patient-case",
/// "support-query"); `payload` carries the full body. The runtime passes
/// the input through to the downstream endpoint without inspecting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInput {
    /// Discriminant string for the payload.
    pub kind: String,
    /// Arbitrary JSON body. The runtime never inspects or mutates this.
    pub payload: serde_json::Value,
}

/// What a downstream agent endpoint returns from `invoke()`.
///
/// The runtime copies these fields into the `WorkflowResult` unchanged;
/// the endpoint owns the vocabulary of `status` and `reasoning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResponse {
    /// Decision or status label (e.g. "BLOCK", "REVIEW", "escalated").
    pub status: String,
    /// The computed score or domain-specific response body.
    pub body: serde_json::Value,
    /// Human-readable reasoning for the status, in the order produced.
    pub reasoning: Vec<String>,
}

/// The single structured record a completed workflow returns.
///
/// Constructed once, immutable, with `completed_at` captured at completion
/// (not at invocation). Two runs with identical input and deterministic
/// collaborators differ only in `workflow_id` and `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// The invocation this result belongs to.
    pub workflow_id: WorkflowId,
    /// DID of the agent that initiated the hand-off.
    pub source_did: Did,
    /// DID of the agent the action was delegated to.
    pub target_did: Did,
    /// Identifier of the governing delegation policy. `None` only for
    /// outcomes that never reached the delegation step (e.g. a support
    /// query resolved at the source tier).
    pub policy_id: Option<String>,
    /// Decision or status label from the downstream computation.
    pub status: String,
    /// The computed score or domain-specific response body.
    pub response: serde_json::Value,
    /// Human-readable reasoning list, in the order produced.
    pub reasoning: Vec<String>,
    /// Wall-clock time (UTC) the workflow completed.
    pub completed_at: DateTime<Utc>,
}
