//! Collaborator trait definitions for the FIDES workflow pipeline.
//!
//! These traits are the runtime's entire external boundary:
//!
//! - `NameResolver`       — ANS-equivalent resolution (name → identity)
//! - `CredentialVerifier` — decentralized-identity credential check
//! - `DelegationChecker`  — agent-to-agent delegation policy authority
//! - `ApprovalGate`       — human-in-the-loop sign-off
//! - `AgentEndpoint`      — the downstream domain computation
//! - `TrailWriter`        — append-only record of completed stages
//!
//! Every call through the first five traits is a suspension point; the
//! runner awaits one call before issuing the next and never retries. Any
//! retry or timeout policy belongs to the implementations themselves or to
//! a deadline the caller wraps around the whole `run()`.

use async_trait::async_trait;

use fides_contracts::{
    agent::{AgentIdentity, AgentName, Did},
    delegation::{ApprovalContext, DelegationDecision},
    error::FidesResult,
    trail::TrailRecord,
    workflow::{EndpointResponse, WorkflowInput},
};

/// ANS-equivalent name resolution: logical name → full agent identity.
///
/// Implementations are queried once per agent per invocation; the runtime
/// never caches identities across invocations.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve `name` to an identity.
    ///
    /// Returns `WorkflowError::Resolution` when the name is not registered.
    async fn resolve(&self, name: &AgentName) -> FidesResult<AgentIdentity>;
}

/// Decentralized-identity credential verification.
///
/// A `false` return is not an error at this seam — the runner converts it
/// into the fatal `WorkflowError::Credential` hard gate.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return true when the credentials behind `did` are currently valid.
    async fn verify(&self, did: &Did) -> FidesResult<bool>;
}

/// The agent-to-agent delegation policy authority.
///
/// The runner guarantees this is only consulted after both parties'
/// credentials have verified as valid.
#[async_trait]
pub trait DelegationChecker: Send + Sync {
    /// Decide whether `from` may delegate `action` to `to`.
    async fn check(&self, from: &Did, to: &Did, action: &str) -> FidesResult<DelegationDecision>;
}

/// Human-in-the-loop approval.
///
/// Only invoked when the governing policy demands approval (or the caller
/// forces it). Returning `false` terminates the workflow without executing
/// the downstream computation.
#[async_trait]
pub trait ApprovalGate: Send + Sync {
    /// Request sign-off for the described hand-off.
    async fn request(&self, ctx: &ApprovalContext) -> FidesResult<bool>;
}

/// The downstream agent endpoint: the delegated domain computation.
///
/// Implementations receive the target's resolved identity and the caller's
/// original, unmutated input.
#[async_trait]
pub trait AgentEndpoint: Send + Sync {
    /// Execute the domain computation and return its structured response.
    async fn invoke(
        &self,
        target: &AgentIdentity,
        input: &WorkflowInput,
    ) -> FidesResult<EndpointResponse>;
}

/// The workflow trail: an append-only record of completed stages.
///
/// One record per completed stage, in pipeline order. Records written here
/// are never modified or deleted by the runtime.
pub trait TrailWriter: Send + Sync {
    /// Append one stage record to the trail.
    fn append(&self, record: &TrailRecord) -> FidesResult<()>;

    /// Mark a workflow as complete in the trail.
    ///
    /// Called by the runner after the result is assembled. Implementations
    /// may use this to flush, sign, or seal the trail.
    fn finalize(&self, workflow_id: &str) -> FidesResult<()>;
}
