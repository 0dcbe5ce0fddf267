//! The FIDES workflow runner: the delegation-gated two-agent hand-off.
//!
//! The runner enforces the FIDES pipeline:
//!
//!   Resolve → Verify credentials → Check delegation → [Approval] → Execute → Result
//!
//! The trust invariant is absolute: the downstream endpoint is NEVER invoked
//! unless both credentials verified as valid AND the delegation checker
//! granted the hand-off (AND, where demanded, a human approved). This is
//! enforced structurally — the code path to `AgentEndpoint::invoke()` is
//! only reachable after every gate has passed.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use fides_contracts::{
    agent::{AgentIdentity, AgentName, WorkflowId},
    delegation::{ApprovalContext, DelegationPolicy},
    error::{FidesResult, WorkflowError},
    trail::{TrailRecord, WorkflowStage},
    workflow::{WorkflowInput, WorkflowResult},
};

use crate::client::TrustClient;
use crate::traits::{AgentEndpoint, TrailWriter};

/// Description of one two-agent hand-off: who delegates what to whom.
#[derive(Debug, Clone)]
pub struct HandoffSpec {
    /// Logical name of the delegating agent.
    pub source: AgentName,
    /// Logical name of the agent the action is delegated to.
    pub target: AgentName,
    /// The action being delegated (e.g. "analyze-transaction", "escalate").
    pub action: String,
    /// Demand human approval even when the governing policy does not.
    pub force_approval: bool,
}

impl HandoffSpec {
    /// Describe a hand-off of `action` from `source` to `target`.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            source: AgentName::new(source),
            target: AgentName::new(target),
            action: action.into(),
            force_approval: false,
        }
    }

    /// Demand human approval regardless of the governing policy.
    pub fn with_forced_approval(mut self) -> Self {
        self.force_approval = true;
        self
    }
}

/// The runner that drives a single workflow invocation end to end.
///
/// One runner may serve many invocations: `run()` takes `&self`, keeps no
/// per-invocation state, and invocations share nothing mutable — callers may
/// run many concurrently. Steps within one invocation are strictly
/// sequential, each awaited before the next, with no internal retries.
pub struct WorkflowRunner {
    client: TrustClient,
    trail: Option<Arc<dyn TrailWriter>>,
}

impl WorkflowRunner {
    /// Create a runner over the given trust client.
    pub fn new(client: TrustClient) -> Self {
        Self {
            client,
            trail: None,
        }
    }

    /// Attach a trail writer; one record is appended per completed stage.
    pub fn with_trail(mut self, trail: Arc<dyn TrailWriter>) -> Self {
        self.trail = Some(trail);
        self
    }

    /// The trust client this runner was built over.
    pub fn client(&self) -> &TrustClient {
        &self.client
    }

    /// Execute one full delegated workflow.
    ///
    /// # Pipeline
    ///
    /// 1. Resolve the source agent, then the target agent.
    /// 2. Verify both credentials — a `false` for either party is the fatal
    ///    `WorkflowError::Credential` hard gate; the delegation checker is
    ///    never consulted after it.
    /// 3. Request a delegation decision for `handoff.action`; a denial is
    ///    `WorkflowError::Delegation` carrying the checker's reason verbatim.
    /// 4. If the policy demands approval (or the hand-off forces it), obtain
    ///    sign-off through the approval collaborator; withheld or absent
    ///    approval is `WorkflowError::Approval`.
    /// 5. Invoke the downstream endpoint with the target identity and the
    ///    caller's original input — **only reachable after steps 2–4 pass**.
    /// 6. Assemble the `WorkflowResult`, timestamped at completion.
    ///
    /// # Errors
    ///
    /// Every error is fatal and surfaced to the caller; nothing is retried.
    /// A denied delegation and a completed result are mutually exclusive
    /// outcomes of one invocation.
    pub async fn run(
        &self,
        handoff: &HandoffSpec,
        input: &WorkflowInput,
        endpoint: &dyn AgentEndpoint,
    ) -> FidesResult<WorkflowResult> {
        let workflow_id = WorkflowId::new();

        debug!(
            workflow_id = %workflow_id.0,
            source = %handoff.source.0,
            target = %handoff.target.0,
            action = %handoff.action,
            input_kind = %input.kind,
            "workflow starting"
        );

        // ── Step 1: Resolve both agent identities ─────────────────────────────
        let source = self.client.resolver().resolve(&handoff.source).await?;
        let target = self.client.resolver().resolve(&handoff.target).await?;

        debug!(
            workflow_id = %workflow_id.0,
            source_did = %source.did.0,
            target_did = %target.did.0,
            "agent identities resolved"
        );
        self.record(WorkflowStage::Resolved, json!({
            "workflow_id": workflow_id.0.to_string(),
            "source_did": source.did.0,
            "target_did": target.did.0,
        }))?;

        // ── Step 2: Verify both credentials ───────────────────────────────────
        //
        // This is the primary trust gate. The workflow must not proceed past
        // a failed verification under any circumstance.
        self.verify_credentials(&workflow_id, &source, &target).await?;

        // ── Steps 3–6 ─────────────────────────────────────────────────────────
        self.execute_cleared(workflow_id, &source, &target, handoff, input, endpoint)
            .await
    }

    /// Execute steps 3–6 against identities the caller has already resolved.
    ///
    /// Entry point for flows that decide late whether a hand-off happens at
    /// all (e.g. tiered support escalation): the caller resolves identities
    /// up front, and only comes here once the hand-off is confirmed needed.
    /// Credential verification is the caller's responsibility on this path.
    pub async fn delegate_and_execute(
        &self,
        source: &AgentIdentity,
        target: &AgentIdentity,
        handoff: &HandoffSpec,
        input: &WorkflowInput,
        endpoint: &dyn AgentEndpoint,
    ) -> FidesResult<WorkflowResult> {
        let workflow_id = WorkflowId::new();
        self.execute_cleared(workflow_id, source, target, handoff, input, endpoint)
            .await
    }

    // ── Internal steps ────────────────────────────────────────────────────────

    /// Step 2: verify source then target; fail on the first invalid party.
    async fn verify_credentials(
        &self,
        workflow_id: &WorkflowId,
        source: &AgentIdentity,
        target: &AgentIdentity,
    ) -> FidesResult<()> {
        for identity in [source, target] {
            let valid = self.client.verifier().verify(&identity.did).await?;
            if !valid {
                warn!(
                    workflow_id = %workflow_id.0,
                    did = %identity.did.0,
                    "agent credential verification failed"
                );
                return Err(WorkflowError::Credential {
                    did: identity.did.0.clone(),
                });
            }
        }

        debug!(
            workflow_id = %workflow_id.0,
            source_did = %source.did.0,
            target_did = %target.did.0,
            "both credentials verified"
        );
        self.record(WorkflowStage::CredentialsVerified, json!({
            "workflow_id": workflow_id.0.to_string(),
            "source_did": source.did.0,
            "target_did": target.did.0,
        }))?;
        Ok(())
    }

    /// Steps 3–6: delegation check, optional approval, execution, result.
    async fn execute_cleared(
        &self,
        workflow_id: WorkflowId,
        source: &AgentIdentity,
        target: &AgentIdentity,
        handoff: &HandoffSpec,
        input: &WorkflowInput,
        endpoint: &dyn AgentEndpoint,
    ) -> FidesResult<WorkflowResult> {
        // ── Step 3: Delegation decision ───────────────────────────────────────
        let checker = self.client.delegation()?;
        let decision = checker
            .check(&source.did, &target.did, &handoff.action)
            .await?;

        if !decision.allowed {
            // The caller must see the authority's original reason, verbatim.
            let reason = decision.denial_reason.unwrap_or_else(|| {
                format!(
                    "delegation of '{}' from '{}' to '{}' was denied",
                    handoff.action, source.did.0, target.did.0
                )
            });
            warn!(
                workflow_id = %workflow_id.0,
                action = %handoff.action,
                reason = %reason,
                "delegation denied"
            );
            return Err(WorkflowError::Delegation { reason });
        }

        let policy = decision.policy.ok_or_else(|| WorkflowError::Config {
            reason: "delegation checker granted the hand-off without attaching a policy"
                .to_string(),
        })?;

        debug!(
            workflow_id = %workflow_id.0,
            policy_id = %policy.id,
            requires_approval = policy.constraints.requires_approval,
            "delegation granted"
        );
        self.record(WorkflowStage::DelegationGranted, json!({
            "workflow_id": workflow_id.0.to_string(),
            "policy_id": policy.id,
            "action": handoff.action,
        }))?;

        // ── Step 4: Human approval, when demanded ─────────────────────────────
        if policy.constraints.requires_approval || handoff.force_approval {
            self.obtain_approval(&workflow_id, source, target, handoff, input, &policy)
                .await?;
        }

        // ── Step 5: Downstream execution ──────────────────────────────────────
        //
        // Only reachable after every gate has passed. This is the ONLY call
        // site for AgentEndpoint::invoke() in the runtime.
        let response = endpoint.invoke(target, input).await?;

        info!(
            workflow_id = %workflow_id.0,
            status = %response.status,
            "downstream computation complete"
        );
        self.record(WorkflowStage::Executed, json!({
            "workflow_id": workflow_id.0.to_string(),
            "status": response.status,
        }))?;

        // ── Step 6: Assemble the result ───────────────────────────────────────
        if let Some(trail) = &self.trail {
            trail.finalize(&workflow_id.0.to_string())?;
        }

        Ok(WorkflowResult {
            workflow_id,
            source_did: source.did.clone(),
            target_did: target.did.clone(),
            policy_id: Some(policy.id),
            status: response.status,
            response: response.body,
            reasoning: response.reasoning,
            completed_at: Utc::now(),
        })
    }

    /// Step 4: route the hand-off through the approval collaborator.
    async fn obtain_approval(
        &self,
        workflow_id: &WorkflowId,
        source: &AgentIdentity,
        target: &AgentIdentity,
        handoff: &HandoffSpec,
        input: &WorkflowInput,
        policy: &DelegationPolicy,
    ) -> FidesResult<()> {
        let gate = self.client.approval().ok_or_else(|| {
            // An absent approval collaborator terminates the workflow the
            // same way a withheld approval does.
            WorkflowError::Approval {
                reason: format!(
                    "policy '{}' requires approval but no approval collaborator is configured",
                    policy.id
                ),
            }
        })?;

        let ctx = ApprovalContext {
            workflow_id: workflow_id.clone(),
            source: source.clone(),
            target: target.clone(),
            action: handoff.action.clone(),
            policy: policy.clone(),
            input_kind: input.kind.clone(),
        };

        info!(
            workflow_id = %workflow_id.0,
            policy_id = %policy.id,
            "requesting human approval"
        );

        let approved = gate.request(&ctx).await?;
        if !approved {
            warn!(
                workflow_id = %workflow_id.0,
                policy_id = %policy.id,
                "human approval withheld"
            );
            return Err(WorkflowError::Approval {
                reason: format!(
                    "approval for action '{}' under policy '{}' was declined",
                    handoff.action, policy.id
                ),
            });
        }

        self.record(WorkflowStage::ApprovalGranted, json!({
            "workflow_id": workflow_id.0.to_string(),
            "policy_id": policy.id,
        }))?;
        Ok(())
    }

    /// Append one stage record when a trail writer is attached.
    fn record(&self, stage: WorkflowStage, detail: serde_json::Value) -> FidesResult<()> {
        if let Some(trail) = &self.trail {
            trail.append(&TrailRecord {
                stage,
                detail,
                timestamp: Utc::now(),
            })?;
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
