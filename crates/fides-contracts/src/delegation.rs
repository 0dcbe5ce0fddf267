//! Delegation policy and decision types.
//!
//! The delegation checker consumes a (from, to, action) triple and produces
//! a `DelegationDecision`. Decisions are terminal — once produced they are
//! never mutated, and the attached policy is read-only to the caller.

use serde::{Deserialize, Serialize};

use crate::agent::{AgentIdentity, WorkflowId};

/// A time-of-day window during which a delegation may be exercised.
///
/// Hours are in 24h local time of the policy authority.
/// Example: Mon–Fri, 8AM–5PM is `{ start_hour: 8, end_hour: 17, weekdays_only: true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    /// When true, the window excludes Saturday and Sunday.
    #[serde(default)]
    pub weekdays_only: bool,
}

/// The named constraints a delegation policy places on a hand-off.
///
/// All constraints are optional except `requires_approval`, which defaults
/// to false. The runtime enforces only `requires_approval`; the remaining
/// constraints are carried for the caller and the policy authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelegationConstraints {
    /// Maximum duration, in seconds, the delegated action may run.
    #[serde(default)]
    pub max_duration_secs: Option<u64>,
    /// Scope the delegation is limited to (e.g. "transactions:read").
    #[serde(default)]
    pub scope: Option<String>,
    /// When true, a human must approve before the hand-off proceeds.
    #[serde(default)]
    pub requires_approval: bool,
    /// Maximum number of concurrent delegated invocations.
    #[serde(default)]
    pub max_concurrent: Option<u32>,
    /// Time-of-day window during which the delegation is valid.
    #[serde(default)]
    pub allowed_hours: Option<HoursWindow>,
    /// Certification the target agent must hold (e.g. "board-certified-radiology").
    #[serde(default)]
    pub required_certification: Option<String>,
}

/// A named set of constraints governing one delegation relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationPolicy {
    /// Stable policy identifier, surfaced in workflow results and trail records.
    pub id: String,
    /// The constraints this policy imposes.
    pub constraints: DelegationConstraints,
}

/// The decision produced by the delegation checker for one (from, to, action).
///
/// Exactly one of the two shapes is meaningful: `allowed = true` with a
/// policy attached, or `allowed = false` with a denial reason. The runtime
/// surfaces the denial reason to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationDecision {
    /// Whether the delegation may proceed.
    pub allowed: bool,
    /// The checker's denial reason. Present only when `allowed` is false.
    pub denial_reason: Option<String>,
    /// The policy governing the delegation. Present when `allowed` is true.
    pub policy: Option<DelegationPolicy>,
}

impl DelegationDecision {
    /// Build a granting decision carrying the governing policy.
    pub fn granted(policy: DelegationPolicy) -> Self {
        Self {
            allowed: true,
            denial_reason: None,
            policy: Some(policy),
        }
    }

    /// Build a denying decision carrying the authority's reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            denial_reason: Some(reason.into()),
            policy: None,
        }
    }
}

/// Everything the human approval collaborator sees when sign-off is required.
///
/// Built by the workflow runner from the resolved identities and the
/// delegation decision. All fields are read-only to the approver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalContext {
    /// The workflow invocation awaiting approval.
    pub workflow_id: WorkflowId,
    /// The agent delegating the action.
    pub source: AgentIdentity,
    /// The agent the action is delegated to.
    pub target: AgentIdentity,
    /// The action being delegated (e.g. "analyze-imaging").
    pub action: String,
    /// The policy that demanded approval.
    pub policy: DelegationPolicy,
    /// Discriminant of the workflow input, for display to the approver.
    pub input_kind: String,
}
