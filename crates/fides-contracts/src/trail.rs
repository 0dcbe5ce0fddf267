//! Workflow trail record types.
//!
//! `TrailRecord` is what the workflow runner hands to a trail writer after
//! each completed pipeline stage — one record per stage, appended in order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The pipeline stage a trail record describes.
///
/// Stages appear in the trail in pipeline order; a failed invocation simply
/// stops producing records at the first blocking condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStage {
    /// Both agent identities were resolved.
    Resolved,
    /// Both credentials verified as valid.
    CredentialsVerified,
    /// The delegation checker granted the hand-off.
    DelegationGranted,
    /// The human approval collaborator signed off.
    ApprovalGranted,
    /// The downstream endpoint returned a response.
    Executed,
}

/// An immutable record of one completed workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailRecord {
    /// Which stage completed.
    pub stage: WorkflowStage,
    /// Stage-specific detail (resolved DIDs, policy id, status label, …).
    pub detail: serde_json::Value,
    /// Wall-clock time (UTC) the record was created.
    pub timestamp: DateTime<Utc>,
}
