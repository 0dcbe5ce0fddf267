//! Auto-deciding approval gate for the reference workflows.

use async_trait::async_trait;
use tracing::info;

use fides_contracts::{delegation::ApprovalContext, error::FidesResult};
use fides_core::traits::ApprovalGate;

/// An `ApprovalGate` that answers every request with a fixed decision.
///
/// Stands in for the human sign-off step in the reference scenarios. A real
/// deployment would notify the responsible role, present the context, and
/// wait for their decision.
pub struct AutoApprovalGate {
    approve: bool,
}

impl AutoApprovalGate {
    /// A gate that approves every request.
    pub fn approving() -> Self {
        Self { approve: true }
    }

    /// A gate that declines every request.
    pub fn declining() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl ApprovalGate for AutoApprovalGate {
    async fn request(&self, ctx: &ApprovalContext) -> FidesResult<bool> {
        info!(
            workflow_id = %ctx.workflow_id.0,
            policy_id = %ctx.policy.id,
            action = %ctx.action,
            approved = self.approve,
            "approval request auto-decided"
        );
        Ok(self.approve)
    }
}
