//! Trust framework client: explicit configuration plus collaborator handles.
//!
//! `TrustClient` is the single object application code constructs before
//! running workflows. Collaborators are passed in explicitly — never read
//! from ambient global state — so every workflow stays testable with
//! substitute implementations.

use std::sync::Arc;

use fides_contracts::error::{FidesResult, WorkflowError};

use crate::traits::{ApprovalGate, CredentialVerifier, DelegationChecker, NameResolver};

/// Process-wide service endpoint configuration.
///
/// Mirrors the framework constructor shape: a resolution service URL is
/// always required, a delegation authority URL only where the deployment
/// has one. Carried on the client for diagnostics; the collaborator
/// implementations own the actual transport.
#[derive(Debug, Clone)]
pub struct TrustConfig {
    /// URL of the agent name resolution service.
    pub ans_url: String,
    /// URL of the agent-to-agent delegation authority, when deployed.
    pub a2a_url: Option<String>,
}

/// The trust framework client handed to `WorkflowRunner`.
///
/// Resolution and credential verification are always present. Delegation
/// checking and human approval are optional capabilities: callers must check
/// for their presence (via `delegation()` / `approval()`) before invoking
/// delegation-dependent steps.
pub struct TrustClient {
    config: TrustConfig,
    resolver: Arc<dyn NameResolver>,
    verifier: Arc<dyn CredentialVerifier>,
    delegation: Option<Arc<dyn DelegationChecker>>,
    approval: Option<Arc<dyn ApprovalGate>>,
}

impl TrustClient {
    /// Create a client with the mandatory collaborators only.
    pub fn new(
        config: TrustConfig,
        resolver: Arc<dyn NameResolver>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            config,
            resolver,
            verifier,
            delegation: None,
            approval: None,
        }
    }

    /// Attach a delegation checker capability.
    pub fn with_delegation(mut self, checker: Arc<dyn DelegationChecker>) -> Self {
        self.delegation = Some(checker);
        self
    }

    /// Attach a human approval capability.
    pub fn with_approval(mut self, gate: Arc<dyn ApprovalGate>) -> Self {
        self.approval = Some(gate);
        self
    }

    /// The endpoint configuration this client was built with.
    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// The name resolution collaborator.
    pub fn resolver(&self) -> &Arc<dyn NameResolver> {
        &self.resolver
    }

    /// The credential verification collaborator.
    pub fn verifier(&self) -> &Arc<dyn CredentialVerifier> {
        &self.verifier
    }

    /// True when a delegation checker is configured.
    pub fn has_delegation(&self) -> bool {
        self.delegation.is_some()
    }

    /// The delegation checker, or `WorkflowError::Config` when this
    /// deployment has no delegation authority.
    pub fn delegation(&self) -> FidesResult<&Arc<dyn DelegationChecker>> {
        self.delegation.as_ref().ok_or_else(|| WorkflowError::Config {
            reason: "no delegation checker configured for this client".to_string(),
        })
    }

    /// The human approval collaborator, when one is configured.
    pub fn approval(&self) -> Option<&Arc<dyn ApprovalGate>> {
        self.approval.as_ref()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use fides_contracts::{
        agent::{AgentIdentity, AgentName, Did},
        error::{FidesResult, WorkflowError},
    };

    use crate::traits::{CredentialVerifier, NameResolver};

    use super::*;

    struct NullResolver;

    #[async_trait]
    impl NameResolver for NullResolver {
        async fn resolve(&self, name: &AgentName) -> FidesResult<AgentIdentity> {
            Err(WorkflowError::Resolution {
                name: name.0.clone(),
                reason: "null resolver".to_string(),
            })
        }
    }

    struct NullVerifier;

    #[async_trait]
    impl CredentialVerifier for NullVerifier {
        async fn verify(&self, _did: &Did) -> FidesResult<bool> {
            Ok(false)
        }
    }

    fn bare_client() -> TrustClient {
        TrustClient::new(
            TrustConfig {
                ans_url: "https://ans.example".to_string(),
                a2a_url: None,
            },
            Arc::new(NullResolver),
            Arc::new(NullVerifier),
        )
    }

    /// Delegation is an optional capability: absent by default, and asking
    /// for it surfaces a Config error rather than a panic.
    #[test]
    fn test_delegation_capability_absent_by_default() {
        let client = bare_client();

        assert!(!client.has_delegation());
        assert!(client.approval().is_none());

        match client.delegation() {
            Err(WorkflowError::Config { reason }) => {
                assert!(reason.contains("no delegation checker"));
            }
            Ok(_) => panic!("bare client must not expose a delegation checker"),
            Err(other) => panic!("expected Config error, got {other:?}"),
        }
    }

    /// The config handed to the constructor is readable back for diagnostics.
    #[test]
    fn test_config_round_trip() {
        let client = bare_client();
        assert_eq!(client.config().ans_url, "https://ans.example");
        assert!(client.config().a2a_url.is_none());
    }
}
