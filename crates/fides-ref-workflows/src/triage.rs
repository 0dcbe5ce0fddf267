//! Tiered support triage: frontline stub, escalation predicate, and the
//! supervisor endpoint.
//!
//! The escalation flow differs from the other workflows: the frontline agent
//! first attempts the query locally, and the delegation pipeline only runs
//! when the attempt falls short. A query the frontline answers confidently
//! never touches the delegation checker.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use fides_contracts::{
    agent::{AgentIdentity, AgentName, WorkflowId},
    error::{FidesResult, WorkflowError},
    workflow::{EndpointResponse, WorkflowInput, WorkflowResult},
};
use fides_core::{runner::HandoffSpec, traits::AgentEndpoint, WorkflowRunner};

/// Status label for queries the frontline tier answers itself.
pub const RESOLVED_AT_SOURCE: &str = "resolved-at-source";

/// Status label for queries answered by the supervisor tier.
pub const RESOLVED_BY_SUPERVISOR: &str = "resolved-by-supervisor";

/// Frontline confidence below this floor forces escalation.
pub const ESCALATION_CONFIDENCE_FLOOR: f64 = 0.8;

/// How involved a query is, as classified at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Customer-declared urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Normal,
    High,
}

/// A customer support query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportQuery {
    pub id: String,
    pub customer: String,
    pub question: String,
    pub complexity: Complexity,
    pub severity: Severity,
}

/// The frontline tier's attempt at a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontlineReply {
    pub answer: String,
    pub confidence: f64,
}

/// Deterministic stand-in for the frontline chatbot.
///
/// Confidence is keyed on the query's complexity classification: low
/// queries answer at 0.95, medium at 0.72, high at 0.40.
pub fn frontline_respond(query: &SupportQuery) -> FrontlineReply {
    let (answer, confidence) = match query.complexity {
        Complexity::Low => (
            "Your payment was declined by the issuing bank; retrying usually succeeds.",
            0.95,
        ),
        Complexity::Medium => (
            "The decline appears related to a security hold; this may need account review.",
            0.72,
        ),
        Complexity::High => (
            "This requires investigation beyond the frontline knowledge base.",
            0.40,
        ),
    };

    debug!(
        ticket = %query.id,
        confidence,
        "frontline responder attempted query"
    );

    FrontlineReply {
        answer: answer.to_string(),
        confidence,
    }
}

/// The escalation predicate: an OR of the two conditions.
///
/// High severity escalates even when the frontline is confident —
/// confidence alone can never suppress a high-severity escalation.
pub fn should_escalate(reply: &FrontlineReply, severity: Severity) -> bool {
    reply.confidence < ESCALATION_CONFIDENCE_FLOOR || severity == Severity::High
}

/// The supervisor tier: answers queries the frontline escalated.
pub struct SupervisorEndpoint;

#[async_trait]
impl AgentEndpoint for SupervisorEndpoint {
    async fn invoke(
        &self,
        target: &AgentIdentity,
        input: &WorkflowInput,
    ) -> FidesResult<EndpointResponse> {
        let query: SupportQuery =
            serde_json::from_value(input.payload.clone()).map_err(|e| {
                WorkflowError::Downstream {
                    endpoint: target.endpoint.clone(),
                    reason: format!("malformed support query payload: {}", e),
                }
            })?;

        Ok(EndpointResponse {
            status: RESOLVED_BY_SUPERVISOR.to_string(),
            body: json!({
                "ticket": query.id,
                "customer": query.customer,
                "answer": "A supervisor reviewed the account: the hold was placed by the \
                           fraud desk and has now been released.",
                "confidence": 0.97,
                "handled_by": target.did.0,
            }),
            reasoning: vec![format!(
                "escalated to supervisor tier for ticket '{}'",
                query.id
            )],
        })
    }
}

/// Run the tiered escalation workflow for one query.
///
/// Both agents are resolved up front, matching the service's intake flow,
/// even though the non-escalating path never uses the supervisor identity.
/// (Deferring the second resolution until escalation is confirmed would be
/// a valid optimization; this implementation keeps the eager order.)
///
/// When the frontline reply is confident and severity is normal, the query
/// is answered at the source tier and the delegation checker is never
/// consulted — the result carries no policy id. Otherwise the hand-off runs
/// through the full delegation pipeline with action `"escalate"`.
pub async fn run_escalation(
    runner: &WorkflowRunner,
    frontline: &AgentName,
    supervisor: &AgentName,
    query: &SupportQuery,
) -> FidesResult<WorkflowResult> {
    let resolver = runner.client().resolver();
    let frontline_identity = resolver.resolve(frontline).await?;
    let supervisor_identity = resolver.resolve(supervisor).await?;

    let reply = frontline_respond(query);

    if !should_escalate(&reply, query.severity) {
        info!(
            ticket = %query.id,
            confidence = reply.confidence,
            "query resolved at source tier"
        );
        return Ok(WorkflowResult {
            workflow_id: WorkflowId::new(),
            source_did: frontline_identity.did,
            target_did: supervisor_identity.did,
            policy_id: None,
            status: RESOLVED_AT_SOURCE.to_string(),
            response: json!({
                "ticket": query.id,
                "customer": query.customer,
                "answer": reply.answer,
                "confidence": reply.confidence,
            }),
            reasoning: vec![format!(
                "frontline confidence {:.2} meets the floor and severity is normal",
                reply.confidence
            )],
            completed_at: Utc::now(),
        });
    }

    info!(
        ticket = %query.id,
        confidence = reply.confidence,
        severity = ?query.severity,
        "escalating query to supervisor tier"
    );

    let handoff = HandoffSpec::new(
        frontline.0.clone(),
        supervisor.0.clone(),
        "escalate",
    );
    let input = WorkflowInput {
        kind: "support-query".to_string(),
        payload: serde_json::to_value(query).map_err(|e| WorkflowError::Config {
            reason: format!("support query is not serializable: {}", e),
        })?,
    };

    runner
        .delegate_and_execute(
            &frontline_identity,
            &supervisor_identity,
            &handoff,
            &input,
            &SupervisorEndpoint,
        )
        .await
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fides_core::{TrustClient, TrustConfig};
    use fides_policy::TomlDelegationChecker;
    use fides_registry::{AgentDirectory, RegistryVerifier, StaticResolver};

    use super::*;

    const DIRECTORY: &str = r#"
        [[agents]]
        name = "chatbot-l1.support.company.example.agent"
        did = "did:web:chatbot-l1.support.company.example"
        endpoint = "https://chatbot-l1.support.company.example/invoke"
        capabilities = ["answer-query"]

        [[agents]]
        name = "supervisor-l2.support.company.example.agent"
        did = "did:web:supervisor-l2.support.company.example"
        endpoint = "https://supervisor-l2.support.company.example/invoke"
        capabilities = ["answer-query", "escalation-review"]
    "#;

    const POLICY: &str = r#"
        [[policies]]
        id = "support-escalation"
        description = "Frontline chatbot may escalate to the L2 supervisor"
        from = "did:web:chatbot-l1.support.company.example"
        to = "did:web:supervisor-l2.support.company.example"
        action = "escalate"
        effect = "allow"

        [policies.constraints]
        max_duration_secs = 900
        scope = "support-tickets"
    "#;

    fn make_runner() -> WorkflowRunner {
        let directory = Arc::new(AgentDirectory::from_toml_str(DIRECTORY).unwrap());
        let client = TrustClient::new(
            TrustConfig {
                ans_url: "https://ans.veritrust.example".to_string(),
                a2a_url: Some("https://a2a.company.example".to_string()),
            },
            Arc::new(StaticResolver::new(Arc::clone(&directory))),
            Arc::new(RegistryVerifier::from_directory(&directory)),
        )
        .with_delegation(Arc::new(TomlDelegationChecker::from_toml_str(POLICY).unwrap()));
        WorkflowRunner::new(client)
    }

    fn query(complexity: Complexity, severity: Severity) -> SupportQuery {
        SupportQuery {
            id: "ticket_789".to_string(),
            customer: "premium-customer-001".to_string(),
            question: "Why was my payment declined?".to_string(),
            complexity,
            severity,
        }
    }

    fn names() -> (AgentName, AgentName) {
        (
            AgentName::new("chatbot-l1.support.company.example.agent"),
            AgentName::new("supervisor-l2.support.company.example.agent"),
        )
    }

    /// The predicate is an OR: high severity escalates even when the
    /// frontline is confident at 0.9.
    #[test]
    fn test_high_severity_forces_escalation() {
        let reply = FrontlineReply {
            answer: "confident answer".to_string(),
            confidence: 0.9,
        };
        assert!(should_escalate(&reply, Severity::High));
        assert!(!should_escalate(&reply, Severity::Normal));
    }

    /// Low confidence escalates regardless of severity.
    #[test]
    fn test_low_confidence_forces_escalation() {
        let reply = FrontlineReply {
            answer: "uncertain answer".to_string(),
            confidence: 0.72,
        };
        assert!(should_escalate(&reply, Severity::Normal));
    }

    /// The confidence floor is strict: exactly 0.8 does not escalate.
    #[test]
    fn test_confidence_floor_is_strict() {
        let reply = FrontlineReply {
            answer: "borderline answer".to_string(),
            confidence: 0.8,
        };
        assert!(!should_escalate(&reply, Severity::Normal));
    }

    /// A low-complexity, normal-severity query resolves at the source tier:
    /// no policy id, resolved-at-source status.
    #[tokio::test]
    async fn test_simple_query_resolves_at_source() {
        let runner = make_runner();
        let (frontline, supervisor) = names();

        let result = run_escalation(
            &runner,
            &frontline,
            &supervisor,
            &query(Complexity::Low, Severity::Normal),
        )
        .await
        .unwrap();

        assert_eq!(result.status, RESOLVED_AT_SOURCE);
        assert!(result.policy_id.is_none());
        assert_eq!(result.source_did.0, "did:web:chatbot-l1.support.company.example");
    }

    /// A medium-complexity query (confidence 0.72) escalates through the
    /// delegation pipeline and is answered by the supervisor.
    #[tokio::test]
    async fn test_uncertain_query_escalates() {
        let runner = make_runner();
        let (frontline, supervisor) = names();

        let result = run_escalation(
            &runner,
            &frontline,
            &supervisor,
            &query(Complexity::Medium, Severity::Normal),
        )
        .await
        .unwrap();

        assert_eq!(result.status, RESOLVED_BY_SUPERVISOR);
        assert_eq!(result.policy_id.as_deref(), Some("support-escalation"));
        assert_eq!(
            result.target_did.0,
            "did:web:supervisor-l2.support.company.example"
        );
    }

    /// A high-severity query escalates even though the frontline would have
    /// answered at 0.95 confidence.
    #[tokio::test]
    async fn test_high_severity_query_escalates_despite_confidence() {
        let runner = make_runner();
        let (frontline, supervisor) = names();

        let result = run_escalation(
            &runner,
            &frontline,
            &supervisor,
            &query(Complexity::Low, Severity::High),
        )
        .await
        .unwrap();

        assert_eq!(result.status, RESOLVED_BY_SUPERVISOR);
        assert_eq!(result.policy_id.as_deref(), Some("support-escalation"));
    }
}
