//! Scenario 3: Customer Service Escalation
//!
//! A frontline chatbot answers what it can and escalates the rest to an L2
//! supervisor. Walk-through:
//!
//!   1. A simple billing question is answered at the source tier — the
//!      delegation checker is never consulted and the result carries no
//!      policy id.
//!   2. An uncertain declined-payment question (frontline confidence 0.72)
//!      escalates through the delegation pipeline.
//!   3. A high-severity query escalates even though the frontline would have
//!      answered it confidently.
//!   4. The reverse direction (supervisor escalating to the chatbot) has no
//!      matching policy and is denied by default.

use std::sync::Arc;

use fides_contracts::{
    agent::AgentName,
    error::{FidesResult, WorkflowError},
};
use fides_core::{
    traits::{CredentialVerifier, DelegationChecker, NameResolver},
    TrustClient, TrustConfig, WorkflowRunner,
};
use fides_policy::TomlDelegationChecker;
use fides_registry::{AgentDirectory, RegistryVerifier, StaticResolver};

use crate::mock_data::{simple_query, uncertain_query, urgent_query};
use crate::triage::run_escalation;

// ── Agent directory and delegation policy ─────────────────────────────────────

const FRONTLINE: &str = "chatbot-l1.support.company.example.agent";
const SUPERVISOR: &str = "supervisor-l2.support.company.example.agent";

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

// ── Scenario wiring ───────────────────────────────────────────────────────────

fn make_runner() -> FidesResult<WorkflowRunner> {
    let directory = Arc::new(AgentDirectory::from_toml_str(DIRECTORY)?);
    let resolver: Arc<dyn NameResolver> = Arc::new(StaticResolver::new(Arc::clone(&directory)));
    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(RegistryVerifier::from_directory(&directory));
    let checker: Arc<dyn DelegationChecker> =
        Arc::new(TomlDelegationChecker::from_toml_str(POLICY)?);

    let client = TrustClient::new(
        TrustConfig {
            ans_url: "https://ans.veritrust.example".to_string(),
            a2a_url: Some("https://a2a.company.example".to_string()),
        },
        resolver,
        verifier,
    )
    .with_delegation(checker);

    Ok(WorkflowRunner::new(client))
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 3: Customer Service Escalation.
pub async fn run_scenario() -> FidesResult<()> {
    println!("=== Scenario 3: Customer Service Escalation ===");
    println!();
    println!("  Frontline:  {FRONTLINE}");
    println!("  Supervisor: {SUPERVISOR}");
    println!("  Action:     escalate");
    println!();

    let runner = make_runner()?;
    let frontline = AgentName::new(FRONTLINE);
    let supervisor = AgentName::new(SUPERVISOR);

    for query in [simple_query(), uncertain_query(), urgent_query()] {
        println!("  Ticket {}", query.id);
        println!("  Question:   {}", query.question);
        println!(
            "  Complexity: {:?} | Severity: {:?}",
            query.complexity, query.severity
        );

        let result = run_escalation(&runner, &frontline, &supervisor, &query).await?;

        println!("  Outcome:    {}", result.status);
        println!("  Policy:     {}", result.policy_id.as_deref().unwrap_or("-"));
        println!(
            "  Answer:     {}",
            result.response["answer"].as_str().unwrap_or("?")
        );
        for reason in &result.reasoning {
            println!("    - {reason}");
        }
        println!();
    }

    // ── Reverse direction ─────────────────────────────────────────────────────

    println!("  Attempting the reverse escalation (supervisor → chatbot)");
    match run_escalation(&runner, &supervisor, &frontline, &uncertain_query()).await {
        Err(WorkflowError::Delegation { reason }) => {
            println!("  Denied as expected: {reason}");
        }
        Ok(result) => println!("  UNEXPECTED: reverse escalation produced '{}'", result.status),
        Err(other) => println!("  UNEXPECTED error: {other}"),
    }

    println!();
    println!("  Scenario 3 complete.");
    println!();
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{RESOLVED_AT_SOURCE, RESOLVED_BY_SUPERVISOR};

    /// The three canned queries land on their expected outcomes.
    #[tokio::test]
    async fn test_canned_queries_route_as_expected() {
        let runner = make_runner().unwrap();
        let frontline = AgentName::new(FRONTLINE);
        let supervisor = AgentName::new(SUPERVISOR);

        let cases = [
            (simple_query(), RESOLVED_AT_SOURCE),
            (uncertain_query(), RESOLVED_BY_SUPERVISOR),
            (urgent_query(), RESOLVED_BY_SUPERVISOR),
        ];

        for (query, expected_status) in cases {
            let result = run_escalation(&runner, &frontline, &supervisor, &query)
                .await
                .unwrap();
            assert_eq!(
                result.status, expected_status,
                "ticket {} routed unexpectedly",
                query.id
            );
        }
    }

    /// The reverse direction has no matching policy: denied by default, and
    /// the default denial reason names the action.
    #[tokio::test]
    async fn test_reverse_escalation_denied_by_default() {
        let runner = make_runner().unwrap();
        let frontline = AgentName::new(FRONTLINE);
        let supervisor = AgentName::new(SUPERVISOR);

        match run_escalation(&runner, &supervisor, &frontline, &uncertain_query()).await {
            Err(WorkflowError::Delegation { reason }) => {
                assert!(reason.contains("denied by default"), "unexpected reason: {reason}");
                assert!(reason.contains("escalate"));
            }
            other => panic!("expected Delegation error, got {other:?}"),
        }
    }
}
