//! Scenario 1: Banking Fraud Detection
//!
//! A fraud detector hands transactions to a risk analyzer for scoring.
//! Walk-through:
//!
//!   1. Three transactions run the full pipeline: resolve both agents,
//!      verify credentials, obtain the delegation decision, score.
//!      The canned inputs land on ALLOW (score 0.0), REVIEW, and BLOCK.
//!   2. A "reverse-transaction" hand-off hits an explicit deny rule,
//!      demonstrating that the policy authority's reason reaches the caller
//!      verbatim.
//!
//! Each transaction gets its own hash-chained trail, verified at the end.

use std::sync::Arc;

use fides_contracts::{
    error::{FidesResult, WorkflowError},
    workflow::WorkflowInput,
};
use fides_core::{
    runner::HandoffSpec,
    traits::{CredentialVerifier, DelegationChecker, NameResolver},
    TrustClient, TrustConfig, WorkflowRunner,
};
use fides_policy::TomlDelegationChecker;
use fides_registry::{AgentDirectory, RegistryVerifier, StaticResolver};
use fides_trail::InMemoryTrailWriter;

use crate::mock_data::{flagged_transaction, hostile_transaction, quiet_transaction};
use crate::risk::{FraudAnalyzerEndpoint, Transaction};

// ── Agent directory and delegation policy ─────────────────────────────────────

const FRAUD_DETECTOR: &str = "fraud-detector.risk.dbs.example.agent";
const RISK_ANALYZER: &str = "risk-analyzer.analytics.dbs.example.agent";

const DIRECTORY: &str = r#"
    [[agents]]
    name = "fraud-detector.risk.dbs.example.agent"
    did = "did:web:fraud-detector.risk.dbs.example"
    endpoint = "https://fraud-detector.risk.dbs.example/invoke"
    capabilities = ["analyze-transaction"]

    [[agents]]
    name = "risk-analyzer.analytics.dbs.example.agent"
    did = "did:web:risk-analyzer.analytics.dbs.example"
    endpoint = "https://risk-analyzer.analytics.dbs.example/invoke"
    capabilities = ["analyze-transaction", "deep-analysis"]
"#;

const POLICY: &str = r#"
    [[policies]]
    id = "risk-tier-referral"
    description = "Fraud detector may refer transactions to the risk analyzer"
    from = "did:web:fraud-detector.risk.dbs.example"
    to = "did:web:risk-analyzer.analytics.dbs.example"
    action = "analyze-transaction"
    effect = "allow"

    [policies.constraints]
    max_duration_secs = 3600
    scope = "transactions:read"
    max_concurrent = 8

    [[policies]]
    id = "no-reversal-delegation"
    description = "Reversals stay with the settlements desk"
    from = "*"
    to = "*"
    action = "reverse-transaction"
    effect = "deny"
    deny_reason = "transaction reversal is restricted to the settlements desk"
"#;

// ── Scenario wiring ───────────────────────────────────────────────────────────

struct Collaborators {
    resolver: Arc<dyn NameResolver>,
    verifier: Arc<dyn CredentialVerifier>,
    checker: Arc<dyn DelegationChecker>,
}

fn collaborators() -> FidesResult<Collaborators> {
    let directory = Arc::new(AgentDirectory::from_toml_str(DIRECTORY)?);
    Ok(Collaborators {
        resolver: Arc::new(StaticResolver::new(Arc::clone(&directory))),
        verifier: Arc::new(RegistryVerifier::from_directory(&directory)),
        checker: Arc::new(TomlDelegationChecker::from_toml_str(POLICY)?),
    })
}

fn make_runner(c: &Collaborators, trail: Option<Arc<InMemoryTrailWriter>>) -> WorkflowRunner {
    let client = TrustClient::new(
        TrustConfig {
            ans_url: "https://ans.veritrust.example".to_string(),
            a2a_url: Some("https://a2a.dbs.example".to_string()),
        },
        Arc::clone(&c.resolver),
        Arc::clone(&c.verifier),
    )
    .with_delegation(Arc::clone(&c.checker));

    let runner = WorkflowRunner::new(client);
    match trail {
        Some(t) => runner.with_trail(t),
        None => runner,
    }
}

fn transaction_input(txn: &Transaction) -> FidesResult<WorkflowInput> {
    Ok(WorkflowInput {
        kind: "transaction".to_string(),
        payload: serde_json::to_value(txn).map_err(|e| WorkflowError::Config {
            reason: format!("transaction is not serializable: {}", e),
        })?,
    })
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 1: Banking Fraud Detection.
pub async fn run_scenario() -> FidesResult<()> {
    println!("=== Scenario 1: Banking Fraud Detection ===");
    println!();
    println!("  Source: {FRAUD_DETECTOR}");
    println!("  Target: {RISK_ANALYZER}");
    println!("  Action: analyze-transaction");
    println!();

    let c = collaborators()?;

    for txn in [quiet_transaction(), flagged_transaction(), hostile_transaction()] {
        let trail = Arc::new(InMemoryTrailWriter::new(txn.id.clone()));
        let runner = make_runner(&c, Some(Arc::clone(&trail)));
        let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "analyze-transaction");

        println!("  Transaction {}", txn.id);
        println!("  Amount:      {} {:.2}", txn.currency, txn.amount);
        println!("  Recent txns: {}", txn.recent_transaction_count);
        println!("  Destination: {}", txn.destination_country);

        let result = runner
            .run(&handoff, &transaction_input(&txn)?, &FraudAnalyzerEndpoint)
            .await?;

        println!("  Policy:      {}", result.policy_id.as_deref().unwrap_or("-"));
        println!(
            "  Score:       {:.2} → {}",
            result.response["score"].as_f64().unwrap_or_default(),
            result.status
        );
        for reason in &result.reasoning {
            println!("    - {reason}");
        }

        let log = trail.export_log();
        println!(
            "  Trail:       {} ({} event(s))",
            if trail.verify_integrity() { "VERIFIED" } else { "INTEGRITY FAILURE" },
            log.events.len()
        );
        println!();
    }

    // ── Denied hand-off ───────────────────────────────────────────────────────

    println!("  Attempting a reversal hand-off (explicitly denied by policy)");
    let runner = make_runner(&c, None);
    let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "reverse-transaction");

    match runner
        .run(&handoff, &transaction_input(&quiet_transaction())?, &FraudAnalyzerEndpoint)
        .await
    {
        Err(WorkflowError::Delegation { reason }) => {
            println!("  Denied as expected: {reason}");
        }
        Ok(_) => println!("  UNEXPECTED: reversal hand-off was allowed"),
        Err(other) => println!("  UNEXPECTED error: {other}"),
    }

    println!();
    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use fides_contracts::trail::WorkflowStage;

    use super::*;

    /// The hostile transaction runs the full pipeline and blocks.
    #[tokio::test]
    async fn test_hostile_transaction_blocks_end_to_end() {
        let c = collaborators().unwrap();
        let runner = make_runner(&c, None);
        let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "analyze-transaction");

        let result = runner
            .run(
                &handoff,
                &transaction_input(&hostile_transaction()).unwrap(),
                &FraudAnalyzerEndpoint,
            )
            .await
            .unwrap();

        assert_eq!(result.status, "BLOCK");
        assert_eq!(result.policy_id.as_deref(), Some("risk-tier-referral"));
        assert_eq!(result.source_did.0, "did:web:fraud-detector.risk.dbs.example");
        assert_eq!(result.target_did.0, "did:web:risk-analyzer.analytics.dbs.example");
        assert_eq!(result.reasoning.len(), 3);
    }

    /// The quiet transaction is allowed with the normal-pattern note.
    #[tokio::test]
    async fn test_quiet_transaction_allows_end_to_end() {
        let c = collaborators().unwrap();
        let runner = make_runner(&c, None);
        let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "analyze-transaction");

        let result = runner
            .run(
                &handoff,
                &transaction_input(&quiet_transaction()).unwrap(),
                &FraudAnalyzerEndpoint,
            )
            .await
            .unwrap();

        assert_eq!(result.status, "ALLOW");
        assert_eq!(result.response["score"].as_f64(), Some(0.0));
        assert_eq!(result.reasoning, vec!["transaction matches normal spending pattern"]);
    }

    /// The reversal action hits the explicit deny rule, reason verbatim.
    #[tokio::test]
    async fn test_reversal_denied_with_policy_reason() {
        let c = collaborators().unwrap();
        let runner = make_runner(&c, None);
        let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "reverse-transaction");

        match runner
            .run(
                &handoff,
                &transaction_input(&quiet_transaction()).unwrap(),
                &FraudAnalyzerEndpoint,
            )
            .await
        {
            Err(WorkflowError::Delegation { reason }) => {
                assert_eq!(
                    reason,
                    "transaction reversal is restricted to the settlements desk"
                );
            }
            other => panic!("expected Delegation error, got {other:?}"),
        }
    }

    /// A completed run leaves a verified four-stage trail.
    #[tokio::test]
    async fn test_completed_run_leaves_verified_trail() {
        let c = collaborators().unwrap();
        let trail = Arc::new(InMemoryTrailWriter::new("txn_trail_test"));
        let runner = make_runner(&c, Some(Arc::clone(&trail)));
        let handoff = HandoffSpec::new(FRAUD_DETECTOR, RISK_ANALYZER, "analyze-transaction");

        runner
            .run(
                &handoff,
                &transaction_input(&flagged_transaction()).unwrap(),
                &FraudAnalyzerEndpoint,
            )
            .await
            .unwrap();

        assert!(trail.verify_integrity());
        let log = trail.export_log();
        let stages: Vec<WorkflowStage> = log.events.iter().map(|e| e.record.stage).collect();
        assert_eq!(
            stages,
            vec![
                WorkflowStage::Resolved,
                WorkflowStage::CredentialsVerified,
                WorkflowStage::DelegationGranted,
                WorkflowStage::Executed,
            ]
        );
    }
}
