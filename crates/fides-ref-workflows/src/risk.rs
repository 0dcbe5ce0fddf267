//! Rule-based transaction risk scoring and the fraud analyzer endpoint.
//!
//! The scoring is additive: each triggered condition contributes a fixed
//! weight, the sum is clamped to [0.0, 1.0], and the clamped score maps to
//! a decision with strict (greater-than) thresholds.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use fides_contracts::{
    agent::AgentIdentity,
    error::{FidesResult, WorkflowError},
    workflow::{EndpointResponse, WorkflowInput},
};
use fides_core::traits::AgentEndpoint;

/// Sentinel destination-country value that marks a high-risk corridor.
pub const HIGH_RISK_COUNTRY: &str = "HIGH_RISK";

/// Reasoning strings, appended in trigger order.
const REASON_HIGH_AMOUNT: &str = "transaction amount exceeds 10,000";
const REASON_HIGH_VELOCITY: &str = "high velocity: more than 5 recent transactions";
const REASON_HIGH_RISK_COUNTRY: &str = "destination country is flagged high-risk";
const REASON_NORMAL_PATTERN: &str = "transaction matches normal spending pattern";

/// A payment transaction as submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Amount in the transaction's currency unit. Thresholds are
    /// currency-unit-agnostic.
    pub amount: f64,
    pub currency: String,
    pub merchant: String,
    /// How many transactions this account produced recently.
    #[serde(default)]
    pub recent_transaction_count: u32,
    /// Destination country code; compare against [`HIGH_RISK_COUNTRY`].
    #[serde(default)]
    pub destination_country: String,
}

/// The decision mapped from a clamped risk score.
///
/// Thresholds are strict: a score of exactly 0.8 is `Review`, not `Block`,
/// and a score of exactly 0.5 is `Allow`, not `Review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskDecision {
    Allow,
    Review,
    Block,
}

impl RiskDecision {
    /// Map a clamped score to a decision.
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::Block
        } else if score > 0.5 {
            Self::Review
        } else {
            Self::Allow
        }
    }

    /// The uppercase label used in workflow results.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Review => "REVIEW",
            Self::Block => "BLOCK",
        }
    }
}

/// The outcome of scoring one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The clamped score in [0.0, 1.0].
    pub score: f64,
    pub decision: RiskDecision,
    /// Human-readable reasoning, in trigger order.
    pub reasoning: Vec<String>,
}

/// Score one transaction.
///
/// Weights:
/// - +0.3 when amount > 10,000
/// - +0.2 more when amount > 50,000 (cumulative; shares the high-amount
///   reason string)
/// - +0.2 when more than 5 recent transactions
/// - +0.3 when the destination country equals [`HIGH_RISK_COUNTRY`]
///
/// Known quirk, preserved deliberately: the normal-pattern note is appended
/// whenever the *unclamped* sum is below 0.3, and that check runs after the
/// trigger checks regardless of whether any fired. A transaction whose only
/// trigger is velocity (+0.2) therefore carries both the velocity reason and
/// the normal-pattern note.
pub fn score_transaction(txn: &Transaction) -> RiskAssessment {
    let mut score = 0.0_f64;
    let mut reasoning = Vec::new();

    if txn.amount > 10_000.0 {
        score += 0.3;
        reasoning.push(REASON_HIGH_AMOUNT.to_string());
    }
    if txn.amount > 50_000.0 {
        score += 0.2;
    }
    if txn.recent_transaction_count > 5 {
        score += 0.2;
        reasoning.push(REASON_HIGH_VELOCITY.to_string());
    }
    if txn.destination_country == HIGH_RISK_COUNTRY {
        score += 0.3;
        reasoning.push(REASON_HIGH_RISK_COUNTRY.to_string());
    }

    // Evaluated on the unclamped sum, after the trigger checks.
    if score < 0.3 {
        reasoning.push(REASON_NORMAL_PATTERN.to_string());
    }

    let clamped = score.clamp(0.0, 1.0);
    let decision = RiskDecision::from_score(clamped);

    debug!(
        transaction_id = %txn.id,
        score = clamped,
        decision = decision.label(),
        "transaction scored"
    );

    RiskAssessment {
        score: clamped,
        decision,
        reasoning,
    }
}

/// The downstream risk analyzer: scores the delegated transaction.
pub struct FraudAnalyzerEndpoint;

#[async_trait]
impl AgentEndpoint for FraudAnalyzerEndpoint {
    async fn invoke(
        &self,
        target: &AgentIdentity,
        input: &WorkflowInput,
    ) -> FidesResult<EndpointResponse> {
        let txn: Transaction =
            serde_json::from_value(input.payload.clone()).map_err(|e| {
                WorkflowError::Downstream {
                    endpoint: target.endpoint.clone(),
                    reason: format!("malformed transaction payload: {}", e),
                }
            })?;

        let assessment = score_transaction(&txn);

        Ok(EndpointResponse {
            status: assessment.decision.label().to_string(),
            body: json!({
                "transaction_id": txn.id,
                "score": assessment.score,
                "decision": assessment.decision,
                "analyzed_by": target.did.0,
            }),
            reasoning: assessment.reasoning,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(amount: f64, recent: u32, country: &str) -> Transaction {
        Transaction {
            id: "txn_1".to_string(),
            amount,
            currency: "USD".to_string(),
            merchant: "Online Electronics Store".to_string(),
            recent_transaction_count: recent,
            destination_country: country.to_string(),
        }
    }

    /// Nothing triggered: score 0.0, ALLOW, only the normal-pattern note.
    #[test]
    fn test_quiet_transaction_scores_zero() {
        let a = score_transaction(&txn(10_000.0, 5, "SG"));

        assert_eq!(a.score, 0.0);
        assert_eq!(a.decision, RiskDecision::Allow);
        assert_eq!(a.reasoning, vec![REASON_NORMAL_PATTERN]);
    }

    /// Everything triggered: unclamped 0.3+0.2+0.2+0.3 = 1.0 → BLOCK, with
    /// exactly the three trigger reasons and no normal-pattern note.
    #[test]
    fn test_fully_triggered_transaction_blocks() {
        let a = score_transaction(&txn(60_000.0, 6, HIGH_RISK_COUNTRY));

        assert!((a.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(a.decision, RiskDecision::Block);
        assert_eq!(
            a.reasoning,
            vec![
                REASON_HIGH_AMOUNT,
                REASON_HIGH_VELOCITY,
                REASON_HIGH_RISK_COUNTRY,
            ]
        );
    }

    /// Decision thresholds are strict greater-than comparisons.
    #[test]
    fn test_decision_boundaries_are_strict() {
        assert_eq!(RiskDecision::from_score(0.5), RiskDecision::Allow);
        assert_eq!(RiskDecision::from_score(0.8), RiskDecision::Review);
        assert_eq!(RiskDecision::from_score(0.51), RiskDecision::Review);
        assert_eq!(RiskDecision::from_score(0.81), RiskDecision::Block);
    }

    /// amount > 50,000 alone lands exactly on 0.5 → ALLOW, one reason string.
    #[test]
    fn test_large_amount_alone_is_allowed() {
        let a = score_transaction(&txn(60_000.0, 0, "SG"));

        assert_eq!(a.score, 0.5);
        assert_eq!(a.decision, RiskDecision::Allow);
        assert_eq!(a.reasoning, vec![REASON_HIGH_AMOUNT]);
    }

    /// amount > 50,000 plus a high-risk destination lands exactly on 0.8 →
    /// REVIEW, not BLOCK.
    #[test]
    fn test_exact_block_boundary_reviews() {
        let a = score_transaction(&txn(60_000.0, 0, HIGH_RISK_COUNTRY));

        assert_eq!(a.decision, RiskDecision::Review);
        assert_eq!(a.reasoning, vec![REASON_HIGH_AMOUNT, REASON_HIGH_RISK_COUNTRY]);
    }

    /// The 10k threshold is strict: 10,000.00 exactly does not trigger.
    #[test]
    fn test_amount_threshold_is_strict() {
        let below = score_transaction(&txn(10_000.0, 0, "SG"));
        assert_eq!(below.score, 0.0);

        let above = score_transaction(&txn(10_000.01, 0, "SG"));
        assert_eq!(above.decision, RiskDecision::Allow);
        assert_eq!(above.reasoning, vec![REASON_HIGH_AMOUNT]);
    }

    /// Preserved quirk: velocity alone sums to 0.2, which is below the 0.3
    /// note threshold, so the velocity reason and the normal-pattern note
    /// legitimately co-exist.
    #[test]
    fn test_velocity_only_keeps_normal_pattern_note() {
        let a = score_transaction(&txn(500.0, 6, "SG"));

        assert_eq!(a.decision, RiskDecision::Allow);
        assert_eq!(a.reasoning, vec![REASON_HIGH_VELOCITY, REASON_NORMAL_PATTERN]);
    }

    /// The endpoint rejects payloads that do not decode as a transaction.
    #[tokio::test]
    async fn test_endpoint_rejects_malformed_payload() {
        use fides_contracts::agent::{AgentName, Did};

        let target = AgentIdentity {
            name: AgentName::new("risk-analyzer.analytics.dbs.example.agent"),
            did: Did::new("did:web:risk-analyzer.analytics.dbs.example"),
            endpoint: "https://risk-analyzer.analytics.dbs.example/invoke".to_string(),
        };
        let input = WorkflowInput {
            kind: "transaction".to_string(),
            payload: json!({ "id": "txn_1" }),
        };

        let result = FraudAnalyzerEndpoint.invoke(&target, &input).await;
        match result {
            Err(WorkflowError::Downstream { reason, .. }) => {
                assert!(reason.contains("malformed transaction payload"));
            }
            other => panic!("expected Downstream error, got {other:?}"),
        }
    }

    /// The endpoint's response mirrors the assessment.
    #[tokio::test]
    async fn test_endpoint_response_carries_assessment() {
        use fides_contracts::agent::{AgentName, Did};

        let target = AgentIdentity {
            name: AgentName::new("risk-analyzer.analytics.dbs.example.agent"),
            did: Did::new("did:web:risk-analyzer.analytics.dbs.example"),
            endpoint: "https://risk-analyzer.analytics.dbs.example/invoke".to_string(),
        };
        let input = WorkflowInput {
            kind: "transaction".to_string(),
            payload: serde_json::to_value(txn(60_000.0, 6, HIGH_RISK_COUNTRY)).unwrap(),
        };

        let response = FraudAnalyzerEndpoint.invoke(&target, &input).await.unwrap();
        assert_eq!(response.status, "BLOCK");
        assert_eq!(response.body["transaction_id"], "txn_1");
        assert_eq!(response.reasoning.len(), 3);
    }
}
