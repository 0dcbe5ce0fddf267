//! TOML-driven delegation checker implementation.
//!
//! `TomlDelegationChecker` loads a `DelegationPolicyConfig` from a TOML
//! string or file and implements the `DelegationChecker` trait from
//! fides-core.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. For the first rule whose `from`, `to`, and `action` patterns match:
//!    convert the rule into a `DelegationDecision` — `allow` grants with the
//!    rule's id and constraint table attached, `deny` denies with the rule's
//!    configured reason.
//! 3. If no rule matched → deny with "denied by default: …" (deny-by-default
//!    policy).

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use fides_contracts::{
    agent::Did,
    delegation::{DelegationDecision, DelegationPolicy},
    error::{FidesResult, WorkflowError},
};
use fides_core::traits::DelegationChecker;

use crate::rule::{DelegationPolicyConfig, RuleEffect};

/// A `DelegationChecker` implementation that reads rules from a TOML document.
///
/// Construct via `from_toml_str` or `from_file`, then attach to the client.
///
/// ```rust,ignore
/// use fides_policy::TomlDelegationChecker;
///
/// let checker = TomlDelegationChecker::from_file(Path::new("policies/banking.toml"))?;
/// ```
#[derive(Debug)]
pub struct TomlDelegationChecker {
    config: DelegationPolicyConfig,
}

impl TomlDelegationChecker {
    /// Parse `s` as TOML and build a `TomlDelegationChecker`.
    ///
    /// Returns `WorkflowError::Config` if the TOML is malformed or does not
    /// match the expected `DelegationPolicyConfig` schema.
    pub fn from_toml_str(s: &str) -> FidesResult<Self> {
        let config: DelegationPolicyConfig =
            toml::from_str(s).map_err(|e| WorkflowError::Config {
                reason: format!("failed to parse delegation policy TOML: {}", e),
            })?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as TOML policy configuration.
    pub fn from_file(path: &Path) -> FidesResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WorkflowError::Config {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

#[async_trait]
impl DelegationChecker for TomlDelegationChecker {
    /// Evaluate the delegation triple against the loaded rule set.
    ///
    /// Rules are tested in declaration order; the first rule matching all
    /// three patterns is applied.  If no rule matches, the checker returns a
    /// denial with the message "denied by default: no delegation policy
    /// matches action '…' from '…' to '…'".
    async fn check(&self, from: &Did, to: &Did, action: &str) -> FidesResult<DelegationDecision> {
        debug!(
            from = %from.0,
            to = %to.0,
            action = %action,
            "evaluating delegation policies"
        );

        for rule in &self.config.policies {
            if !rule.matches(&from.0, &to.0, action) {
                continue;
            }

            debug!(rule_id = %rule.id, action = %action, "delegation rule matched");

            let decision = match rule.effect {
                RuleEffect::Allow => DelegationDecision::granted(DelegationPolicy {
                    id: rule.id.clone(),
                    constraints: rule.constraints.clone(),
                }),

                RuleEffect::Deny => DelegationDecision::denied(
                    rule.deny_reason
                        .clone()
                        .unwrap_or_else(|| format!("denied by policy '{}'", rule.id)),
                ),
            };

            return Ok(decision);
        }

        // No rule matched — deny by default.
        warn!(
            from = %from.0,
            to = %to.0,
            action = %action,
            "no delegation rule matched; denying by default"
        );

        Ok(DelegationDecision::denied(format!(
            "denied by default: no delegation policy matches action '{}' from '{}' to '{}'",
            action, from.0, to.0
        )))
    }
}
