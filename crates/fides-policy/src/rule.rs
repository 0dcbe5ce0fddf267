//! Delegation rule types and configuration schema.
//!
//! A `DelegationPolicyConfig` is deserialized from TOML and holds an ordered
//! list of `DelegationRule`s.  Rules are evaluated in declaration order —
//! the first matching rule wins.  If no rule matches, the checker denies by
//! default.

use serde::{Deserialize, Serialize};

use fides_contracts::delegation::DelegationConstraints;

/// The effect a rule produces when it matches an incoming (from, to, action).
///
/// Expressed as a plain string in TOML (kebab-case) for human readability:
///
/// ```toml
/// effect = "allow"
/// effect = "deny"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleEffect {
    Allow,
    Deny,
}

/// A single delegation rule loaded from TOML.
///
/// Rules are matched in the order they appear in the policy file.  The first
/// rule whose `from`, `to`, and `action` patterns all match the incoming
/// triple wins; subsequent rules are not evaluated.
///
/// All three patterns support the special wildcard value `"*"`, which
/// matches any string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationRule {
    /// Stable identifier; becomes the granted policy's id and appears in
    /// workflow results and trail records.
    pub id: String,

    /// Human-readable explanation of what this rule governs.
    pub description: String,

    /// DID pattern for the delegating agent.  Use `"*"` to match any.
    pub from: String,

    /// DID pattern for the agent being delegated to.  Use `"*"` to match any.
    pub to: String,

    /// Action pattern.  Use `"*"` to match any action.
    pub action: String,

    /// The decision this rule produces when it matches.
    pub effect: RuleEffect,

    /// Mandatory when `effect = "deny"`.  Surfaced to the caller verbatim.
    pub deny_reason: Option<String>,

    /// Constraints attached to the granted policy when `effect = "allow"`.
    /// An omitted table grants with no constraints.
    #[serde(default)]
    pub constraints: DelegationConstraints,
}

impl DelegationRule {
    /// Return true if this rule matches the given delegation triple.
    ///
    /// Matching logic:
    /// - `"*"` in any pattern field matches any string.
    /// - Otherwise the field must match exactly (case-sensitive).
    pub fn matches(&self, from: &str, to: &str, action: &str) -> bool {
        let from_matches = self.from == "*" || self.from == from;
        let to_matches = self.to == "*" || self.to == to;
        let action_matches = self.action == "*" || self.action == action;
        from_matches && to_matches && action_matches
    }
}

/// The top-level structure deserialized from a TOML policy file.
///
/// Rules are evaluated in the order they appear in the `policies` array.
///
/// Example:
/// ```toml
/// [[policies]]
/// id = "imaging-referral"
/// description = "Primary diagnostics may refer imaging to the specialist"
/// from = "did:web:primary-diagnostics.hospital.example"
/// to = "did:web:radiology-specialist.hospital.example"
/// action = "analyze-imaging"
/// effect = "allow"
///
/// [policies.constraints]
/// requires_approval = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationPolicyConfig {
    /// Ordered list of rules.  First match wins.
    pub policies: Vec<DelegationRule>,
}
