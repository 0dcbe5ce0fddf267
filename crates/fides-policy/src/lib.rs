//! # fides-policy
//!
//! A TOML-driven, deny-by-default delegation policy engine for FIDES.
//!
//! ## Overview
//!
//! This crate provides [`TomlDelegationChecker`], which implements the
//! [`DelegationChecker`](fides_core::traits::DelegationChecker) trait.
//! Rules are declared in a TOML file, evaluated in order, and the first
//! matching rule wins.  If no rule matches, the delegation is denied.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use fides_policy::TomlDelegationChecker;
//!
//! let checker = TomlDelegationChecker::from_file(Path::new("policies/banking.toml"))?;
//! // Attach `checker` to a `TrustClient` via `.with_delegation(...)`.
//! ```
//!
//! ## Rule matching
//!
//! Each rule specifies `from`, `to`, and `action` patterns.  All three
//! support the wildcard `"*"` which matches any value.  Rules are applied in
//! declaration order; the first match wins.

pub mod engine;
pub mod rule;

pub use engine::TomlDelegationChecker;
pub use rule::{DelegationPolicyConfig, DelegationRule, RuleEffect};

// ── Tests ─────────────────────────────────────────────────────────────────────
