//! # fides-ref-workflows
//!
//! Reference workflows for the FIDES trust-workflow runtime, one per
//! business domain:
//!
//! 1. **Banking Fraud Detection** — a fraud detector hands transactions to a
//!    risk analyzer; rule-based scoring maps to ALLOW / REVIEW / BLOCK.
//! 2. **Healthcare Diagnostic Chain** — primary diagnostics refers imaging
//!    cases to a radiology specialist under an approval-gated policy.
//! 3. **Customer Service Escalation** — a frontline chatbot escalates
//!    uncertain or high-severity queries to an L2 supervisor; confident
//!    answers never enter the delegation pipeline.
//!
//! All directories, policies, and domain data are hardcoded and fictional.
//! No external API calls are made.

pub mod approval;
pub mod diagnosis;
pub mod mock_data;
pub mod risk;
pub mod scenarios;
pub mod triage;
