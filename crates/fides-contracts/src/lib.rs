//! # fides-contracts
//!
//! Shared types and contracts for the FIDES trust-workflow runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod agent;
pub mod delegation;
pub mod error;
pub mod trail;
pub mod workflow;
