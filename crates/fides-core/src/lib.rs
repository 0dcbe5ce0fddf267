//! # fides-core
//!
//! The delegation-gated workflow runner for the FIDES trust-workflow runtime.
//!
//! This crate provides:
//! - The collaborator traits (`NameResolver`, `CredentialVerifier`,
//!   `DelegationChecker`, `ApprovalGate`, `AgentEndpoint`, `TrailWriter`)
//! - The `TrustClient` holding explicit configuration and collaborator
//!   handles, with delegation and approval as optional capabilities
//! - The `WorkflowRunner` that wires everything together in the correct
//!   trust order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fides_core::{TrustClient, TrustConfig, WorkflowRunner, runner::HandoffSpec};
//!
//! let client = TrustClient::new(config, resolver, verifier)
//!     .with_delegation(checker)
//!     .with_approval(gate);
//! let runner = WorkflowRunner::new(client);
//! let result = runner.run(&handoff, &input, &endpoint).await?;
//! ```

pub mod client;
pub mod runner;
pub mod traits;

pub use client::{TrustClient, TrustConfig};
pub use runner::{HandoffSpec, WorkflowRunner};
