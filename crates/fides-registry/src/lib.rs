//! # fides-registry
//!
//! TOML-driven in-process agent directory and credential registry for FIDES.
//!
//! ## Overview
//!
//! This crate provides deterministic implementations of the two mandatory
//! collaborators:
//!
//! - [`StaticResolver`] — ANS-equivalent resolution over a [`AgentDirectory`]
//!   loaded from TOML
//! - [`RegistryVerifier`] — credential verification from the validity flags
//!   declared alongside each directory entry
//!
//! The directory also supports capability discovery via
//! [`AgentDirectory::search`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fides_registry::{AgentDirectory, RegistryVerifier, StaticResolver};
//!
//! let directory = Arc::new(AgentDirectory::from_toml_str(DIRECTORY_TOML)?);
//! let resolver = StaticResolver::new(Arc::clone(&directory));
//! let verifier = RegistryVerifier::from_directory(&directory);
//! ```

pub mod credentials;
pub mod directory;

pub use credentials::RegistryVerifier;
pub use directory::{AgentDirectory, AgentEntry, DirectoryConfig, StaticResolver};

// ── Tests ─────────────────────────────────────────────────────────────────────
