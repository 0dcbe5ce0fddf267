//! TOML-backed agent directory and the resolver built on it.
//!
//! The directory is the in-process stand-in for an agent name service:
//! a table of registered agents loaded from TOML, looked up by logical
//! name, searchable by declared capability.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fides_contracts::{
    agent::{AgentIdentity, AgentName, Did},
    error::{FidesResult, WorkflowError},
};
use fides_core::traits::NameResolver;

/// One registered agent, as declared in the directory TOML.
///
/// ```toml
/// [[agents]]
/// name = "fraud-detector.risk.dbs.example.agent"
/// did = "did:web:fraud-detector.risk.dbs.example"
/// endpoint = "https://fraud-detector.risk.dbs.example/invoke"
/// capabilities = ["analyze-transaction"]
/// credential_valid = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    /// The logical name applications resolve by.
    pub name: String,
    /// The agent's decentralized identifier.
    pub did: String,
    /// Reference to the agent's reachable endpoint.
    pub endpoint: String,
    /// Capability strings the agent advertises for discovery.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Whether the agent's credentials currently verify as valid.
    /// Defaults to true; set false to model a revoked credential.
    #[serde(default = "default_credential_valid")]
    pub credential_valid: bool,
}

fn default_credential_valid() -> bool {
    true
}

/// The top-level structure deserialized from a directory TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub agents: Vec<AgentEntry>,
}

/// An in-process agent directory.
///
/// Construct via `from_toml_str` or `from_file`, then share behind an `Arc`
/// between the resolver and the credential registry.
#[derive(Debug)]
pub struct AgentDirectory {
    by_name: HashMap<String, AgentEntry>,
}

impl AgentDirectory {
    /// Parse `s` as TOML and build a directory.
    ///
    /// Returns `WorkflowError::Config` if the TOML is malformed or does not
    /// match the expected `DirectoryConfig` schema.
    pub fn from_toml_str(s: &str) -> FidesResult<Self> {
        let config: DirectoryConfig = toml::from_str(s).map_err(|e| WorkflowError::Config {
            reason: format!("failed to parse agent directory TOML: {}", e),
        })?;

        let by_name = config
            .agents
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();
        Ok(Self { by_name })
    }

    /// Read the file at `path` and parse it as a directory TOML document.
    pub fn from_file(path: &Path) -> FidesResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WorkflowError::Config {
            reason: format!("failed to read directory file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Look up a registered agent by logical name.
    pub fn lookup(&self, name: &str) -> Option<&AgentEntry> {
        self.by_name.get(name)
    }

    /// Return the identities of every agent advertising `capability`.
    ///
    /// Matching is exact on the capability string. Results carry no
    /// particular order.
    pub fn search(&self, capability: &str) -> Vec<AgentIdentity> {
        self.by_name
            .values()
            .filter(|entry| entry.capabilities.iter().any(|c| c == capability))
            .map(identity_of)
            .collect()
    }

    /// Iterate all registered entries.
    pub fn entries(&self) -> impl Iterator<Item = &AgentEntry> {
        self.by_name.values()
    }
}

fn identity_of(entry: &AgentEntry) -> AgentIdentity {
    AgentIdentity {
        name: AgentName::new(entry.name.clone()),
        did: Did::new(entry.did.clone()),
        endpoint: entry.endpoint.clone(),
    }
}

/// A `NameResolver` answering from a shared in-process directory.
pub struct StaticResolver {
    directory: Arc<AgentDirectory>,
}

impl StaticResolver {
    /// Create a resolver over the given directory.
    pub fn new(directory: Arc<AgentDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl NameResolver for StaticResolver {
    async fn resolve(&self, name: &AgentName) -> FidesResult<AgentIdentity> {
        match self.directory.lookup(&name.0) {
            Some(entry) => {
                debug!(name = %name.0, did = %entry.did, "agent name resolved");
                Ok(identity_of(entry))
            }
            None => {
                warn!(name = %name.0, "agent name not registered in directory");
                Err(WorkflowError::Resolution {
                    name: name.0.clone(),
                    reason: "not registered in directory".to_string(),
                })
            }
        }
    }
}
