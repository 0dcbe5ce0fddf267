//! In-process credential registry implementing `CredentialVerifier`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use fides_contracts::{agent::Did, error::FidesResult};
use fides_core::traits::CredentialVerifier;

use crate::directory::AgentDirectory;

/// A `CredentialVerifier` answering from a fixed DID → validity table.
///
/// DIDs not present in the table verify as `false` — an unknown identity is
/// never treated as trusted.
pub struct RegistryVerifier {
    validity: HashMap<String, bool>,
}

impl RegistryVerifier {
    /// Build a verifier from the credential flags declared in a directory.
    pub fn from_directory(directory: &Arc<AgentDirectory>) -> Self {
        let validity = directory
            .entries()
            .map(|entry| (entry.did.clone(), entry.credential_valid))
            .collect();
        Self { validity }
    }

    /// Build a verifier from explicit (did, valid) pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            validity: pairs.into_iter().map(|(did, v)| (did.into(), v)).collect(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for RegistryVerifier {
    async fn verify(&self, did: &Did) -> FidesResult<bool> {
        match self.validity.get(&did.0) {
            Some(valid) => {
                debug!(did = %did.0, valid = *valid, "credential checked against registry");
                Ok(*valid)
            }
            None => {
                warn!(did = %did.0, "DID not present in credential registry");
                Ok(false)
            }
        }
    }
}
