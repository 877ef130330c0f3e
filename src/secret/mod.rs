//! Secret store access
//!
//! Release notes often tell the operator to fetch a password with
//! `kubectl get secret ... | base64 --decode`. This module resolves such
//! references against the cluster instead of the operator's shell.

mod kube_store;
mod resolver;

pub use kube_store::KubeSecretStore;
pub use resolver::{DEFAULT_NAMESPACE, SecretResolver};

use async_trait::async_trait;
use std::collections::BTreeMap;

/// Data section of a secret, values still base64-encoded as stored
pub type SecretData = BTreeMap<String, String>;

/// Secret store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Kubernetes API request failed: {0}")]
    Api(#[from] kube::Error),

    #[error("Secret store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for secret store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to a namespaced key-value secret store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the data section of a secret
    ///
    /// Returns `Ok(None)` when the secret does not exist and `Ok(Some(empty))`
    /// when it exists without data. Errors are reserved for transport and
    /// authorization faults.
    async fn get_secret_data(&self, namespace: &str, name: &str) -> StoreResult<Option<SecretData>>;
}

/// A "fetch `key` from secret `name`" instruction found in release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    /// Namespace of the secret; the resolver's default applies when unset
    pub namespace: Option<String>,
    pub name: String,
    pub key: String,
}

impl SecretReference {
    pub fn new(namespace: Option<String>, name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            key: key.into(),
        }
    }

    /// Whether the reference carries enough to attempt a lookup
    ///
    /// An empty namespace counts as unset and falls back to the default.
    pub fn is_resolvable(&self) -> bool {
        !self.name.is_empty() && !self.key.is_empty()
    }
}
