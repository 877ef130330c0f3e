//! Secret reference resolution
//!
//! Turns a (namespace, name, key) triple into the decoded secret value. Every
//! missing link in the chain is an absent value; only store faults are errors.

use super::{SecretReference, SecretStore};
use crate::extractor::{ExtractionError, ExtractionResult};
use base64::Engine;
use std::fmt;
use std::sync::Arc;

/// Namespace used when a reference does not name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Resolves secret references against an optional secret store
#[derive(Clone)]
pub struct SecretResolver {
    store: Option<Arc<dyn SecretStore>>,
    default_namespace: String,
}

impl SecretResolver {
    /// Create a resolver backed by `store`
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store: Some(store),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Create a resolver without a store; every lookup resolves to nothing
    pub fn detached() -> Self {
        Self {
            store: None,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Create a resolver from an optional store
    pub fn from_store(store: Option<Arc<dyn SecretStore>>) -> Self {
        match store {
            Some(store) => Self::new(store),
            None => Self::detached(),
        }
    }

    /// Override the namespace used for references without one
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Fetch and base64-decode `key` from secret `name`
    ///
    /// Returns `Ok(None)` when no store is configured, when the secret or key
    /// does not exist, or when the stored value is not valid base64.
    pub async fn resolve(
        &self,
        namespace: Option<&str>,
        name: &str,
        key: &str,
    ) -> ExtractionResult<Option<Vec<u8>>> {
        let namespace = namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or(&self.default_namespace);

        if name.is_empty() || key.is_empty() {
            tracing::debug!("Skipping secret lookup with empty name or key");
            return Ok(None);
        }

        let Some(store) = &self.store else {
            tracing::debug!(
                "No secret store configured, cannot resolve {}/{}",
                namespace,
                name
            );
            return Ok(None);
        };

        let data = store
            .get_secret_data(namespace, name)
            .await
            .map_err(|source| ExtractionError::SecretStore {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            })?;

        let Some(data) = data else {
            tracing::debug!("Secret {}/{} not found", namespace, name);
            return Ok(None);
        };

        let Some(encoded) = data.get(key) else {
            tracing::debug!("Secret {}/{} has no key '{}'", namespace, name, key);
            return Ok(None);
        };

        match base64::engine::general_purpose::STANDARD.decode(encoded.trim()) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::warn!(
                    "Secret {}/{} key '{}' is not valid base64: {}",
                    namespace,
                    name,
                    key,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Resolve a reference parsed from release notes
    pub async fn resolve_reference(
        &self,
        reference: &SecretReference,
    ) -> ExtractionResult<Option<Vec<u8>>> {
        self.resolve(
            reference.namespace.as_deref(),
            &reference.name,
            &reference.key,
        )
        .await
    }

    /// Resolve a reference and interpret the value as text
    pub async fn resolve_text(
        &self,
        reference: &SecretReference,
    ) -> ExtractionResult<Option<String>> {
        // TODO: make the charset configurable; secret values are assumed to be UTF-8
        // and invalid sequences are replaced rather than rejected.
        Ok(self
            .resolve_reference(reference)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

impl fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver")
            .field("has_store", &self.store.is_some())
            .field("default_namespace", &self.default_namespace)
            .finish()
    }
}
