//! Kubernetes-backed secret store
//!
//! Secrets are read as dynamic objects so the `data` values keep the base64
//! encoding the API server returns; decoding happens in the resolver.

use super::{SecretData, SecretStore, StoreResult};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::Api;
use kube::core::{ApiResource, DynamicObject};

/// Reads secrets from the cluster the client is connected to
#[derive(Clone)]
pub struct KubeSecretStore {
    client: kube::Client,
    api_resource: ApiResource,
}

impl KubeSecretStore {
    pub fn new(client: kube::Client) -> Self {
        Self {
            client,
            api_resource: ApiResource::erase::<Secret>(&()),
        }
    }

    /// Get a reference to the underlying Kubernetes client
    pub fn client(&self) -> &kube::Client {
        &self.client
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    async fn get_secret_data(&self, namespace: &str, name: &str) -> StoreResult<Option<SecretData>> {
        tracing::debug!("Fetching secret {}/{}", namespace, name);

        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &self.api_resource);

        let Some(obj) = api.get_opt(name).await? else {
            return Ok(None);
        };

        Ok(Some(encoded_data(&obj)))
    }
}

/// Collect the string values of a secret's `data` section
fn encoded_data(obj: &DynamicObject) -> SecretData {
    obj.data
        .get("data")
        .and_then(|d| d.as_object())
        .map(|data| {
            data.iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
