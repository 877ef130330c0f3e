//! Registry bootstrap tests
//!
//! Builds registries the way a host would at startup: the built-in charts from
//! configuration, plus any extractor the host registers in code.

use async_trait::async_trait;
use chart_credentials::config::{Config, ConfigLoader};
use chart_credentials::extractor::{FieldBinding, PatternRule, RuleExtractor};
use chart_credentials::secret::{SecretData, StoreResult};
use chart_credentials::{
    CredentialsExtractor, ExtractorRegistry, RegistryError, SecretResolver, SecretStore,
    StatusNotes, bootstrap,
};
use regex::Regex;
use std::sync::Arc;

const REDIS_SECRET_LINE: &str = r#"    export REDIS_PASSWORD=$(kubectl get secret --namespace default my-redis -o jsonpath="{.data.redis-password}" | base64 --decode)"#;

/// Store holding the password of the "my-redis" release
struct RedisSecretStore;

#[async_trait]
impl SecretStore for RedisSecretStore {
    async fn get_secret_data(&self, namespace: &str, name: &str) -> StoreResult<Option<SecretData>> {
        Ok((namespace == "default" && name == "my-redis").then(|| {
            SecretData::from([("redis-password".to_string(), "czNjcjN0".to_string())])
        }))
    }
}

fn memcached() -> Arc<dyn CredentialsExtractor> {
    let rule = PatternRule::fields(
        "hostname",
        Regex::new(r"(\S+\.svc\.cluster\.local)").unwrap(),
        vec![FieldBinding::new(1, "host"), FieldBinding::new(1, "hostname")],
    );
    Arc::new(
        RuleExtractor::new("memcached", vec![rule], SecretResolver::detached())
            .with_default("port", "11211"),
    )
}

#[test]
fn test_bootstrap_registers_builtin_charts() {
    let registry = bootstrap(&Config::default(), None);
    assert_eq!(registry.charts(), vec!["mongodb", "prometheus", "redis"]);
}

#[tokio::test]
async fn test_bootstrap_wires_the_secret_store() {
    let notes = StatusNotes::from(vec![REDIS_SECRET_LINE]);

    let online = bootstrap(&Config::default(), Some(Arc::new(RedisSecretStore)));
    let creds = online
        .lookup("redis")
        .unwrap()
        .extract_credentials(Some(&notes))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(creds.get("redis-password"), Some("s3cr3t"));

    let offline = bootstrap(&Config::default(), None);
    let creds = offline
        .lookup("redis")
        .unwrap()
        .extract_credentials(Some(&notes))
        .await
        .unwrap()
        .unwrap();
    assert!(!creds.contains("redis-password"));
    assert_eq!(creds.get("port"), Some("6379"));
}

#[tokio::test]
async fn test_host_registers_additional_chart() {
    let mut registry = bootstrap(&Config::default(), None);
    registry.register(memcached()).unwrap();

    assert_eq!(
        registry.charts(),
        vec!["memcached", "mongodb", "prometheus", "redis"]
    );

    let notes = StatusNotes::from(vec!["  cache.default.svc.cluster.local"]);
    let creds = registry
        .lookup("memcached")
        .unwrap()
        .extract_credentials(Some(&notes))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(creds.get("host"), Some("cache.default.svc.cluster.local"));
    assert_eq!(creds.get("port"), Some("11211"));
}

#[test]
fn test_registering_a_builtin_chart_twice_is_a_conflict() {
    let mut registry = bootstrap(&Config::default(), None);
    let redis = registry.get("redis").unwrap();

    let err = registry.register(redis).unwrap_err();
    assert!(matches!(err, RegistryError::Conflict(ref chart) if chart == "redis"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_unknown_chart() {
    let registry = bootstrap(&Config::default(), None);
    assert!(registry.get("postgresql").is_none());
    assert!(matches!(
        registry.lookup("postgresql"),
        Err(RegistryError::NotFound(_))
    ));
}

#[test]
fn test_bootstrap_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "defaultNamespace: brokered\n").unwrap();

    let config = ConfigLoader::load_file(&config_path).unwrap();
    assert_eq!(config.default_namespace, "brokered");
    assert_eq!(bootstrap(&config, None).len(), 3);
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExtractorRegistry>();

    let registry = ExtractorRegistry::with_builtin(SecretResolver::detached());
    let shared = registry.clone();
    assert_eq!(shared.charts(), registry.charts());
}
