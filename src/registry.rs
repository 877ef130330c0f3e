//! Extractor registry
//!
//! Maps chart identities to the extractor responsible for them. The registry is
//! filled by explicit registration at startup and read concurrently afterwards.

use crate::config::Config;
use crate::extractor::{CredentialsExtractor, MongoDbExtractor, PrometheusExtractor, RedisExtractor};
use crate::secret::{SecretResolver, SecretStore};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("No credentials extractor registered for chart '{0}'")]
    NotFound(String),

    #[error("A credentials extractor is already registered for chart '{0}'")]
    Conflict(String),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry of credential extractors keyed by chart identity
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn CredentialsExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in mongodb, prometheus and redis extractors
    pub fn with_builtin(resolver: SecretResolver) -> Self {
        let mut registry = Self::new();
        registry.register_builtin(resolver);
        registry
    }

    fn register_builtin(&mut self, resolver: SecretResolver) {
        let builtin: [Arc<dyn CredentialsExtractor>; 3] = [
            Arc::new(MongoDbExtractor::new()),
            Arc::new(PrometheusExtractor::new()),
            Arc::new(RedisExtractor::new(resolver)),
        ];
        for extractor in builtin {
            self.extractors
                .insert(extractor.chart().to_string(), extractor);
        }
    }

    /// Register an extractor under the chart identity it reports
    pub fn register(&mut self, extractor: Arc<dyn CredentialsExtractor>) -> RegistryResult<()> {
        let chart = extractor.chart().to_string();
        if self.extractors.contains_key(&chart) {
            return Err(RegistryError::Conflict(chart));
        }
        tracing::debug!("Registered credentials extractor for chart '{}'", chart);
        self.extractors.insert(chart, extractor);
        Ok(())
    }

    /// Get the extractor for a chart
    pub fn get(&self, chart: &str) -> Option<Arc<dyn CredentialsExtractor>> {
        self.extractors.get(chart).cloned()
    }

    /// Get the extractor for a chart, failing when none is registered
    pub fn lookup(&self, chart: &str) -> RegistryResult<Arc<dyn CredentialsExtractor>> {
        self.get(chart)
            .ok_or_else(|| RegistryError::NotFound(chart.to_string()))
    }

    /// Check if a chart has an extractor
    pub fn contains(&self, chart: &str) -> bool {
        self.extractors.contains_key(chart)
    }

    /// Registered chart identities, sorted
    pub fn charts(&self) -> Vec<String> {
        let mut charts: Vec<String> = self.extractors.keys().cloned().collect();
        charts.sort();
        charts
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Remove the extractor for a chart
    pub fn remove(&mut self, chart: &str) -> RegistryResult<Arc<dyn CredentialsExtractor>> {
        self.extractors
            .remove(chart)
            .ok_or_else(|| RegistryError::NotFound(chart.to_string()))
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("charts", &self.charts())
            .finish()
    }
}

/// Build the built-in registry for a configuration
///
/// Secret references without a namespace resolve in the configured default
/// namespace. Without a store every secret reference resolves to nothing.
pub fn bootstrap(config: &Config, store: Option<Arc<dyn SecretStore>>) -> ExtractorRegistry {
    let resolver =
        SecretResolver::from_store(store).with_default_namespace(&config.default_namespace);
    let registry = ExtractorRegistry::with_builtin(resolver);

    tracing::debug!("Extractor registry ready: {:?}", registry.charts());
    registry
}
