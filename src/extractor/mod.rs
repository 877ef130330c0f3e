// Credential extractors
//
// Each supported chart gets an extractor that turns the chart's release notes
// into connection credentials. Extractors are stateless after construction and
// shared across concurrent extraction calls.

pub mod mongodb;
pub mod prometheus;
pub mod redis;
pub mod rule_based;
pub mod rules;

pub use mongodb::MongoDbExtractor;
pub use prometheus::PrometheusExtractor;
pub use redis::RedisExtractor;
pub use rule_based::RuleExtractor;
pub use rules::{FieldBinding, PatternRule, RuleAction, RuleHit, RuleSet, SecretRefGroups};

use crate::credentials::Credentials;
use crate::notes::StatusNotes;
use crate::secret::StoreError;
use async_trait::async_trait;

/// Extraction errors
///
/// Pattern misses and unresolvable secret references are not errors; they
/// leave the affected fields out of the record.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to read secret {namespace}/{name}")]
    SecretStore {
        namespace: String,
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Chart '{chart}': required rule '{rule}' matched no line")]
    RequiredRuleMissed { chart: String, rule: String },
}

/// Result type for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Extracts credentials from one chart's release notes
#[async_trait]
pub trait CredentialsExtractor: Send + Sync {
    /// Chart identity this extractor handles (e.g. "redis")
    fn chart(&self) -> &str;

    /// Extract credentials from release notes
    ///
    /// Returns `Ok(None)` when the notes are absent or contain no lines.
    async fn extract_credentials(
        &self,
        notes: Option<&StatusNotes>,
    ) -> ExtractionResult<Option<Credentials>>;
}

/// Notes worth scanning: present and non-empty
fn scannable(notes: Option<&StatusNotes>) -> Option<&StatusNotes> {
    notes.filter(|notes| !notes.is_empty())
}
