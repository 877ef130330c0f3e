//! Redis chart extractor
//!
//! The chart prints the master's in-cluster DNS name and a shell snippet that
//! reads the password out of a secret. Both are looked for independently; the
//! snippet is resolved against the secret store rather than executed.

use super::rules::{FieldBinding, PatternRule, SecretRefGroups};
use super::{CredentialsExtractor, ExtractionResult, RuleExtractor};
use crate::credentials::{Credentials, fields};
use crate::notes::StatusNotes;
use crate::secret::SecretResolver;
use async_trait::async_trait;
use regex::Regex;

/// Chart identity
pub const CHART: &str = "redis";

/// The chart hardcodes the service port
pub const DEFAULT_PORT: &str = "6379";

// Line ends tolerate a trailing carriage return left over from CRLF text.
const HOSTNAME_PATTERN: &str = r"(\S+\.svc\.cluster\.local)\r?$";

// The unescaped `|` is an alternation: a line ending in ` base64 --decode)`
// also counts as a match, with no secret reference.
const GET_SECRET_PATTERN: &str = r#"kubectl get secret --namespace (\S+) (\S+) -o jsonpath="\{\.data\.([^}]+)\}" | base64 --decode\)\r?$"#;

/// Extracts the Redis host and resolves the password secret
#[derive(Debug, Clone)]
pub struct RedisExtractor {
    inner: RuleExtractor,
}

impl RedisExtractor {
    pub fn new(resolver: SecretResolver) -> Self {
        let hostname_rule = PatternRule::fields(
            "hostname",
            Regex::new(HOSTNAME_PATTERN).expect("valid regex"),
            vec![
                FieldBinding::new(1, fields::HOST),
                FieldBinding::new(1, fields::HOSTNAME),
            ],
        );
        let secret_rule = PatternRule::secret_ref(
            "get-secret",
            Regex::new(GET_SECRET_PATTERN).expect("valid regex"),
            SecretRefGroups {
                namespace: 1,
                name: 2,
                key: 3,
            },
        );

        Self {
            inner: RuleExtractor::new(CHART, vec![hostname_rule, secret_rule], resolver)
                .with_default(fields::PORT, DEFAULT_PORT),
        }
    }
}

#[async_trait]
impl CredentialsExtractor for RedisExtractor {
    fn chart(&self) -> &str {
        CHART
    }

    async fn extract_credentials(
        &self,
        notes: Option<&StatusNotes>,
    ) -> ExtractionResult<Option<Credentials>> {
        self.inner.extract_credentials(notes).await
    }
}
