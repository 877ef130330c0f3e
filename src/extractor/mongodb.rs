//! MongoDB chart extractor
//!
//! The chart's notes show a `kubectl run` command starting a mongo client
//! against the service, optionally passing the root password with `-p`.

use super::rules::{FieldBinding, PatternRule};
use super::{CredentialsExtractor, ExtractionResult, RuleExtractor};
use crate::credentials::{Credentials, fields};
use crate::notes::StatusNotes;
use crate::secret::SecretResolver;
use async_trait::async_trait;
use regex::Regex;

/// Chart identity
pub const CHART: &str = "mongodb";

/// The chart hardcodes the service port
pub const DEFAULT_PORT: &str = "27017";

// The password stops at a carriage return, like a line-bounded `.` would.
const CLIENT_PATTERN: &str = r"\s*kubectl run .+ --host (\S+)(\s+-p\s+([^\r]+))?";

/// Extracts host and password from the MongoDB chart's client command
#[derive(Debug, Clone)]
pub struct MongoDbExtractor {
    inner: RuleExtractor,
}

impl MongoDbExtractor {
    pub fn new() -> Self {
        let client_rule = PatternRule::fields(
            "client-command",
            Regex::new(CLIENT_PATTERN).expect("valid regex"),
            vec![
                FieldBinding::new(1, fields::HOST),
                FieldBinding::new(1, fields::HOSTNAME),
                FieldBinding::new(3, fields::PASSWORD),
            ],
        );

        Self {
            inner: RuleExtractor::new(CHART, vec![client_rule], SecretResolver::detached())
                .with_default(fields::PORT, DEFAULT_PORT),
        }
    }
}

impl Default for MongoDbExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsExtractor for MongoDbExtractor {
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

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(lines: Vec<&str>) -> Credentials {
        MongoDbExtractor::new()
            .extract_credentials(Some(&StatusNotes::from(lines)))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_host_and_password() {
        let creds = extract(vec!["kubectl run x --host myhost -p secretpw"]).await;
        let expected: Credentials = [
            ("host", "myhost"),
            ("hostname", "myhost"),
            ("password", "secretpw"),
            ("port", "27017"),
        ]
        .into_iter()
        .collect();
        assert_eq!(creds, expected);
    }

    #[tokio::test]
    async fn test_without_password_clause() {
        let creds = extract(vec![
            "    kubectl run my-mongo-client --rm --tty -i --image bitnami/mongodb --command -- mongo admin --host my-mongo-mongodb",
        ])
        .await;
        assert_eq!(creds.get(fields::HOST), Some("my-mongo-mongodb"));
        assert_eq!(creds.get(fields::HOSTNAME), Some("my-mongo-mongodb"));
        assert!(!creds.contains(fields::PASSWORD));
        assert_eq!(creds.get(fields::PORT), Some(DEFAULT_PORT));
    }

    #[tokio::test]
    async fn test_stops_at_first_match() {
        let creds = extract(vec![
            "To connect to your database run the following command:",
            "kubectl run a --host first",
            "kubectl run b --host second -p other",
        ])
        .await;
        assert_eq!(creds.get(fields::HOST), Some("first"));
        assert!(!creds.contains(fields::PASSWORD));
    }

    #[tokio::test]
    async fn test_password_excludes_carriage_return() {
        let creds = extract(vec!["kubectl run x --host myhost -p secretpw\r"]).await;
        assert_eq!(creds.get(fields::HOST), Some("myhost"));
        assert_eq!(creds.get(fields::PASSWORD), Some("secretpw"));
    }

    #[tokio::test]
    async fn test_no_match_keeps_port() {
        let creds = extract(vec!["MongoDB can be accessed via port 27017"]).await;
        assert_eq!(creds.len(), 1);
        assert_eq!(creds.get(fields::PORT), Some(DEFAULT_PORT));
    }

    #[tokio::test]
    async fn test_missing_lines_are_skipped() {
        let notes = StatusNotes::new(vec![None, Some("kubectl run x --host h".to_string())]);
        let creds = MongoDbExtractor::new()
            .extract_credentials(Some(&notes))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.get(fields::HOST), Some("h"));
    }
}
