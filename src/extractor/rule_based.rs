//! Rule-driven extractor
//!
//! Seeds fixed fields, scans the notes with a [`RuleSet`], then resolves any
//! secret references the scan found. The MongoDB and Redis extractors and any
//! rule-based chart a host registers in code run on this.

use super::rules::{PatternRule, RuleHit, RuleSet};
use super::{CredentialsExtractor, ExtractionError, ExtractionResult, scannable};
use crate::credentials::Credentials;
use crate::notes::StatusNotes;
use crate::secret::SecretResolver;
use async_trait::async_trait;

/// Extractor applying an ordered set of pattern rules
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    chart: String,
    defaults: Vec<(String, String)>,
    rules: RuleSet,
    resolver: SecretResolver,
}

impl RuleExtractor {
    pub fn new(chart: impl Into<String>, rules: Vec<PatternRule>, resolver: SecretResolver) -> Self {
        Self {
            chart: chart.into(),
            defaults: Vec::new(),
            rules: RuleSet::new(rules),
            resolver,
        }
    }

    /// Seed a field before scanning; rule hits may overwrite it
    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.push((field.into(), value.into()));
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    pub fn resolver(&self) -> &SecretResolver {
        &self.resolver
    }

    async fn extract(&self, notes: &StatusNotes) -> ExtractionResult<Credentials> {
        let mut credentials: Credentials = self.defaults.iter().cloned().collect();

        let outcome = self.rules.scan(notes.lines());
        if let Some(rule) = outcome.first_required_miss() {
            return Err(ExtractionError::RequiredRuleMissed {
                chart: self.chart.clone(),
                rule: rule.name().to_string(),
            });
        }

        for (rule, hit) in outcome.into_hits() {
            match hit {
                RuleHit::Fields(values) => {
                    for (field, value) in values {
                        credentials.insert(field, value);
                    }
                }
                RuleHit::Secret(Some(reference)) => {
                    match self.resolver.resolve_text(&reference).await? {
                        Some(value) => credentials.insert(reference.key, value),
                        None => tracing::debug!(
                            "Chart {}: secret reference from rule '{}' resolved to nothing",
                            self.chart,
                            rule.name()
                        ),
                    }
                }
                RuleHit::Secret(None) => {
                    tracing::debug!(
                        "Chart {}: rule '{}' matched without a usable secret reference",
                        self.chart,
                        rule.name()
                    );
                }
            }
        }

        Ok(credentials)
    }
}

#[async_trait]
impl CredentialsExtractor for RuleExtractor {
    fn chart(&self) -> &str {
        &self.chart
    }

    async fn extract_credentials(
        &self,
        notes: Option<&StatusNotes>,
    ) -> ExtractionResult<Option<Credentials>> {
        let Some(notes) = scannable(notes) else {
            tracing::debug!("Chart {}: no release notes to extract from", self.chart);
            return Ok(None);
        };
        self.extract(notes).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::rules::FieldBinding;
    use regex::Regex;

    fn extractor() -> RuleExtractor {
        RuleExtractor::new(
            "memcached",
            vec![
                PatternRule::fields(
                    "host",
                    Regex::new(r"(\S+\.svc\.cluster\.local):(\d+)").unwrap(),
                    vec![
                        FieldBinding::new(1, "host"),
                        FieldBinding::new(1, "hostname"),
                        FieldBinding::new(2, "port"),
                    ],
                ),
                PatternRule::fields(
                    "user",
                    Regex::new(r"username: (\S+)").unwrap(),
                    vec![FieldBinding::new(1, "username")],
                )
                .required(true),
            ],
            SecretResolver::detached(),
        )
        .with_default("port", "11211")
    }

    #[tokio::test]
    async fn test_hits_overwrite_defaults() {
        let notes = StatusNotes::from(vec![
            "  cache.default.svc.cluster.local:11311",
            "  username: admin",
        ]);
        let creds = extractor()
            .extract_credentials(Some(&notes))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(creds.get("port"), Some("11311"));
        assert_eq!(creds.get("host"), Some("cache.default.svc.cluster.local"));
        assert_eq!(creds.get("username"), Some("admin"));
    }

    #[tokio::test]
    async fn test_required_rule_miss_is_an_error() {
        let notes = StatusNotes::from(vec!["cache.default.svc.cluster.local:11211"]);
        let err = extractor()
            .extract_credentials(Some(&notes))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExtractionError::RequiredRuleMissed { ref chart, ref rule }
                if chart == "memcached" && rule == "user"
        ));
    }

    #[tokio::test]
    async fn test_absent_notes_skip_required_check() {
        let extractor = extractor();
        assert!(extractor.extract_credentials(None).await.unwrap().is_none());
        assert!(
            extractor
                .extract_credentials(Some(&StatusNotes::default()))
                .await
                .unwrap()
                .is_none()
        );
    }
}
