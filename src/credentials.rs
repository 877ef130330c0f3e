//! Credential records
//!
//! The normalized output of an extraction: a flat map of connection field names
//! to string values, serialized as a plain JSON object for the service broker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known credential field names
pub mod fields {
    pub const HOST: &str = "host";
    pub const HOSTNAME: &str = "hostname";
    pub const PORT: &str = "port";
    pub const PASSWORD: &str = "password";
}

/// Connection credentials extracted for one release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Set `host` and `hostname` to the same value
    pub fn set_host(&mut self, host: &str) {
        self.insert(fields::HOST, host);
        self.insert(fields::HOSTNAME, host);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
