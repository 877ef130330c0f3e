//! Prometheus chart extractor
//!
//! The chart announces the server port on one line and prints the in-cluster
//! DNS name on the line right after it. The host is taken by position, not by
//! pattern, so extraction runs as a small state machine over the lines.

use super::{CredentialsExtractor, ExtractionResult, scannable};
use crate::credentials::{Credentials, fields};
use crate::notes::StatusNotes;
use async_trait::async_trait;
use regex::Regex;
use std::ops::ControlFlow;

/// Chart identity
pub const CHART: &str = "prometheus";

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
const PORT_PATTERN: &str = r"The Prometheus server can be accessed via port ([0-9]+) on the following DNS name from within your cluster";

/// Position in the port-then-host line sequence
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    AwaitingPort,
    /// Port found; the next line is the host, whatever it contains
    AwaitingHost { port: String },
    Done { port: String, host: Option<String> },
}

impl ScanState {
    fn advance(self, line: Option<&str>, port_pattern: &Regex) -> Self {
        match self {
            ScanState::AwaitingPort => line
                .and_then(|line| port_pattern.captures(line))
                .and_then(|caps| caps.get(1))
                .map(|port| ScanState::AwaitingHost {
                    port: port.as_str().to_string(),
                })
                .unwrap_or(ScanState::AwaitingPort),
            ScanState::AwaitingHost { port } => ScanState::Done {
                port,
                host: line.map(str::to_string),
            },
            done @ ScanState::Done { .. } => done,
        }
    }

    fn into_credentials(self) -> Credentials {
        let mut credentials = Credentials::new();
        match self {
            ScanState::AwaitingPort => {}
            ScanState::AwaitingHost { port } => {
                credentials.insert(fields::PORT, port);
            }
            ScanState::Done { port, host } => {
                credentials.insert(fields::PORT, port);
                if let Some(host) = host {
                    credentials.set_host(&host);
                }
            }
        }
        credentials
    }
}

/// Extracts the server port and DNS name from the Prometheus chart's notes
#[derive(Debug, Clone)]
pub struct PrometheusExtractor {
    port_pattern: Regex,
}

impl PrometheusExtractor {
    pub fn new() -> Self {
        Self {
            port_pattern: Regex::new(PORT_PATTERN).expect("valid regex"),
        }
    }

    fn scan(&self, notes: &StatusNotes) -> ScanState {
        let flow = notes
            .lines()
            .try_fold(ScanState::AwaitingPort, |state, line| {
                match state.advance(line, &self.port_pattern) {
                    done @ ScanState::Done { .. } => ControlFlow::Break(done),
                    pending => ControlFlow::Continue(pending),
                }
            });

        match flow {
            ControlFlow::Break(state) | ControlFlow::Continue(state) => state,
        }
    }
}

impl Default for PrometheusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsExtractor for PrometheusExtractor {
    fn chart(&self) -> &str {
        CHART
    }

    async fn extract_credentials(
        &self,
        notes: Option<&StatusNotes>,
    ) -> ExtractionResult<Option<Credentials>> {
        let Some(notes) = scannable(notes) else {
            return Ok(None);
        };

        let state = self.scan(notes);
        tracing::debug!("Chart {}: scan finished in {:?}", CHART, state);
        Ok(Some(state.into_credentials()))
    }
}
