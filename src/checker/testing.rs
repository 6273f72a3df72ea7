//! In-process vulnerability source for unit tests.

use super::VulnerabilitySource;
use crate::error::FetchError;
use crate::model::{VulnerabilityPayload, VulnerabilityRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Answers queries from a fixed script and counts calls per identifier.
///
/// Unscripted identifiers have no vulnerabilities.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    records: HashMap<String, Vec<VulnerabilityRecord>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: DashMap<String, usize>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, identifier: &str, records: Vec<VulnerabilityRecord>) -> Self {
        self.records.insert(identifier.to_string(), records);
        self
    }

    pub(crate) fn failing(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self, identifier: &str) -> usize {
        self.calls.get(identifier).map(|c| *c).unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VulnerabilitySource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn query(&self, identifier: &str) -> Result<VulnerabilityPayload, FetchError> {
        *self.calls.entry(identifier.to_string()).or_insert(0) += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(identifier) {
            return Err(FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }

        Ok(VulnerabilityPayload {
            vulns: self.records.get(identifier).cloned().unwrap_or_default(),
            ..Default::default()
        })
    }
}
