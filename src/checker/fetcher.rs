use super::VulnerabilitySource;
use crate::cache::VulnerabilityCache;
use crate::model::VulnerabilityPayload;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Looks up one identifier at a time, consulting the cache first.
///
/// A failed lookup never surfaces as an error: it is logged and the
/// identifier resolves to an empty payload, which is cached like any other
/// result.
#[derive(Clone)]
pub struct VulnerabilityFetcher {
    source: Arc<dyn VulnerabilitySource>,
    cache: Arc<VulnerabilityCache>,
}

impl VulnerabilityFetcher {
    pub fn new(source: Arc<dyn VulnerabilitySource>, cache: Arc<VulnerabilityCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &VulnerabilityCache {
        &self.cache
    }

    pub async fn fetch(&self, identifier: &str) -> VulnerabilityPayload {
        self.fetch_at(identifier, Instant::now()).await
    }

    /// Fetches as if the current time were `now`.
    pub async fn fetch_at(&self, identifier: &str, now: Instant) -> VulnerabilityPayload {
        if let Some(cached) = self.cache.get(identifier, now) {
            debug!(identifier, "vulnerability cache hit");
            return cached;
        }

        debug!(identifier, source = self.source.name(), "vulnerability cache miss");

        let payload = match self.source.query(identifier).await {
            Ok(mut payload) => {
                payload.normalize_scores();
                payload
            }
            Err(e) => {
                warn!(identifier, error = %e, "vulnerability lookup failed, assuming no known vulnerabilities");
                VulnerabilityPayload::empty()
            }
        };

        self.cache.put(identifier, payload.clone(), now);
        payload
    }
}
