use super::VulnerabilityFetcher;
use crate::model::VulnerabilityPayload;
use futures::future::join_all;
use std::collections::HashMap;
use tracing::debug;

/// Resolves a batch of identifiers concurrently.
///
/// Every lookup in a batch is started without waiting for the others and
/// the batch completes once all of them have. Duplicate identifiers are not
/// collapsed before fetching.
#[derive(Clone)]
pub struct BatchResolver {
    fetcher: VulnerabilityFetcher,
}

impl BatchResolver {
    pub fn new(fetcher: VulnerabilityFetcher) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &VulnerabilityFetcher {
        &self.fetcher
    }

    /// Returns the payload for every identifier in `identifiers`.
    ///
    /// The fetcher never fails, so the result holds one entry per distinct
    /// identifier. For duplicates, the last result in input order is kept.
    pub async fn resolve(&self, identifiers: &[String]) -> HashMap<String, VulnerabilityPayload> {
        debug!(count = identifiers.len(), "resolving dependency batch");

        let futures = identifiers.iter().map(|identifier| async move {
            let payload = self.fetcher.fetch(identifier).await;
            (identifier.clone(), payload)
        });

        join_all(futures).await.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::VulnerabilityCache;
    use crate::checker::testing::ScriptedSource;
    use crate::model::VulnerabilityRecord;
    use std::sync::Arc;
    use std::time::Duration;

    fn resolver_with(source: Arc<ScriptedSource>) -> BatchResolver {
        BatchResolver::new(VulnerabilityFetcher::new(
            source,
            Arc::new(VulnerabilityCache::new()),
        ))
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_resolve_empty_batch() {
        let source = Arc::new(ScriptedSource::new());
        let resolver = resolver_with(Arc::clone(&source));

        let results = resolver.resolve(&[]).await;

        assert!(results.is_empty());
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_resolve_isolates_failures() {
        let source = Arc::new(
            ScriptedSource::new()
                .with("flask", vec![VulnerabilityRecord::new("PYSEC-1", 7.5)])
                .with("jinja2", vec![VulnerabilityRecord::new("GHSA-2", "5.0")])
                .failing("requests"),
        );
        let resolver = resolver_with(Arc::clone(&source));

        let results = resolver
            .resolve(&ids(&["flask", "requests", "jinja2", "six"]))
            .await;

        assert_eq!(results.len(), 4);
        assert!(results["requests"].is_empty());
        assert_eq!(results["flask"].vulns[0].id, "PYSEC-1");
        assert_eq!(results["jinja2"].vulns.len(), 1);
        assert!(results["six"].is_empty());
        assert_eq!(source.calls("requests"), 1);
    }

    #[tokio::test]
    async fn test_resolve_runs_concurrently() {
        let source = Arc::new(ScriptedSource::new().with_delay(Duration::from_millis(50)));
        let resolver = resolver_with(Arc::clone(&source));

        let results = resolver.resolve(&ids(&["a", "b", "c", "d", "e"])).await;

        assert_eq!(results.len(), 5);
        assert_eq!(source.max_in_flight(), 5);
    }

    #[tokio::test]
    async fn test_resolve_duplicates() {
        let source = Arc::new(
            ScriptedSource::new().with("flask", vec![VulnerabilityRecord::new("PYSEC-1", 7.5)]),
        );
        let resolver = resolver_with(Arc::clone(&source));

        let results = resolver.resolve(&ids(&["flask", "flask"])).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results["flask"].vulns.len(), 1);
        assert!((1..=2).contains(&source.calls("flask")));
    }

    #[tokio::test]
    async fn test_resolve_uses_cache_across_batches() {
        let source = Arc::new(ScriptedSource::new());
        let resolver = resolver_with(Arc::clone(&source));

        resolver.resolve(&ids(&["flask", "requests"])).await;
        resolver.resolve(&ids(&["flask", "django"])).await;

        assert_eq!(source.calls("flask"), 1);
        assert_eq!(source.calls("django"), 1);
        assert_eq!(source.total_calls(), 3);
    }
}
