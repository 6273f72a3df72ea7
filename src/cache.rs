//! In-memory caching for vulnerability lookups.
//!
//! This module provides a process-lifetime cache with TTL (time-to-live)
//! support, keyed by dependency identifier. It is used by the fetcher to
//! avoid querying the vulnerability source again for a dependency that was
//! looked up recently.
//!
//! Entries are never deleted. An entry older than the TTL is treated as
//! missing and is overwritten by the next fetch.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vulntrack::{VulnerabilityCache, VulnerabilityPayload};
//!
//! let cache = VulnerabilityCache::with_ttl(Duration::from_secs(60));
//! let now = Instant::now();
//!
//! cache.put("flask", VulnerabilityPayload::empty(), now);
//! assert!(cache.get("flask", now).is_some());
//! assert!(cache.get("flask", now + Duration::from_secs(60)).is_none());
//! ```

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::model::VulnerabilityPayload;

/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

struct CacheEntry {
    payload: VulnerabilityPayload,
    fetched_at: Instant,
}

/// A concurrent in-memory cache with TTL support.
///
/// Safe to share between concurrent fetches. Two fetches that miss on the
/// same identifier at the same time will both store their result; the
/// later write wins.
pub struct VulnerabilityCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl VulnerabilityCache {
    /// Creates a new cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    /// Creates a new cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Retrieves the payload for `identifier` if it was stored less than one
    /// TTL before `now`.
    ///
    /// Returns `None` if the identifier was never stored or the entry is stale.
    pub fn get(&self, identifier: &str, now: Instant) -> Option<VulnerabilityPayload> {
        let entry = self.entries.get(identifier)?;

        if now.saturating_duration_since(entry.fetched_at) < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores a payload, overwriting any previous entry for the identifier.
    pub fn put(&self, identifier: &str, payload: VulnerabilityPayload, now: Instant) {
        self.entries.insert(
            identifier.to_string(),
            CacheEntry {
                payload,
                fetched_at: now,
            },
        );
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VulnerabilityCache {
    fn default() -> Self {
        Self::new()
    }
}
