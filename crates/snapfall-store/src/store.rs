//! Cache-first snapshot store using moka
//!
//! Entries are inserted on the first successful load and never invalidated.
//! Failed loads are never cached, so a fixture added later is picked up by
//! the next call.

use crate::error::LoadError;
use crate::source::FixtureSource;
use futures::future::join_all;
use moka::future::Cache;
use serde_json::Value;
use snapfall_resolver::SnapshotId;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Recorded response, shared between every reader of the same id
pub type SnapshotPayload = Arc<Value>;

/// Store tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Upper bound for a single source load
    pub load_timeout: Duration,
    /// Cache capacity; keep above the fixture count so nothing is evicted
    pub max_capacity: u64,
}

impl StoreOptions {
    /// With load timeout
    #[inline]
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(2),
            max_capacity: 256,
        }
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of cached snapshots
    pub entry_count: u64,
    /// Lookups served from cache
    pub hits: u64,
    /// Lookups that went to the source
    pub misses: u64,
    /// Source loads that failed or timed out
    pub load_failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    load_failures: AtomicU64,
}

/// Snapshot store
///
/// Cheap to clone; clones share the cache and the source. Construct one per
/// composition root (or per test) rather than keeping a global.
///
/// Concurrent misses for the same id may load it more than once. Payloads
/// for an id are immutable, so the last insert wins harmlessly.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    source: Arc<dyn FixtureSource>,
    cache: Cache<SnapshotId, SnapshotPayload>,
    load_timeout: Duration,
    counters: Arc<Counters>,
}

impl SnapshotStore {
    /// Create store with default options
    #[must_use]
    pub fn new(source: impl FixtureSource) -> Self {
        Self::with_options(source, StoreOptions::default())
    }

    /// Create store with explicit options
    #[must_use]
    pub fn with_options(source: impl FixtureSource, options: StoreOptions) -> Self {
        Self::from_shared(Arc::new(source), options)
    }

    /// Create store over an already shared source
    #[must_use]
    pub fn from_shared(source: Arc<dyn FixtureSource>, options: StoreOptions) -> Self {
        Self {
            source,
            cache: Cache::new(options.max_capacity),
            load_timeout: options.load_timeout,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Get snapshot, loading it on first use
    ///
    /// Returns `None` for any load failure; the error is logged, never
    /// propagated, and never cached.
    pub async fn get(&self, id: &SnapshotId) -> Option<SnapshotPayload> {
        match self.try_get(id).await {
            Ok(payload) => Some(payload),
            Err(e) if e.is_not_found() => {
                tracing::debug!("snapshot unavailable: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("snapshot load failed: {}", e);
                None
            }
        }
    }

    /// Get snapshot, reporting why a load failed
    ///
    /// # Errors
    /// - `LoadError::InvalidName` if `id` is not a plain `*.json` name
    /// - `LoadError::TimedOut` if the source exceeds the load bound
    /// - any error returned by the source
    pub async fn try_get(&self, id: &SnapshotId) -> Result<SnapshotPayload, LoadError> {
        if !id.is_fixture_name() {
            return Err(LoadError::InvalidName(id.clone()));
        }

        if let Some(cached) = self.cache.get(id).await {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("snapshot cache hit: {}", id);
            return Ok(cached);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        match self.load(id).await {
            Ok(value) => {
                let payload = Arc::new(value);
                self.cache.insert(id.clone(), Arc::clone(&payload)).await;
                tracing::debug!("snapshot loaded from {}: {}", self.source.describe(), id);
                Ok(payload)
            }
            Err(e) => {
                self.counters.load_failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Check if a snapshot is cached or present in the source
    ///
    /// Uses the source's existence probe; does not populate the cache.
    pub async fn has(&self, id: &SnapshotId) -> bool {
        if !id.is_fixture_name() {
            return false;
        }
        if self.cache.contains_key(id) {
            return true;
        }
        tokio::time::timeout(self.load_timeout, self.source.exists(id))
            .await
            .unwrap_or(false)
    }

    /// Warm the cache with `ids`
    ///
    /// Every id is attempted independently; failures are skipped. Returns how
    /// many distinct ids are cached afterwards, earlier hits included.
    pub async fn preload<'a, I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a SnapshotId>,
    {
        let mut seen = HashSet::new();
        let distinct: Vec<_> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        let requested = distinct.len();

        let loaded = join_all(distinct.into_iter().map(|id| self.get(id)))
            .await
            .into_iter()
            .filter(Option::is_some)
            .count();

        tracing::info!("Preloaded {}/{} snapshots", loaded, requested);
        loaded
    }

    /// Check if `id` is cached, without touching the source
    #[inline]
    #[must_use]
    pub fn is_cached(&self, id: &SnapshotId) -> bool {
        self.cache.contains_key(id)
    }

    /// Get store statistics
    pub async fn stats(&self) -> StoreStats {
        self.cache.run_pending_tasks().await;
        StoreStats {
            entry_count: self.cache.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            load_failures: self.counters.load_failures.load(Ordering::Relaxed),
        }
    }

    /// Backing source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &dyn FixtureSource {
        self.source.as_ref()
    }

    async fn load(&self, id: &SnapshotId) -> Result<Value, LoadError> {
        tokio::time::timeout(self.load_timeout, self.source.load(id))
            .await
            .unwrap_or_else(|_| {
                Err(LoadError::TimedOut {
                    id: id.clone(),
                    timeout_ms: u64::try_from(self.load_timeout.as_millis()).unwrap_or(u64::MAX),
                })
            })
    }
}
