//! Live-then-snapshot fallback client
//!
//! The live HTTP call stays with the caller; this client decides when to
//! make it and what to serve when it fails.

use crate::config::SnapshotConfig;
use serde_json::Value;
use snapfall_resolver::{ModeFlag, RequestDescriptor, Resolver, SnapshotId, StableMode};
use snapfall_store::{DirectorySource, SnapshotPayload, SnapshotStore};
use std::fmt::Display;
use std::future::Future;

/// What was served for one request
#[derive(Debug, Clone)]
pub enum Served<E> {
    /// Fresh response from the backend
    Live(Value),
    /// Recorded response
    Snapshot {
        /// Fixture that was served
        id: SnapshotId,
        /// Its content
        payload: SnapshotPayload,
    },
    /// Live call failed and no snapshot could be served
    Unavailable(E),
}

impl<E> Served<E> {
    /// Check if the response came from a snapshot
    #[inline]
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot { .. })
    }

    /// Check if anything was served
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable(_))
    }

    /// Served JSON, `None` when unavailable
    ///
    /// Callers render `None` as an empty state.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Live(value) => Some(value),
            Self::Snapshot { payload, .. } => Some((*payload).clone()),
            Self::Unavailable(_) => None,
        }
    }
}

/// Resolver plus store, wired from one config
#[derive(Debug, Clone)]
pub struct SnapshotFallback {
    resolver: Resolver,
    store: SnapshotStore,
    mode_flag: ModeFlag,
    preload: Vec<SnapshotId>,
}

impl SnapshotFallback {
    /// Wire the standard resolver and a directory store from `config`
    #[must_use]
    pub fn new(config: &SnapshotConfig) -> Self {
        let store = SnapshotStore::with_options(
            DirectorySource::new(&config.fixture_dir),
            config.store_options(),
        );
        Self::with_parts(Resolver::standard(), store, config)
    }

    /// Wire explicit parts; `config` supplies mode flag and preload list
    #[must_use]
    pub fn with_parts(resolver: Resolver, store: SnapshotStore, config: &SnapshotConfig) -> Self {
        Self {
            resolver,
            store,
            mode_flag: config.mode_flag.clone(),
            preload: config.preload.clone(),
        }
    }

    /// Stable mode for a page query string
    #[inline]
    #[must_use]
    pub fn mode_for(&self, page_query: &str) -> StableMode {
        StableMode::from_query(page_query, &self.mode_flag)
    }

    /// Warm the store with the configured preload list
    pub async fn warm_up(&self) -> usize {
        tracing::info!("Preloading snapshots from {}", self.store.source().describe());
        self.store.preload(&self.preload).await
    }

    /// Recorded response for `request`, if one resolves and loads
    pub async fn snapshot(
        &self,
        request: &RequestDescriptor,
    ) -> Option<(SnapshotId, SnapshotPayload)> {
        let Some(id) = self.resolver.resolve(request) else {
            tracing::debug!("no snapshot defined for {}", request);
            return None;
        };
        let payload = self.store.get(&id).await?;
        Some((id, payload))
    }

    /// Serve `request`
    ///
    /// - Stable mode on: the snapshot if available, else the live call.
    /// - Stable mode off: the live call; on failure, the snapshot.
    ///
    /// Snapshot failures never fail the request; if both sides fail the
    /// live error is returned in [`Served::Unavailable`].
    pub async fn fetch<F, Fut, E>(
        &self,
        request: &RequestDescriptor,
        mode: StableMode,
        live: F,
    ) -> Served<E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
        E: Display,
    {
        if mode.is_on() {
            if let Some((id, payload)) = self.snapshot(request).await {
                tracing::debug!("stable mode: serving {} for {}", id, request);
                return Served::Snapshot { id, payload };
            }
        }

        let error = match live().await {
            Ok(value) => return Served::Live(value),
            Err(e) => e,
        };
        tracing::warn!("live request {} failed: {}", request, error);

        // Stable mode already tried the snapshot.
        if !mode.is_on() {
            if let Some((id, payload)) = self.snapshot(request).await {
                tracing::info!("serving snapshot {} for {}", id, request);
                return Served::Snapshot { id, payload };
            }
        }
        Served::Unavailable(error)
    }

    /// Resolver in use
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Store in use
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use snapfall_resolver::catalog;
    use snapfall_store::MemorySource;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn fallback_with(source: MemorySource) -> SnapshotFallback {
        SnapshotFallback::with_parts(
            Resolver::standard(),
            SnapshotStore::new(source),
            &SnapshotConfig::default(),
        )
    }

    fn tracks_request() -> RequestDescriptor {
        RequestDescriptor::parse("/tracks/")
    }

    #[tokio::test]
    async fn live_success_wins_when_off() {
        let source: MemorySource = [(catalog::TRACKS, json!(["snap"]))].into_iter().collect();
        let fallback = fallback_with(source);

        let served = fallback
            .fetch(&tracks_request(), StableMode::Off, || async {
                Ok::<_, String>(json!(["live"]))
            })
            .await;
        assert_eq!(served.into_value(), Some(json!(["live"])));
    }

    #[tokio::test]
    async fn stable_mode_skips_live_call() {
        let source: MemorySource = [(catalog::TRACKS, json!(["snap"]))].into_iter().collect();
        let fallback = fallback_with(source);
        let called = AtomicBool::new(false);

        let served = fallback
            .fetch(&tracks_request(), StableMode::On, || async {
                called.store(true, Ordering::SeqCst);
                Ok::<_, String>(json!(["live"]))
            })
            .await;
        assert!(served.is_snapshot());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn mode_for_uses_configured_flag() {
        let fallback = fallback_with(MemorySource::new());
        assert_eq!(fallback.mode_for("stable=true"), StableMode::On);
        assert_eq!(fallback.mode_for("demo=true"), StableMode::Off);
    }
}
