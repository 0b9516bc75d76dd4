//! Fixture sources
//!
//! A [`FixtureSource`] is the persistent side of the store: a read-only,
//! name-addressed set of JSON documents. Swapping the source never touches
//! resolution or caching.

use crate::error::LoadError;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use snapfall_resolver::SnapshotId;
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Read-only provider of named fixture documents
///
/// Implement this trait to back the store with another medium
/// (embedded resources, a blob store, ...).
#[async_trait]
pub trait FixtureSource: Send + Sync + Debug + 'static {
    /// Load and parse the document named by `id`
    async fn load(&self, id: &SnapshotId) -> Result<Value, LoadError>;

    /// Lightweight existence probe
    ///
    /// Defaults to a full load.
    async fn exists(&self, id: &SnapshotId) -> bool {
        self.load(id).await.is_ok()
    }

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Fixtures stored as `<root>/<id>` files
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create source rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for `id`, refusing anything but a plain `*.json` name
    pub fn fixture_path(&self, id: &SnapshotId) -> Result<PathBuf, LoadError> {
        if !id.is_fixture_name() {
            return Err(LoadError::InvalidName(id.clone()));
        }
        Ok(self.root.join(id.as_str()))
    }

    /// Ids of all `*.json` files in the root, sorted
    ///
    /// # Errors
    /// `std::io::Error` if the root cannot be listed.
    pub async fn list(&self) -> std::io::Result<Vec<SnapshotId>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                let id = SnapshotId::new(name);
                if id.is_fixture_name() {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl FixtureSource for DirectorySource {
    async fn load(&self, id: &SnapshotId) -> Result<Value, LoadError> {
        let path = self.fixture_path(id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(id.clone()));
            }
            Err(e) => return Err(LoadError::io_error(path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| LoadError::malformed(id.clone(), e))
    }

    async fn exists(&self, id: &SnapshotId) -> bool {
        let Ok(path) = self.fixture_path(id) else {
            return false;
        };
        tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

/// In-memory fixtures
///
/// Documents can be added and removed while the store is live, which makes
/// this source useful for embedding and for simulating storage changes.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: DashMap<SnapshotId, Value>,
    latency: Option<Duration>,
    loads: AtomicUsize,
}

impl MemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every load by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a document
    pub fn insert(&self, id: SnapshotId, document: Value) {
        self.documents.insert(id, document);
    }

    /// Remove a document
    pub fn remove(&self, id: &SnapshotId) -> Option<Value> {
        self.documents.remove(id).map(|(_, value)| value)
    }

    /// Number of documents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the source holds no documents
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of `load` calls served so far, failed ones included
    #[inline]
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl FromIterator<(SnapshotId, Value)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (SnapshotId, Value)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl FixtureSource for MemorySource {
    async fn load(&self, id: &SnapshotId) -> Result<Value, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.documents
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LoadError::NotFound(id.clone()))
    }

    async fn exists(&self, id: &SnapshotId) -> bool {
        self.documents.contains_key(id)
    }

    fn describe(&self) -> String {
        format!("memory:{} documents", self.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tracks() -> SnapshotId {
        SnapshotId::from_static("tracks.json")
    }

    #[tokio::test]
    async fn directory_source_loads_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tracks.json"), r#"[{"id": 1}]"#).unwrap();

        let source = DirectorySource::new(dir.path());
        let value = source.load(&tracks()).await.unwrap();
        assert_eq!(value, json!([{"id": 1}]));
        assert!(source.exists(&tracks()).await);
    }

    #[tokio::test]
    async fn directory_source_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());

        let err = source.load(&tracks()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!source.exists(&tracks()).await);
    }

    #[tokio::test]
    async fn directory_source_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tracks.json"), "{not json").unwrap();

        let source = DirectorySource::new(dir.path());
        let err = source.load(&tracks()).await.unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[tokio::test]
    async fn directory_source_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path().join("inner"));
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("outside.json"), "{}").unwrap();

        let escape = SnapshotId::new("../outside.json");
        assert!(matches!(
            source.load(&escape).await,
            Err(LoadError::InvalidName(_))
        ));
        assert!(!source.exists(&escape).await);
    }

    #[tokio::test]
    async fn directory_source_lists_json_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("c.json")).unwrap();

        let ids = DirectorySource::new(dir.path()).list().await.unwrap();
        assert_eq!(ids, vec![SnapshotId::new("a.json"), SnapshotId::new("b.json")]);
    }

    #[tokio::test]
    async fn memory_source_insert_remove() {
        let source = MemorySource::new();
        assert!(source.load(&tracks()).await.is_err());

        source.insert(tracks(), json!([]));
        assert_eq!(source.load(&tracks()).await.unwrap(), json!([]));
        assert_eq!(source.len(), 1);

        assert!(source.remove(&tracks()).is_some());
        assert!(!source.exists(&tracks()).await);
        assert_eq!(source.load_count(), 2);
    }

    #[test]
    fn describe_sources() {
        assert_eq!(DirectorySource::new("/data").describe(), "dir:/data");
        let source: MemorySource = [(tracks(), json!({}))].into_iter().collect();
        assert_eq!(source.describe(), "memory:1 documents");
    }
}
