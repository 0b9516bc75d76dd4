//! Testing utilities for Snapfall workspace
//!
//! Shared fixtures: temporary fixture directories and sample payloads.

#![allow(missing_docs)]

use serde_json::{json, Value};
use snapfall_resolver::{catalog, SnapshotId, CAPTURE_PLAN};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory of fixture files, removed on drop
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Directory holding one sample document per recorded fixture
    pub fn with_catalog() -> Self {
        let fixtures = Self::new();
        for capture in CAPTURE_PLAN {
            fixtures.write(&capture.id, &sample_payload(&capture.id));
        }
        fixtures
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, id: &SnapshotId) -> PathBuf {
        self.dir.path().join(id.as_str())
    }

    pub fn write(&self, id: &SnapshotId, value: &Value) {
        std::fs::write(self.file(id), serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    pub fn write_raw(&self, id: &SnapshotId, contents: &str) {
        std::fs::write(self.file(id), contents).unwrap();
    }

    pub fn remove(&self, id: &SnapshotId) {
        std::fs::remove_file(self.file(id)).unwrap();
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic stand-in for a recorded response
pub fn sample_payload(id: &SnapshotId) -> Value {
    match id {
        id if *id == catalog::PROFILE => json!({
            "id": 7,
            "username": "demo_user",
            "total_points": 1240,
            "onboarding_completed": true,
        }),
        id if *id == catalog::LEADERBOARD => json!({
            "period": "all_time",
            "results": [
                {"rank": 1, "username": "demo_user", "points": 1240},
                {"rank": 2, "username": "second", "points": 990},
            ],
        }),
        other => json!({ "fixture": other.as_str(), "results": [] }),
    }
}

pub fn id(name: &str) -> SnapshotId {
    SnapshotId::new(name)
}
