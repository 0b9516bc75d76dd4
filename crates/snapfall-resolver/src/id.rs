//! Snapshot identifiers
//!
//! A [`SnapshotId`] names exactly one fixture document in persistent storage.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Extension every fixture document carries
pub const FIXTURE_EXTENSION: &str = ".json";

/// Opaque, file-like name of a recorded snapshot
///
/// Well-known ids live in [`crate::catalog`] as `const` values; ids read
/// from configuration are owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(Cow<'static, str>);

impl SnapshotId {
    /// Create id from a static name
    #[inline]
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create id from an owned name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the id is safe to use as a fixture file name
    ///
    /// Accepts a single path component ending in `.json`. Rejects empty
    /// stems, separators and parent references.
    #[must_use]
    pub fn is_fixture_name(&self) -> bool {
        let name = self.as_str();
        let Some(stem) = name.strip_suffix(FIXTURE_EXTENSION) else {
            return false;
        };
        !stem.is_empty()
            && !name.contains(['/', '\\', '\0'])
            && !name.starts_with('.')
            && !name.contains("..")
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SnapshotId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for SnapshotId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for SnapshotId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for SnapshotId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_owned_ids_compare_equal() {
        const PROFILE: SnapshotId = SnapshotId::from_static("profile.json");
        assert_eq!(PROFILE, SnapshotId::new("profile.json"));
        assert_eq!(PROFILE.to_string(), "profile.json");
    }

    #[test]
    fn fixture_name_accepts_plain_json_files() {
        assert!(SnapshotId::from_static("tracks.json").is_fixture_name());
        assert!(SnapshotId::from_static("dashboard-stats-7days.json").is_fixture_name());
    }

    #[test]
    fn fixture_name_rejects_unsafe_names() {
        for name in [
            "",
            ".json",
            "tracks",
            "tracks.yaml",
            "../secrets.json",
            "nested/tracks.json",
            "nested\\tracks.json",
            ".hidden.json",
            "a..b.json",
        ] {
            assert!(!SnapshotId::new(name).is_fixture_name(), "{name} accepted");
        }
    }

    #[test]
    fn str_lookup_in_maps() {
        let map: std::collections::HashMap<SnapshotId, u8> =
            [(SnapshotId::from_static("leaderboard.json"), 1)].into();
        assert_eq!(map.get("leaderboard.json"), Some(&1));
        assert_eq!(map.get("leaderboard-weekly.json"), None);
    }
}
