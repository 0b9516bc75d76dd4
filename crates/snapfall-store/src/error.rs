//! Error types for the snapshot store
//!
//! [`LoadError`] never escapes [`crate::SnapshotStore::get`]; it is only
//! surfaced through `try_get` for diagnostics.

use snapfall_resolver::SnapshotId;
use std::path::PathBuf;

/// Errors while loading one fixture
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source holds no document for this id
    #[error("snapshot not found: {0}")]
    NotFound(SnapshotId),

    /// Id is not a plain `*.json` file name
    #[error("invalid snapshot name: '{0}'")]
    InvalidName(SnapshotId),

    /// IO error during fixture read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Fixture file path
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("malformed snapshot {id}: {source}")]
    Malformed {
        /// Fixture that failed to parse
        id: SnapshotId,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Source did not answer within the load bound
    #[error("loading {id} timed out after {timeout_ms}ms")]
    TimedOut {
        /// Fixture being loaded
        id: SnapshotId,
        /// Bound that was exceeded
        timeout_ms: u64,
    },
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-content error
    pub fn malformed(id: SnapshotId, source: serde_json::Error) -> Self {
        Self::Malformed { id, source }
    }

    /// Check if the fixture is simply absent
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors while scrubbing a fixture directory
#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    /// Fixture could not be read or parsed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Directory listing failed
    #[error("io error listing {path}: {source}")]
    List {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Scrubbed fixture could not be written back
    #[error("io error writing {path}: {source}")]
    Write {
        /// Fixture file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Scrubbed value could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = LoadError::NotFound(SnapshotId::from_static("tracks.json"));
        assert_eq!(err.to_string(), "snapshot not found: tracks.json");
        assert!(err.is_not_found());
    }

    #[test]
    fn timed_out_display() {
        let err = LoadError::TimedOut {
            id: SnapshotId::from_static("profile.json"),
            timeout_ms: 2000,
        };
        assert_eq!(err.to_string(), "loading profile.json timed out after 2000ms");
        assert!(!err.is_not_found());
    }

    #[test]
    fn malformed_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoadError::malformed(SnapshotId::from_static("x.json"), source);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn error_conversions() {
        let load = LoadError::InvalidName(SnapshotId::new("../x.json"));
        let scrub: ScrubError = load.into();
        assert!(matches!(scrub, ScrubError::Load(_)));
    }
}
