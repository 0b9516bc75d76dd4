//! `snapfall.toml` config loading.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use snapfall_resolver::{ModeFlag, Resolver, SnapshotId, DEFAULT_PRELOAD};
use snapfall_store::StoreOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`SnapshotConfig::fixture_dir`]
pub const FIXTURE_DIR_ENV: &str = "SNAPFALL_FIXTURE_DIR";

/// Snapshot subsystem configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SnapshotConfig {
    /// Directory holding one `<id>` JSON file per snapshot.
    pub fixture_dir: PathBuf,

    /// Upper bound for a single fixture load (ms).
    pub load_timeout_ms: u64,

    /// Snapshot cache capacity; must cover every known snapshot so nothing
    /// is evicted.
    pub cache_capacity: u64,

    /// Snapshots warmed by `warm_up`.
    pub preload: Vec<SnapshotId>,

    /// Page query flag that turns stable mode on.
    pub mode_flag: ModeFlag,

    /// Terms removed from fixtures by `snapfall scrub`.
    pub scrub_terms: Vec<String>,
}

impl SnapshotConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML, `ConfigError::Invalid` for
    /// unusable values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file, then apply environment overrides
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from `path` if given, else defaults; environment overrides apply
    /// either way
    ///
    /// # Errors
    /// As [`Self::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Self::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Apply `SNAPFALL_FIXTURE_DIR` if set and non-empty
    pub fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(FIXTURE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.fixture_dir = PathBuf::from(dir);
        }
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// `ConfigError::Invalid` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "load_timeout_ms must be positive".to_string(),
            ));
        }
        let known = Resolver::standard().known_ids();
        if self.cache_capacity < known.len() as u64 {
            return Err(ConfigError::Invalid(format!(
                "cache_capacity {} cannot hold all {} known snapshots",
                self.cache_capacity,
                known.len()
            )));
        }
        if let Some(bad) = self.preload.iter().find(|id| !id.is_fixture_name()) {
            return Err(ConfigError::Invalid(format!(
                "preload entry '{bad}' is not a fixture file name"
            )));
        }
        if let Some(unknown) = self.preload.iter().find(|id| !known.contains(*id)) {
            return Err(ConfigError::Invalid(format!(
                "preload entry '{unknown}' is not a known snapshot"
            )));
        }
        if self.mode_flag.param.is_empty() {
            return Err(ConfigError::Invalid(
                "mode_flag.param must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// With fixture directory
    #[inline]
    #[must_use]
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = dir.into();
        self
    }

    /// With load timeout
    #[inline]
    #[must_use]
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With preload list
    #[inline]
    #[must_use]
    pub fn with_preload(mut self, ids: impl IntoIterator<Item = SnapshotId>) -> Self {
        self.preload = ids.into_iter().collect();
        self
    }

    /// With stable-mode flag
    #[inline]
    #[must_use]
    pub fn with_mode_flag(mut self, flag: ModeFlag) -> Self {
        self.mode_flag = flag;
        self
    }

    /// Load bound as a duration
    #[inline]
    #[must_use]
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Store options derived from this config
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::default()
            .with_load_timeout(self.load_timeout())
            .with_max_capacity(self.cache_capacity)
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            fixture_dir: PathBuf::from("data/snapshots"),
            load_timeout_ms: 2_000,
            cache_capacity: 256,
            preload: DEFAULT_PRELOAD.to_vec(),
            mode_flag: ModeFlag::default(),
            scrub_terms: vec![
                "Propel2Excel".to_string(),
                "P2E".to_string(),
                "Propel".to_string(),
            ],
        }
    }
}
