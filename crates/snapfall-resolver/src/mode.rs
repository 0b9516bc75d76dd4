//! Stable mode detection
//!
//! Stable mode asks the caller to prefer frozen snapshots over live calls.
//! It is switched on per request by an explicit query flag, `?stable=true`
//! by default, and is never remembered between calls.

use crate::descriptor::QueryParams;
use serde::{Deserialize, Serialize};

/// Query flag that switches stable mode on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlag {
    /// Query parameter name
    pub param: String,
    /// Exact value meaning "on"
    pub on_value: String,
}

impl ModeFlag {
    /// Create flag
    #[must_use]
    pub fn new(param: impl Into<String>, on_value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            on_value: on_value.into(),
        }
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new("stable", "true")
    }
}

/// Whether snapshot-backed responses are preferred
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StableMode {
    /// Live calls first, snapshots only on failure
    #[default]
    Off,
    /// Snapshots first
    On,
}

impl StableMode {
    /// Detect mode from a raw query string using `flag`
    ///
    /// Only the first occurrence of the parameter counts and the value must
    /// match exactly (`stable=TRUE` and a bare `stable` are off).
    #[must_use]
    pub fn from_query(raw_query: &str, flag: &ModeFlag) -> Self {
        let on = QueryParams::parse(raw_query)
            .get(&flag.param)
            .is_some_and(|value| value == flag.on_value);
        Self::from(on)
    }

    /// Detect mode with the default `stable=true` flag
    #[inline]
    #[must_use]
    pub fn detect(raw_query: &str) -> Self {
        Self::from_query(raw_query, &ModeFlag::default())
    }

    /// Check if stable mode is on
    #[inline]
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for StableMode {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flag_is_off() {
        assert_eq!(StableMode::detect(""), StableMode::Off);
        assert_eq!(StableMode::detect("demo=true"), StableMode::Off);
    }

    #[test]
    fn exact_value_is_on() {
        assert_eq!(StableMode::detect("stable=true"), StableMode::On);
        assert_eq!(StableMode::detect("?demo=true&stable=true"), StableMode::On);
        assert!(StableMode::detect("stable=true").is_on());
    }

    #[test]
    fn other_values_are_off() {
        for query in ["stable", "stable=", "stable=TRUE", "stable=1", "stable=yes", "Stable=true"] {
            assert_eq!(StableMode::detect(query), StableMode::Off, "{query}");
        }
    }

    #[test]
    fn first_occurrence_decides() {
        assert_eq!(StableMode::detect("stable=false&stable=true"), StableMode::Off);
        assert_eq!(StableMode::detect("stable=true&stable=false"), StableMode::On);
    }

    #[test]
    fn custom_flag() {
        let flag = ModeFlag::new("frozen", "1");
        assert_eq!(StableMode::from_query("frozen=1", &flag), StableMode::On);
        assert_eq!(StableMode::from_query("stable=true", &flag), StableMode::Off);
    }

    #[test]
    fn default_is_off() {
        assert_eq!(StableMode::default(), StableMode::Off);
        assert!(!StableMode::from(false).is_on());
    }
}
