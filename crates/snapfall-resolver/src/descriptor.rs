//! Request descriptors and query parsing
//!
//! A [`RequestDescriptor`] is built per call from the endpoint the live
//! client was about to hit. Query strings are kept verbatim; [`QueryParams`]
//! gives ordered access to the pairs without decoding them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path and verbatim query of a would-be live API call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestDescriptor {
    path: String,
    raw_query: String,
}

impl RequestDescriptor {
    /// Create descriptor from an already split path and query
    ///
    /// A leading `?` on `raw_query` is dropped.
    #[must_use]
    pub fn new(path: impl Into<String>, raw_query: impl Into<String>) -> Self {
        let raw_query = raw_query.into();
        let raw_query = match raw_query.strip_prefix('?') {
            Some(rest) => rest.to_owned(),
            None => raw_query,
        };
        Self {
            path: path.into(),
            raw_query,
        }
    }

    /// Split a full endpoint at the first `?`
    ///
    /// # Example
    ///
    /// ```rust
    /// use snapfall_resolver::RequestDescriptor;
    ///
    /// let request = RequestDescriptor::parse("/leaderboard/?limit=10&period=weekly");
    /// assert_eq!(request.path(), "/leaderboard/");
    /// assert_eq!(request.raw_query(), "limit=10&period=weekly");
    /// ```
    #[must_use]
    pub fn parse(endpoint: &str) -> Self {
        match endpoint.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(endpoint, ""),
        }
    }

    /// Path without query string
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Verbatim query string, possibly empty
    #[inline]
    #[must_use]
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Parsed view over the query string
    #[inline]
    #[must_use]
    pub fn query(&self) -> QueryParams<'_> {
        QueryParams::parse(&self.raw_query)
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw_query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.raw_query)
        }
    }
}

/// Ordered key/value pairs of a raw query string
///
/// Values are not percent-decoded. A pair without `=` has an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> QueryParams<'a> {
    /// Parse a raw query string (leading `?` tolerated)
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();
        Self { pairs }
    }

    /// Value of the first occurrence of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Check if `key` occurs at all
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate pairs in query order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }

    /// Number of pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no pairs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
