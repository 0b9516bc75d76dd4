//! Fixture scrubbing
//!
//! Recorded responses can carry content that must not appear in a demo.
//! [`ContentScrubber`] drops every array item whose JSON text mentions one of
//! its terms, case-insensitively.

use crate::error::ScrubError;
use crate::source::{DirectorySource, FixtureSource};
use serde_json::Value;
use snapfall_resolver::SnapshotId;

/// Result of scrubbing one document
#[derive(Debug, Clone, PartialEq)]
pub struct Scrubbed {
    /// Filtered document
    pub value: Value,
    /// Number of array items removed
    pub removed: usize,
}

/// Removes array items mentioning any configured term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentScrubber {
    terms: Vec<String>,
}

impl ContentScrubber {
    /// Create scrubber; blank terms are ignored
    #[must_use]
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Lower-cased terms
    #[inline]
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Check if an item mentions any term
    #[must_use]
    pub fn is_flagged(&self, item: &Value) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let text = item.to_string().to_lowercase();
        self.terms.iter().any(|term| text.contains(term.as_str()))
    }

    /// Scrub one document
    ///
    /// Top-level arrays are filtered directly. For top-level objects, every
    /// array-valued field is filtered. Anything else is returned unchanged.
    #[must_use]
    pub fn scrub(&self, document: Value) -> Scrubbed {
        match document {
            Value::Array(items) => {
                let (kept, removed) = self.filter_items(items);
                Scrubbed {
                    value: Value::Array(kept),
                    removed,
                }
            }
            Value::Object(mut fields) => {
                let mut removed = 0;
                for field in fields.values_mut() {
                    if let Value::Array(items) = field {
                        let (kept, n) = self.filter_items(std::mem::take(items));
                        *items = kept;
                        removed += n;
                    }
                }
                Scrubbed {
                    value: Value::Object(fields),
                    removed,
                }
            }
            other => Scrubbed {
                value: other,
                removed: 0,
            },
        }
    }

    /// Scrub every fixture in `dir` in place
    ///
    /// Only documents that actually changed are rewritten (pretty-printed).
    /// Returns the ids that changed with their removed-item counts.
    ///
    /// # Errors
    /// Stops at the first fixture that cannot be listed, loaded or written.
    pub async fn scrub_directory(
        &self,
        dir: &DirectorySource,
    ) -> Result<Vec<(SnapshotId, usize)>, ScrubError> {
        let ids = dir.list().await.map_err(|source| ScrubError::List {
            path: dir.root().to_path_buf(),
            source,
        })?;

        let mut changed = Vec::new();
        for id in ids {
            let document = dir.load(&id).await?;
            let scrubbed = self.scrub(document);
            if scrubbed.removed == 0 {
                continue;
            }

            let path = dir.fixture_path(&id)?;
            let text = serde_json::to_string_pretty(&scrubbed.value)?;
            tokio::fs::write(&path, text)
                .await
                .map_err(|source| ScrubError::Write { path, source })?;

            tracing::info!("Filtered {} item(s) from {}", scrubbed.removed, id);
            changed.push((id, scrubbed.removed));
        }
        Ok(changed)
    }

    fn filter_items(&self, items: Vec<Value>) -> (Vec<Value>, usize) {
        let before = items.len();
        let kept: Vec<_> = items.into_iter().filter(|i| !self.is_flagged(i)).collect();
        let removed = before - kept.len();
        (kept, removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scrubber() -> ContentScrubber {
        ContentScrubber::new(["Acme", "ACX"])
    }

    #[test]
    fn scrub_top_level_array() {
        let result = scrubber().scrub(json!([
            {"title": "Acme hackathon"},
            {"title": "Resume review"},
            {"sponsor": "acx labs"},
        ]));
        assert_eq!(result.removed, 2);
        assert_eq!(result.value, json!([{"title": "Resume review"}]));
    }

    #[test]
    fn scrub_arrays_inside_object() {
        let result = scrubber().scrub(json!({
            "count": 3,
            "results": [{"name": "ACME meetup"}, {"name": "Mock interview"}],
            "tags": ["acme", "career"],
            "owner": {"name": "Acme"},
        }));
        assert_eq!(result.removed, 2);
        assert_eq!(result.value["results"], json!([{"name": "Mock interview"}]));
        assert_eq!(result.value["tags"], json!(["career"]));
        assert_eq!(result.value["owner"], json!({"name": "Acme"}));
    }

    #[test]
    fn scrub_scalars_unchanged() {
        let result = scrubber().scrub(json!("Acme"));
        assert_eq!(result.removed, 0);
        assert_eq!(result.value, json!("Acme"));
    }

    #[test]
    fn empty_terms_flag_nothing() {
        let scrubber = ContentScrubber::new(["", "  "]);
        assert!(scrubber.terms().is_empty());
        assert!(!scrubber.is_flagged(&json!({"x": ""})));
    }

    #[tokio::test]
    async fn scrub_directory_rewrites_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clean.json"), r#"[{"a": 1}]"#).unwrap();
        std::fs::write(
            dir.path().join("dirty.json"),
            r#"{"results": [{"a": "Acme"}, {"a": 2}]}"#,
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let changed = scrubber().scrub_directory(&source).await.unwrap();
        assert_eq!(changed, vec![(SnapshotId::new("dirty.json"), 1)]);

        let rewritten = source.load(&SnapshotId::new("dirty.json")).await.unwrap();
        assert_eq!(rewritten, json!({"results": [{"a": 2}]}));
        let untouched = std::fs::read_to_string(dir.path().join("clean.json")).unwrap();
        assert_eq!(untouched, r#"[{"a": 1}]"#);
    }
}
