//! Subcommand implementations, kept free of argument parsing.

use serde_json::{json, Value};
use snapfall_fallback::SnapshotConfig;
use snapfall_resolver::{Resolver, SnapshotId, CAPTURE_PLAN};
use snapfall_store::{ContentScrubber, DirectorySource, ScrubError, SnapshotStore};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Snapshot id for `endpoint`, or `none`
pub(crate) fn resolve(endpoint: &str) -> String {
    Resolver::standard()
        .resolve_endpoint(endpoint)
        .map_or_else(|| "none".to_string(), |id| id.to_string())
}

/// Outcome of loading every known snapshot
#[derive(Debug)]
pub(crate) struct VerifyReport {
    pub(crate) dir: PathBuf,
    pub(crate) entries: Vec<(SnapshotId, Result<(), String>)>,
}

impl VerifyReport {
    pub(crate) fn passed(&self) -> bool {
        self.entries.iter().all(|(_, status)| status.is_ok())
    }

    pub(crate) fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, status)| status.is_err()).count()
    }

    pub(crate) fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Snapshot directory: {}", self.dir.display());
        for (id, status) in &self.entries {
            match status {
                Ok(()) => {
                    let _ = writeln!(out, "  ok       {id}");
                }
                Err(reason) => {
                    let _ = writeln!(out, "  FAILED   {id}: {reason}");
                }
            }
        }
        let _ = writeln!(
            out,
            "{} of {} snapshots loaded",
            self.entries.len() - self.failures(),
            self.entries.len()
        );
        out
    }

    pub(crate) fn to_json(&self) -> Value {
        let entries: Vec<_> = self
            .entries
            .iter()
            .map(|(id, status)| match status {
                Ok(()) => json!({ "id": id, "ok": true }),
                Err(reason) => json!({ "id": id, "ok": false, "error": reason }),
            })
            .collect();
        json!({
            "dir": self.dir.display().to_string(),
            "passed": self.passed(),
            "failures": self.failures(),
            "snapshots": entries,
        })
    }
}

/// Load every id the standard resolver can produce
pub(crate) async fn verify(config: &SnapshotConfig) -> VerifyReport {
    let store = SnapshotStore::with_options(
        DirectorySource::new(&config.fixture_dir),
        config.store_options(),
    );

    let mut entries = Vec::new();
    for id in Resolver::standard().known_ids() {
        let status = store
            .try_get(&id)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string());
        entries.push((id, status));
    }

    VerifyReport {
        dir: config.fixture_dir.clone(),
        entries,
    }
}

/// Scrub every fixture in the configured directory
pub(crate) async fn scrub(config: &SnapshotConfig) -> Result<Vec<(SnapshotId, usize)>, ScrubError> {
    let scrubber = ContentScrubber::new(&config.scrub_terms);
    tracing::info!("Scrubbing terms: {:?}", scrubber.terms());
    scrubber
        .scrub_directory(&DirectorySource::new(&config.fixture_dir))
        .await
}

/// Recorded endpoints, one per line
pub(crate) fn catalog() -> String {
    let width = CAPTURE_PLAN
        .iter()
        .map(|capture| capture.endpoint.len())
        .max()
        .unwrap_or(0);
    CAPTURE_PLAN.iter().fold(String::new(), |mut out, capture| {
        let _ = writeln!(out, "{:<width$}  {}", capture.endpoint, capture.id);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapfall_resolver::catalog;
    use snapfall_test_utils::FixtureDir;

    #[test]
    fn resolve_prints_id_or_none() {
        assert_eq!(resolve("/activity/feed/?limit=50"), "activity-feed-50.json");
        assert_eq!(resolve("/unknown/path/"), "none");
    }

    #[tokio::test]
    async fn verify_full_catalog_passes() {
        let fixtures = FixtureDir::with_catalog();
        let config = SnapshotConfig::default().with_fixture_dir(fixtures.path());

        let report = verify(&config).await;
        assert!(report.passed());
        assert_eq!(report.entries.len(), CAPTURE_PLAN.len());
        assert_eq!(report.to_json()["failures"], 0);
    }

    #[tokio::test]
    async fn verify_reports_missing_fixture() {
        let fixtures = FixtureDir::with_catalog();
        fixtures.remove(&catalog::POINTS_LOGS);
        let config = SnapshotConfig::default().with_fixture_dir(fixtures.path());

        let report = verify(&config).await;
        assert!(!report.passed());
        assert_eq!(report.failures(), 1);
        assert!(report.to_text().contains("FAILED   points-logs.json"));
    }

    #[tokio::test]
    async fn scrub_uses_config_terms() {
        let fixtures = FixtureDir::new();
        fixtures.write(
            &catalog::INCENTIVES,
            &json!([{"title": "Propel bonus"}, {"title": "Referral"}]),
        );
        let config = SnapshotConfig::default().with_fixture_dir(fixtures.path());

        let changed = scrub(&config).await.unwrap();
        assert_eq!(changed, vec![(catalog::INCENTIVES, 1)]);
    }

    #[test]
    fn catalog_lists_every_capture() {
        let listing = catalog();
        assert_eq!(listing.lines().count(), CAPTURE_PLAN.len());
        assert!(listing.contains("leaderboard-weekly.json"));
    }
}
