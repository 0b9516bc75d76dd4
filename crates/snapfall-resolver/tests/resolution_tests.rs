//! Resolver Tests
//!
//! End-to-end resolution against the standard rule set and recorded catalog.

use proptest::prelude::*;
use snapfall_resolver::catalog;
use snapfall_resolver::prelude::*;
use snapfall_resolver::CAPTURE_PLAN;

fn resolve(path: &str, query: &str) -> Option<SnapshotId> {
    Resolver::standard().resolve(&RequestDescriptor::new(path, query))
}

#[test]
fn test_dashboard_period_variants() {
    assert_eq!(resolve("/dashboard/stats/", "period=7days"), Some(catalog::DASHBOARD_STATS_7DAYS));
    assert_eq!(
        resolve("/dashboard/stats/", "period=90days"),
        Some(catalog::DASHBOARD_STATS_90DAYS)
    );
    assert_eq!(resolve("/dashboard/stats/", ""), Some(catalog::DASHBOARD_STATS));
    assert_eq!(resolve("/dashboard/stats/", "period=bogus"), Some(catalog::DASHBOARD_STATS));
    assert_eq!(resolve("/dashboard/stats/", "period=30days"), Some(catalog::DASHBOARD_STATS));
}

#[test]
fn test_points_timeline_granularity() {
    assert_eq!(
        resolve("/points/timeline/", "granularity=weekly&days=90"),
        Some(catalog::POINTS_TIMELINE_WEEKLY)
    );
    assert_eq!(resolve("/points/timeline/", "granularity=daily"), Some(catalog::POINTS_TIMELINE));
    assert_eq!(resolve("/points/timeline/", ""), Some(catalog::POINTS_TIMELINE));
    assert_eq!(resolve("/points/timeline/", "days=90"), Some(catalog::POINTS_TIMELINE));
}

#[test]
fn test_activity_feed_limits() {
    assert_eq!(resolve("/activity/feed/", "limit=10"), Some(catalog::ACTIVITY_FEED_10));
    assert_eq!(resolve("/activity/feed/", "limit=50"), Some(catalog::ACTIVITY_FEED_50));
    assert_eq!(resolve("/activity/feed/", ""), Some(catalog::ACTIVITY_FEED_FULL));
    assert_eq!(resolve("/activity/feed/", "limit=25"), Some(catalog::ACTIVITY_FEED_FULL));
    assert_eq!(resolve("/activity/feed/", "limit=20"), Some(catalog::ACTIVITY_FEED_FULL));
    assert_eq!(resolve("/activity/feed/", "limit=100"), Some(catalog::ACTIVITY_FEED_FULL));
}

#[test]
fn test_leaderboard_periods() {
    assert_eq!(
        resolve("/leaderboard/", "limit=10&period=monthly"),
        Some(catalog::LEADERBOARD_MONTHLY)
    );
    assert_eq!(resolve("/leaderboard/", "period=weekly"), Some(catalog::LEADERBOARD_WEEKLY));
    assert_eq!(resolve("/leaderboard/", "period=all_time"), Some(catalog::LEADERBOARD));
    assert_eq!(resolve("/leaderboard/", ""), Some(catalog::LEADERBOARD));
}

#[test]
fn test_fixed_routes_ignore_query() {
    assert_eq!(resolve("/tracks/", ""), Some(catalog::TRACKS));
    assert_eq!(resolve("/tracks/", "page=2&period=weekly"), Some(catalog::TRACKS));
    assert_eq!(resolve("/redemptions/history/", ""), Some(catalog::REDEMPTIONS_HISTORY));
    assert_eq!(resolve("/redemptions/", ""), Some(catalog::REDEMPTIONS));
    assert_eq!(
        resolve("/users/discord_verification/", ""),
        Some(catalog::DISCORD_VERIFICATION)
    );
}

#[test]
fn test_unknown_paths_resolve_to_none() {
    assert_eq!(resolve("/unknown/path/", ""), None);
    assert_eq!(resolve("/TRACKS/", ""), None);
    assert_eq!(resolve("/tracks", ""), None);
    assert_eq!(resolve("", ""), None);
}

#[test]
fn test_every_capture_resolves_to_its_fixture() {
    let resolver = Resolver::standard();
    for capture in CAPTURE_PLAN {
        assert_eq!(
            resolver.resolve_endpoint(capture.endpoint).as_ref(),
            Some(&capture.id),
            "capture {}",
            capture.endpoint
        );
    }
}

proptest! {
    #[test]
    fn prop_resolution_is_deterministic(
        path in "(/[a-z_\\-]{0,12}){0,4}/?",
        query in "([a-z]{1,8}=[a-z0-9_]{0,8}&?){0,4}",
    ) {
        let resolver = Resolver::standard();
        let request = RequestDescriptor::new(path, query);
        prop_assert_eq!(resolver.resolve(&request), resolver.resolve(&request.clone()));
    }

    #[test]
    fn prop_fixed_routes_ignore_any_query(query in "[ -~]{0,40}") {
        let request = RequestDescriptor::new("/tracks/", query);
        prop_assert_eq!(Resolver::standard().resolve(&request), Some(catalog::TRACKS));
    }

    #[test]
    fn prop_resolved_ids_are_known(
        path in prop::sample::select(vec![
            "/dashboard/stats/", "/points/timeline/", "/activity/feed/", "/leaderboard/",
            "/tracks/", "/incentives/", "/nowhere/",
        ]),
        query in "[ -~]{0,40}",
    ) {
        let resolver = Resolver::standard();
        if let Some(id) = resolver.resolve(&RequestDescriptor::new(path, query)) {
            prop_assert!(resolver.known_ids().contains(&id));
        }
    }
}
