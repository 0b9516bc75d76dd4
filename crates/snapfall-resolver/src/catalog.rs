//! Known snapshots
//!
//! The fixture set is fixed and versioned alongside the rules: one file per
//! recorded endpoint variant. [`CAPTURE_PLAN`] lists the endpoint each
//! fixture was recorded from.

use crate::id::SnapshotId;

/// `/users/profile/`
pub const PROFILE: SnapshotId = SnapshotId::from_static("profile.json");
/// `/users/discord_verification/`
pub const DISCORD_VERIFICATION: SnapshotId = SnapshotId::from_static("discord-verification.json");
/// `/user-preferences/`
pub const USER_PREFERENCES: SnapshotId = SnapshotId::from_static("user-preferences.json");

/// Dashboard stats, 30 day period (default)
pub const DASHBOARD_STATS: SnapshotId = SnapshotId::from_static("dashboard-stats.json");
/// Dashboard stats, 7 day period
pub const DASHBOARD_STATS_7DAYS: SnapshotId = SnapshotId::from_static("dashboard-stats-7days.json");
/// Dashboard stats, 90 day period
pub const DASHBOARD_STATS_90DAYS: SnapshotId =
    SnapshotId::from_static("dashboard-stats-90days.json");

/// Points timeline, daily granularity (default)
pub const POINTS_TIMELINE: SnapshotId = SnapshotId::from_static("points-timeline.json");
/// Points timeline, weekly granularity
pub const POINTS_TIMELINE_WEEKLY: SnapshotId =
    SnapshotId::from_static("points-timeline-weekly.json");
/// `/points-logs/`
pub const POINTS_LOGS: SnapshotId = SnapshotId::from_static("points-logs.json");

/// Activity feed, last 10 items
pub const ACTIVITY_FEED_10: SnapshotId = SnapshotId::from_static("activity-feed-10.json");
/// Activity feed, last 50 items
pub const ACTIVITY_FEED_50: SnapshotId = SnapshotId::from_static("activity-feed-50.json");
/// Activity feed without limit (default)
pub const ACTIVITY_FEED_FULL: SnapshotId = SnapshotId::from_static("activity-feed-full.json");

/// Leaderboard, all time (default)
pub const LEADERBOARD: SnapshotId = SnapshotId::from_static("leaderboard.json");
/// Leaderboard, monthly
pub const LEADERBOARD_MONTHLY: SnapshotId = SnapshotId::from_static("leaderboard-monthly.json");
/// Leaderboard, weekly
pub const LEADERBOARD_WEEKLY: SnapshotId = SnapshotId::from_static("leaderboard-weekly.json");

/// `/activities/`
pub const ACTIVITIES: SnapshotId = SnapshotId::from_static("activities.json");
/// `/incentives/`
pub const INCENTIVES: SnapshotId = SnapshotId::from_static("incentives.json");
/// `/rewards/available/`
pub const REWARDS_AVAILABLE: SnapshotId = SnapshotId::from_static("rewards-available.json");
/// `/redemptions/`
pub const REDEMPTIONS: SnapshotId = SnapshotId::from_static("redemptions.json");
/// `/redemptions/history/`
pub const REDEMPTIONS_HISTORY: SnapshotId = SnapshotId::from_static("redemptions-history.json");
/// `/tracks/`
pub const TRACKS: SnapshotId = SnapshotId::from_static("tracks.json");

/// One recorded endpoint and the fixture it was saved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Endpoint as requested during recording, query included
    pub endpoint: &'static str,
    /// Fixture the response was written to
    pub id: SnapshotId,
}

const fn capture(endpoint: &'static str, id: SnapshotId) -> Capture {
    Capture { endpoint, id }
}

/// Every endpoint the recorder captures, in recording order
pub const CAPTURE_PLAN: &[Capture] = &[
    // User & profile
    capture("/users/profile/", PROFILE),
    capture("/users/discord_verification/", DISCORD_VERIFICATION),
    capture("/user-preferences/", USER_PREFERENCES),
    // Dashboard
    capture("/dashboard/stats/?period=30days", DASHBOARD_STATS),
    capture("/dashboard/stats/?period=7days", DASHBOARD_STATS_7DAYS),
    capture("/dashboard/stats/?period=90days", DASHBOARD_STATS_90DAYS),
    // Points
    capture("/points/timeline/?granularity=daily&days=30", POINTS_TIMELINE),
    capture("/points/timeline/?granularity=weekly&days=90", POINTS_TIMELINE_WEEKLY),
    capture("/points-logs/", POINTS_LOGS),
    // Activity feed
    capture("/activity/feed/?limit=10", ACTIVITY_FEED_10),
    capture("/activity/feed/?limit=50", ACTIVITY_FEED_50),
    capture("/activity/feed/", ACTIVITY_FEED_FULL),
    // Leaderboard
    capture("/leaderboard/?limit=10&period=all_time", LEADERBOARD),
    capture("/leaderboard/?limit=10&period=monthly", LEADERBOARD_MONTHLY),
    capture("/leaderboard/?limit=10&period=weekly", LEADERBOARD_WEEKLY),
    // Activities & rewards
    capture("/activities/", ACTIVITIES),
    capture("/incentives/", INCENTIVES),
    capture("/rewards/available/", REWARDS_AVAILABLE),
    capture("/redemptions/", REDEMPTIONS),
    capture("/redemptions/history/", REDEMPTIONS_HISTORY),
    // Tracks
    capture("/tracks/", TRACKS),
];

/// Snapshots warmed at start-up, in load order
pub const DEFAULT_PRELOAD: &[SnapshotId] = &[
    PROFILE,
    DASHBOARD_STATS,
    ACTIVITY_FEED_10,
    LEADERBOARD,
    ACTIVITIES,
    INCENTIVES,
    REDEMPTIONS,
    TRACKS,
];
