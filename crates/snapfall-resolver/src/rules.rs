//! Resolution rules
//!
//! A [`Resolver`] tries its [`VariantRule`]s in registration order. The
//! first rule whose segment occurs in the request path wins and selects an
//! id from one query parameter. Requests matched by no rule fall through to
//! an exact, case-sensitive path lookup in the [`RouteTable`].

use crate::catalog;
use crate::descriptor::{QueryParams, RequestDescriptor};
use crate::id::SnapshotId;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

/// Query-sensitive rule for one family of endpoints
///
/// Matches any path containing `segment`, then selects the variant whose
/// value equals the first `param` in the query. Missing or unrecognised
/// values select `default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRule {
    segment: Cow<'static, str>,
    param: Cow<'static, str>,
    variants: Vec<(Cow<'static, str>, SnapshotId)>,
    default: SnapshotId,
}

impl VariantRule {
    /// Create rule with no variants
    #[must_use]
    pub fn new(
        segment: impl Into<Cow<'static, str>>,
        param: impl Into<Cow<'static, str>>,
        default: SnapshotId,
    ) -> Self {
        Self {
            segment: segment.into(),
            param: param.into(),
            variants: Vec::new(),
            default,
        }
    }

    /// Add a variant selected by `param=value`
    #[must_use]
    pub fn variant(mut self, value: impl Into<Cow<'static, str>>, id: SnapshotId) -> Self {
        self.variants.push((value.into(), id));
        self
    }

    /// Path segment this rule claims
    #[inline]
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Query parameter inspected by this rule
    #[inline]
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Id served when no variant applies
    #[inline]
    #[must_use]
    pub fn default_id(&self) -> &SnapshotId {
        &self.default
    }

    /// Check if this rule claims `path`
    #[inline]
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.contains(&*self.segment)
    }

    /// Select an id from query parameters
    #[must_use]
    pub fn select(&self, query: &QueryParams<'_>) -> &SnapshotId {
        query
            .get(&self.param)
            .and_then(|value| {
                self.variants
                    .iter()
                    .find(|(candidate, _)| candidate == value)
                    .map(|(_, id)| id)
            })
            .unwrap_or(&self.default)
    }

    /// Apply rule to a request; `None` if the path is not claimed
    #[must_use]
    pub fn apply(&self, request: &RequestDescriptor) -> Option<SnapshotId> {
        self.matches(request.path())
            .then(|| self.select(&request.query()).clone())
    }

    /// All ids this rule can produce
    pub fn ids(&self) -> impl Iterator<Item = &SnapshotId> {
        self.variants
            .iter()
            .map(|(_, id)| id)
            .chain(std::iter::once(&self.default))
    }
}

/// Exact path to snapshot table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: HashMap<Cow<'static, str>, SnapshotId>,
}

impl RouteTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path; a later registration for the same path replaces it
    pub fn insert(&mut self, path: impl Into<Cow<'static, str>>, id: SnapshotId) {
        self.routes.insert(path.into(), id);
    }

    /// Exact, case-sensitive lookup
    #[inline]
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SnapshotId> {
        self.routes.get(path)
    }

    /// Number of routes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All ids in the table
    pub fn ids(&self) -> impl Iterator<Item = &SnapshotId> {
        self.routes.values()
    }
}

/// Maps request descriptors to snapshot ids
///
/// Immutable once built; `resolve` takes `&self` and touches nothing else,
/// so a single instance can be shared freely across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    rules: Vec<VariantRule>,
    routes: RouteTable,
}

impl Resolver {
    /// Rule set matching the recorded fixture catalog
    #[must_use]
    pub fn standard() -> Self {
        Self::builder()
            .rule(
                VariantRule::new("/dashboard/stats/", "period", catalog::DASHBOARD_STATS)
                    .variant("7days", catalog::DASHBOARD_STATS_7DAYS)
                    .variant("90days", catalog::DASHBOARD_STATS_90DAYS),
            )
            .rule(
                VariantRule::new("/points/timeline/", "granularity", catalog::POINTS_TIMELINE)
                    .variant("weekly", catalog::POINTS_TIMELINE_WEEKLY),
            )
            // Only 10 and 50 were recorded; any other limit serves the full feed.
            .rule(
                VariantRule::new("/activity/feed/", "limit", catalog::ACTIVITY_FEED_FULL)
                    .variant("10", catalog::ACTIVITY_FEED_10)
                    .variant("50", catalog::ACTIVITY_FEED_50),
            )
            .rule(
                VariantRule::new("/leaderboard/", "period", catalog::LEADERBOARD)
                    .variant("monthly", catalog::LEADERBOARD_MONTHLY)
                    .variant("weekly", catalog::LEADERBOARD_WEEKLY),
            )
            .route("/users/profile/", catalog::PROFILE)
            .route("/users/discord_verification/", catalog::DISCORD_VERIFICATION)
            .route("/user-preferences/", catalog::USER_PREFERENCES)
            .route("/activities/", catalog::ACTIVITIES)
            .route("/points-logs/", catalog::POINTS_LOGS)
            .route("/incentives/", catalog::INCENTIVES)
            .route("/rewards/available/", catalog::REWARDS_AVAILABLE)
            .route("/redemptions/", catalog::REDEMPTIONS)
            .route("/redemptions/history/", catalog::REDEMPTIONS_HISTORY)
            .route("/tracks/", catalog::TRACKS)
            .build()
    }

    /// Start an empty rule set
    #[inline]
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Resolve a request to a snapshot id
    #[must_use]
    pub fn resolve(&self, request: &RequestDescriptor) -> Option<SnapshotId> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(request))
            .or_else(|| self.routes.get(request.path()).cloned())
    }

    /// Resolve a full endpoint string (`/path/?query`)
    #[inline]
    #[must_use]
    pub fn resolve_endpoint(&self, endpoint: &str) -> Option<SnapshotId> {
        self.resolve(&RequestDescriptor::parse(endpoint))
    }

    /// Every id reachable through this rule set, sorted
    #[must_use]
    pub fn known_ids(&self) -> BTreeSet<SnapshotId> {
        self.rules
            .iter()
            .flat_map(VariantRule::ids)
            .chain(self.routes.ids())
            .cloned()
            .collect()
    }

    /// Variant rules in priority order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[VariantRule] {
        &self.rules
    }

    /// Fixed route table
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// Builder for custom [`Resolver`] rule sets
#[derive(Debug, Clone, Default)]
pub struct ResolverBuilder {
    rules: Vec<VariantRule>,
    routes: RouteTable,
}

impl ResolverBuilder {
    /// Append a variant rule; earlier rules take priority
    #[must_use]
    pub fn rule(mut self, rule: VariantRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Register an exact path
    #[must_use]
    pub fn route(mut self, path: impl Into<Cow<'static, str>>, id: SnapshotId) -> Self {
        self.routes.insert(path, id);
        self
    }

    /// Finish the rule set
    #[must_use]
    pub fn build(self) -> Resolver {
        Resolver {
            rules: self.rules,
            routes: self.routes,
        }
    }
}
