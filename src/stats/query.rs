//! Raw query input and the validated, immutable query parameters.

use chrono::NaiveDate;

use super::window::DateWindow;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

/// Branch queried when none is supplied.
pub const DEFAULT_BRANCH: &str = "master";

/// Which metric groups a run collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricSelection {
    /// Collect the commit author tally.
    pub commits: bool,
    /// Collect pull request counts.
    pub pull_requests: bool,
    /// Collect issue counts.
    pub issues: bool,
}

impl MetricSelection {
    /// Every metric group enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            commits: true,
            pull_requests: true,
            issues: true,
        }
    }

    /// Returns true when no metric group is enabled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.commits || self.pull_requests || self.issues)
    }

    /// Enables every group when none was requested explicitly.
    #[must_use]
    pub const fn or_all(self) -> Self {
        if self.is_empty() { Self::all() } else { self }
    }
}

/// User input exactly as supplied, before any check has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    /// Repository web URL.
    pub url: String,
    /// API key.
    pub token: PersonalAccessToken,
    /// Optional `dd.mm.yyyy` lower bound.
    pub begin_date: Option<String>,
    /// Optional `dd.mm.yyyy` upper bound.
    pub end_date: Option<String>,
    /// Target branch.
    pub branch: String,
    /// Requested metric groups.
    pub metrics: MetricSelection,
}

impl QueryInput {
    /// Creates input for `url` on the default branch with every metric
    /// selected and no date bounds.
    #[must_use]
    pub fn new(url: impl Into<String>, token: PersonalAccessToken) -> Self {
        Self {
            url: url.into(),
            token,
            begin_date: None,
            end_date: None,
            branch: DEFAULT_BRANCH.to_owned(),
            metrics: MetricSelection::all(),
        }
    }
}

/// Validated parameters for one statistics run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    locator: RepositoryLocator,
    token: PersonalAccessToken,
    window: DateWindow,
    branch: String,
    metrics: MetricSelection,
}

impl QueryParams {
    pub(crate) const fn new(
        locator: RepositoryLocator,
        token: PersonalAccessToken,
        window: DateWindow,
        branch: String,
        metrics: MetricSelection,
    ) -> Self {
        Self {
            locator,
            token,
            window,
            branch,
            metrics,
        }
    }

    /// Repository being queried.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    /// API key sent with every request.
    #[must_use]
    pub const fn token(&self) -> &PersonalAccessToken {
        &self.token
    }

    /// Inclusive creation-date window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    /// Lower window bound.
    #[must_use]
    pub const fn begin(&self) -> Option<NaiveDate> {
        self.window.begin()
    }

    /// Upper window bound.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.window.end()
    }

    /// Target branch.
    #[must_use]
    pub const fn branch(&self) -> &str {
        self.branch.as_str()
    }

    /// Requested metric groups.
    #[must_use]
    pub const fn metrics(&self) -> MetricSelection {
        self.metrics
    }
}
