//! Statistics facade running every requested metric fetch.
//!
//! Each bucket of each metric is an independent paginated walk. Metrics run
//! one after another on the calling thread; the first failing page aborts the
//! whole run.

use tracing::info;

use super::aggregator::{AuthorActivity, count_matching, tally_authors};
use super::classifier::{Bucket, Classifier, RecordKind};
use super::query::QueryParams;
use super::result::{ResultSet, StateCounts};
use super::window::Clock;
use crate::github::error::StatsError;
use crate::github::fetcher::{HttpFetcher, PageRequest};
use crate::github::pagination::Paginator;
use crate::github::request::{
    commits_request, issues_request, provider_headers, pull_requests_request,
};

/// Collects repository statistics through a fetcher.
///
/// # Example
///
/// ```no_run
/// use repostat::github::{DEFAULT_TIMEOUT, PersonalAccessToken, ReqwestFetcher};
/// use repostat::stats::{QueryInput, StatisticsCollector, SystemClock, validate};
///
/// # fn main() -> Result<(), repostat::StatsError> {
/// let token = PersonalAccessToken::new("ghp_example")?;
/// let fetcher = ReqwestFetcher::new(DEFAULT_TIMEOUT)?;
/// let params = validate(&QueryInput::new("https://github.com/octo/repo", token), &fetcher)?;
/// let result = StatisticsCollector::new(&fetcher, SystemClock).collect(&params)?;
/// println!("{result:?}");
/// # Ok(())
/// # }
/// ```
pub struct StatisticsCollector<'client, Fetcher, Today>
where
    Fetcher: HttpFetcher + ?Sized,
    Today: Clock,
{
    client: &'client Fetcher,
    clock: Today,
}

impl<'client, Fetcher, Today> StatisticsCollector<'client, Fetcher, Today>
where
    Fetcher: HttpFetcher + ?Sized,
    Today: Clock,
{
    /// Create a collector; `clock` anchors the old-bucket staleness check.
    #[must_use]
    pub const fn new(client: &'client Fetcher, clock: Today) -> Self {
        Self { client, clock }
    }

    /// Runs every metric group selected in `params`.
    ///
    /// # Errors
    ///
    /// Propagates the first fetch, status, or parse failure; metrics computed
    /// before the failure are discarded.
    pub fn collect(&self, params: &QueryParams) -> Result<ResultSet, StatsError> {
        let metrics = params.metrics();
        let mut result = ResultSet::default();

        if metrics.commits {
            result.commit_activity = Some(self.commit_activity(params)?);
        }
        if metrics.pull_requests {
            result.pull_requests = Some(self.pull_request_counts(params)?);
        }
        if metrics.issues {
            result.issues = Some(self.issue_counts(params)?);
        }

        Ok(result)
    }

    /// Top commit authors on the queried branch inside the window.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the commit walk.
    pub fn commit_activity(&self, params: &QueryParams) -> Result<Vec<AuthorActivity>, StatsError> {
        info!(branch = params.branch(), "collecting commit activity");
        let window = params.window();
        let request = commits_request(
            params.locator(),
            provider_headers(params.token())?,
            params.branch(),
            window.since(),
            window.until(),
        )?;

        let tally = tally_authors(Paginator::new(self.client, request))?;
        info!(authors = tally.len(), "collected commit activity");
        Ok(tally)
    }

    /// Open, closed, and old pull requests targeting the queried branch.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the three pull request walks.
    pub fn pull_request_counts(&self, params: &QueryParams) -> Result<StateCounts, StatsError> {
        self.state_counts(params, RecordKind::PullRequest, |bucket| {
            pull_requests_request(
                params.locator(),
                provider_headers(params.token())?,
                bucket.state(),
                params.branch(),
            )
        })
    }

    /// Open, closed, and old issues, excluding pull requests.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the three issue walks, including a `Parse`
    /// error for a record that is neither an issue nor a pull request.
    pub fn issue_counts(&self, params: &QueryParams) -> Result<StateCounts, StatsError> {
        self.state_counts(params, RecordKind::Issue, |bucket| {
            issues_request(
                params.locator(),
                provider_headers(params.token())?,
                bucket.state(),
            )
        })
    }

    fn state_counts(
        &self,
        params: &QueryParams,
        kind: RecordKind,
        request_for: impl Fn(Bucket) -> Result<PageRequest, StatsError>,
    ) -> Result<StateCounts, StatsError> {
        let today = self.clock.today();
        let mut counts = StateCounts::default();

        for bucket in Bucket::ALL {
            info!(kind = kind.label(), bucket = bucket.label(), "counting");
            let classifier = Classifier::new(kind, bucket, params.window(), today);
            let paginator = Paginator::new(self.client, request_for(bucket)?);
            let count = count_matching(paginator, &classifier)?;
            info!(kind = kind.label(), bucket = bucket.label(), count, "counted");
            counts.set(bucket, count);
        }

        Ok(counts)
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
