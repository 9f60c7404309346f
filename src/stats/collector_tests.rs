//! Unit tests for the statistics collector.

use chrono::NaiveDate;
use http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::StatisticsCollector;
use crate::github::error::StatsError;
use crate::github::fetcher::{FetchMethod, MockHttpFetcher, PageEnvelope, PageRequest};
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::pagination::PageLinks;
use crate::github::rate_limit::RateLimitInfo;
use crate::stats::aggregator::AuthorActivity;
use crate::stats::query::{MetricSelection, QueryParams};
use crate::stats::result::StateCounts;
use crate::stats::window::{DateWindow, FixedClock};

const SECOND_PAGE: &str = "https://api.github.com/repositories/1/pulls?state=open&page=2";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn params(metrics: MetricSelection) -> QueryParams {
    QueryParams::new(
        RepositoryLocator::parse("https://github.com/octo/repo").expect("locator should parse"),
        PersonalAccessToken::new("secret").expect("token should be valid"),
        DateWindow::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))),
        "main".to_owned(),
        metrics,
    )
}

#[fixture]
fn clock() -> FixedClock {
    FixedClock(date(2024, 2, 10))
}

fn page(body: Value, next: Option<&str>) -> Result<PageEnvelope, StatsError> {
    let links = next.map_or_else(PageLinks::default, |target| {
        PageLinks::parse(&format!("<{target}>; rel=\"next\""))
    });
    Ok(PageEnvelope::new(
        Some(body),
        links,
        RateLimitInfo::default(),
        StatusCode::OK,
    ))
}

fn query_value<'request>(request: &'request PageRequest, key: &str) -> Option<&'request str> {
    request
        .query()
        .and_then(|query| query.get(key))
        .map(String::as_str)
}

fn pull(created_at: &str) -> Value {
    json!({"created_at": created_at, "url": "https://api.github.com/repos/octo/repo/pulls/1"})
}

/// Serves the pull request collection: two open pages and one closed page.
fn pull_request_pages(request: &PageRequest) -> Result<PageEnvelope, StatsError> {
    if request.url().as_str() == SECOND_PAGE {
        return page(
            json!([pull("2024-01-25T09:00:00Z"), pull("2023-12-20T09:00:00Z")]),
            None,
        );
    }
    match query_value(request, "state") {
        Some("open") => page(
            json!([pull("2024-01-01T09:00:00Z"), pull("2024-01-20T09:00:00Z")]),
            Some(SECOND_PAGE),
        ),
        Some("closed") => page(
            json!([pull("2024-01-05T09:00:00Z"), pull("2024-02-02T09:00:00Z")]),
            None,
        ),
        other => panic!("unexpected pull request query state {other:?}"),
    }
}

#[rstest]
fn pull_request_buckets_are_fetched_independently(clock: FixedClock) {
    let mut fetcher = MockHttpFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|method, request| {
            *method == FetchMethod::Get
                && (request.url().as_str() == SECOND_PAGE
                    || query_value(request, "base") == Some("main"))
        })
        .times(5)
        .returning(|_, request| pull_request_pages(request));

    let counts = StatisticsCollector::new(&fetcher, clock)
        .pull_request_counts(&params(MetricSelection::default()))
        .expect("counts should be collected");

    assert_eq!(counts, StateCounts::new(3, 1, 1));
}

#[rstest]
fn collect_only_runs_selected_metrics(clock: FixedClock) {
    let mut fetcher = MockHttpFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|_, request| request.url().path() == "/repos/octo/repo/issues")
        .times(3)
        .returning(|_, _| {
            page(
                json!([
                    {"created_at": "2024-01-10T00:00:00Z", "url": "https://api.github.com/repos/octo/repo/issues/1"},
                    {"created_at": "2024-01-11T00:00:00Z", "url": "https://api.github.com/repos/octo/repo/issues/2",
                     "pull_request": {"url": "https://api.github.com/repos/octo/repo/pulls/2"}}
                ]),
                None,
            )
        });

    let result = StatisticsCollector::new(&fetcher, clock)
        .collect(&params(MetricSelection {
            issues: true,
            ..MetricSelection::default()
        }))
        .expect("collection should succeed");

    assert!(result.commit_activity.is_none());
    assert!(result.pull_requests.is_none());
    assert_eq!(result.issues, Some(StateCounts::new(1, 1, 1)));
}

#[rstest]
fn commit_walk_is_windowed_by_branch(clock: FixedClock) {
    let mut fetcher = MockHttpFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|_, request| {
            request.url().path() == "/repos/octo/repo/commits"
                && query_value(request, "sha") == Some("main")
                && query_value(request, "since") == Some("2024-01-01T00:00:00Z")
                && query_value(request, "until") == Some("2024-01-31T23:59:59Z")
        })
        .times(1)
        .returning(|_, _| {
            page(
                json!([
                    {"author": {"login": "bob"}},
                    {"author": {"login": "alice"}},
                    {"author": {"login": "alice"}},
                    {"author": null}
                ]),
                None,
            )
        });

    let tally = StatisticsCollector::new(&fetcher, clock)
        .commit_activity(&params(MetricSelection::default()))
        .expect("tally should be collected");

    assert_eq!(
        tally,
        vec![AuthorActivity::new("alice", 2), AuthorActivity::new("bob", 1)]
    );
}

#[rstest]
fn failing_metric_aborts_the_run(clock: FixedClock) {
    let mut fetcher = MockHttpFetcher::new();
    fetcher
        .expect_fetch()
        .withf(|_, request| request.url().path() == "/repos/octo/repo/commits")
        .returning(|_, _| page(json!([{"author": {"login": "alice"}}]), None));
    fetcher
        .expect_fetch()
        .withf(|_, request| request.url().path() == "/repos/octo/repo/pulls")
        .times(1)
        .returning(|_, _| Err(StatsError::from_status(StatusCode::FORBIDDEN)));

    let result =
        StatisticsCollector::new(&fetcher, clock).collect(&params(MetricSelection::all()));

    assert!(
        matches!(result, Err(StatsError::Http { status: 403, .. })),
        "expected Http 403, got {result:?}"
    );
}
