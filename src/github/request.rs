//! Construction of authenticated collection requests.
//!
//! Each builder returns the first-page [`PageRequest`] for one collection:
//! the endpoint URL, the provider headers, and the query parameters. Absent
//! optional parameters are omitted from the query rather than sent empty.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue};

use super::error::StatsError;
use super::fetcher::PageRequest;
use super::locator::{Endpoint, PersonalAccessToken, RepositoryLocator};

/// Page size requested from every collection endpoint.
pub const PER_PAGE: u32 = 100;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Lifecycle state filter understood by the pull request and issue
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    /// Only open resources.
    Open,
    /// Only closed resources.
    Closed,
}

impl StateFilter {
    /// Query parameter value for this filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Builds the headers sent with every provider request.
///
/// # Errors
///
/// Returns `StatsError::InvalidHeader` when the token contains characters
/// that cannot appear in a header value.
pub fn provider_headers(token: &PersonalAccessToken) -> Result<HeaderMap, StatsError> {
    let mut headers = HeaderMap::new();
    headers.insert(http::header::ACCEPT, HeaderValue::from_static(ACCEPT_V3));

    let mut authorization = HeaderValue::from_str(&format!("Token {}", token.value())).map_err(
        |error| StatsError::InvalidHeader {
            message: format!("API key cannot be sent as a header: {error}"),
        },
    )?;
    authorization.set_sensitive(true);
    headers.insert(http::header::AUTHORIZATION, authorization);

    Ok(headers)
}

/// Builds the first commit page request for a branch and time window.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` when the endpoint URL cannot be formed.
pub fn commits_request(
    locator: &RepositoryLocator,
    headers: HeaderMap,
    branch: &str,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> Result<PageRequest, StatsError> {
    let mut query = QueryBuilder::default();
    query.push("sha", branch);
    query.push_opt("since", since.map(format_timestamp));
    query.push_opt("until", until.map(format_timestamp));
    query.push("per_page", PER_PAGE);

    let url = locator.endpoint_url(Endpoint::Commits)?;
    Ok(PageRequest::new(url, headers).with_query(query.finish()))
}

/// Builds the first pull request page request targeting `base`.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` when the endpoint URL cannot be formed.
pub fn pull_requests_request(
    locator: &RepositoryLocator,
    headers: HeaderMap,
    state: StateFilter,
    base: &str,
) -> Result<PageRequest, StatsError> {
    let mut query = QueryBuilder::default();
    query.push("state", state.as_str());
    query.push("base", base);
    query.push("per_page", PER_PAGE);

    let url = locator.endpoint_url(Endpoint::PullRequests)?;
    Ok(PageRequest::new(url, headers).with_query(query.finish()))
}

/// Builds the first issue page request.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` when the endpoint URL cannot be formed.
pub fn issues_request(
    locator: &RepositoryLocator,
    headers: HeaderMap,
    state: StateFilter,
) -> Result<PageRequest, StatsError> {
    let mut query = QueryBuilder::default();
    query.push("state", state.as_str());
    query.push("per_page", PER_PAGE);

    let url = locator.endpoint_url(Endpoint::Issues)?;
    Ok(PageRequest::new(url, headers).with_query(query.finish()))
}

fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[derive(Default)]
struct QueryBuilder(BTreeMap<String, String>);

impl QueryBuilder {
    fn push(&mut self, key: &str, value: impl ToString) {
        self.0.insert(key.to_owned(), value.to_string());
    }

    fn push_opt(&mut self, key: &str, value: Option<String>) {
        if let Some(present) = value {
            self.0.insert(key.to_owned(), present);
        }
    }

    fn finish(self) -> BTreeMap<String, String> {
        self.0
    }
}
