//! Pre-flight checks run before any metric is fetched.
//!
//! Every check runs even when an earlier one fails, and all failures are
//! returned together as one [`StatsError::Validation`]. Transport failures
//! are not validation findings: a timeout or refused connection aborts the
//! checks and is returned as-is.

use chrono::NaiveDate;
use http::{HeaderMap, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::query::{QueryInput, QueryParams};
use super::window::{DATE_FORMAT, DateWindow, parse_date};
use crate::github::error::StatsError;
use crate::github::fetcher::{FetchMethod, HttpFetcher, PageRequest};
use crate::github::locator::{Endpoint, RepositoryLocator, api_base_or_default, rate_limit_url};
use crate::github::request::provider_headers;

/// Checks the raw input and builds the immutable query parameters.
///
/// The checks are: the repository URL answers a HEAD probe with 200, the API
/// key is accepted by the rate limit endpoint, each supplied date parses as
/// `dd.mm.yyyy` (and begin is not after end), and the branch exists.
///
/// # Errors
///
/// Returns `StatsError::Validation` listing every failed check, or the
/// transport error that interrupted a probe.
pub fn validate<F>(input: &QueryInput, fetcher: &F) -> Result<QueryParams, StatsError>
where
    F: HttpFetcher + ?Sized,
{
    let mut findings = Findings::default();

    let locator = match RepositoryLocator::parse(&input.url) {
        Ok(parsed) => {
            let outcome = probe(fetcher, parsed.html_url().clone(), HeaderMap::new())?;
            findings.check(outcome, |reason| {
                format!("repository URL {} is not reachable: {reason}", input.url)
            });
            Some(parsed)
        }
        Err(error) => {
            findings.push(error.to_string());
            None
        }
    };

    let headers = match provider_headers(&input.token) {
        Ok(built) => Some(built),
        Err(error) => {
            findings.push(error.to_string());
            None
        }
    };

    if let Some(auth) = &headers {
        let rate_limit = locator.as_ref().map_or_else(
            || api_base_or_default(&input.url).and_then(|api_base| rate_limit_url(&api_base)),
            |found| found.endpoint_url(Endpoint::RateLimit),
        )?;
        let outcome = probe(fetcher, rate_limit, auth.clone())?;
        findings.check(outcome, |reason| format!("API key was rejected: {reason}"));
    }

    let begin = findings.date("begin", input.begin_date.as_deref());
    let end = findings.date("end", input.end_date.as_deref());
    if let (Some(lower), Some(upper)) = (begin, end)
        && lower > upper
    {
        findings.push(format!(
            "begin date {} is after end date {}",
            lower.format(DATE_FORMAT),
            upper.format(DATE_FORMAT)
        ));
    }

    if let (Some(found), Some(auth)) = (&locator, &headers) {
        let branch_url = found.endpoint_url(Endpoint::Branch(&input.branch))?;
        let outcome = probe(fetcher, branch_url, auth.clone())?;
        findings.check(outcome, |reason| {
            format!("branch '{}' was not found: {reason}", input.branch)
        });
    }

    match (findings.finish(), locator) {
        (Ok(()), Some(found)) => Ok(QueryParams::new(
            found,
            input.token.clone(),
            DateWindow::new(begin, end),
            input.branch.clone(),
            input.metrics.or_all(),
        )),
        (Err(error), _) => Err(error),
        (Ok(()), None) => Err(StatsError::Validation {
            messages: vec![format!("repository URL {} is invalid", input.url)],
        }),
    }
}

/// Outcome of one HEAD probe: `None` on success, or the failure reason.
type ProbeOutcome = Option<String>;

fn probe<F>(fetcher: &F, url: Url, headers: HeaderMap) -> Result<ProbeOutcome, StatsError>
where
    F: HttpFetcher + ?Sized,
{
    let request = PageRequest::new(url, headers);
    match fetcher.fetch(FetchMethod::Head, &request) {
        Ok(envelope) if envelope.status() == StatusCode::OK => {
            debug!(url = %request.url(), "probe succeeded");
            Ok(None)
        }
        Ok(envelope) => Ok(Some(format!(
            "expected status 200, got {}",
            envelope.status().as_u16()
        ))),
        Err(StatsError::Http { message, .. }) => Ok(Some(message)),
        Err(other) => Err(other),
    }
}

#[derive(Default)]
struct Findings(Vec<String>);

impl Findings {
    fn push(&mut self, message: String) {
        warn!(%message, "validation check failed");
        self.0.push(message);
    }

    fn check(&mut self, outcome: ProbeOutcome, describe: impl FnOnce(&str) -> String) {
        if let Some(reason) = outcome {
            self.push(describe(&reason));
        }
    }

    fn date(&mut self, label: &str, raw: Option<&str>) -> Option<NaiveDate> {
        let text = raw?;
        match parse_date(text) {
            Ok(date) => Some(date),
            Err(_) => {
                self.push(format!("{label} date '{text}' must use the dd.mm.yyyy format"));
                None
            }
        }
    }

    fn finish(self) -> Result<(), StatsError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(StatsError::Validation { messages: self.0 })
        }
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
