//! Blocking HTTP fetcher and the per-response envelope.
//!
//! The fetcher issues exactly one request per call and maps every transport
//! or status failure into [`StatsError`]. Successful responses are returned as
//! a [`PageEnvelope`]: the JSON body (if any) plus the pagination links and
//! rate limit counters read from the headers.

use std::collections::BTreeMap;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::error::StatsError;
use super::pagination::PageLinks;
use super::rate_limit::RateLimitInfo;
use super::record::RawRecord;

/// Default deadline for connecting and for reading a response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP method used for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// Retrieve and deserialise the body.
    Get,
    /// Probe the resource; the body is never read.
    Head,
}

impl FetchMethod {
    fn as_http(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Head => Method::HEAD,
        }
    }
}

/// Descriptor for one page request.
///
/// The query map is only sent with the first page: the provider's `next`
/// links already encode the original parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    url: Url,
    query: Option<BTreeMap<String, String>>,
    headers: HeaderMap,
}

impl PageRequest {
    /// Creates a request without query parameters.
    #[must_use]
    pub const fn new(url: Url, headers: HeaderMap) -> Self {
        Self {
            url,
            query: None,
            headers,
        }
    }

    /// Attaches query parameters to the request.
    #[must_use]
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Absolute request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Query parameters, absent for follow-up pages.
    #[must_use]
    pub const fn query(&self) -> Option<&BTreeMap<String, String>> {
        self.query.as_ref()
    }

    /// Request headers, preserved across pages.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Builds the request for the page behind a `next` link, dropping the
    /// query parameters and keeping the headers.
    ///
    /// Relative links are resolved against the current request URL.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidUrl` when the link cannot be resolved.
    pub fn follow(self, next: &str) -> Result<Self, StatsError> {
        let url = self
            .url
            .join(next)
            .map_err(|error| StatsError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            url,
            query: None,
            headers: self.headers,
        })
    }
}

/// Deserialised body plus out-of-band metadata for one response.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    body: Option<Value>,
    links: PageLinks,
    rate_limit: RateLimitInfo,
    status: StatusCode,
}

impl PageEnvelope {
    /// Assembles an envelope from its parts.
    #[must_use]
    pub const fn new(
        body: Option<Value>,
        links: PageLinks,
        rate_limit: RateLimitInfo,
        status: StatusCode,
    ) -> Self {
        Self {
            body,
            links,
            rate_limit,
            status,
        }
    }

    /// Body parsed as JSON, or `None` when it was absent or not valid JSON.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Pagination links keyed by relation.
    #[must_use]
    pub const fn links(&self) -> &PageLinks {
        &self.links
    }

    /// Rate limit counters reported with the response.
    #[must_use]
    pub const fn rate_limit(&self) -> RateLimitInfo {
        self.rate_limit
    }

    /// Response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Consumes the envelope and returns the records on the page.
    ///
    /// An absent body is an empty page.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Parse` when the body is JSON but not an array.
    pub fn into_records(self) -> Result<Vec<RawRecord>, StatsError> {
        match self.body {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.into_iter().map(RawRecord::new).collect()),
            Some(other) => Err(StatsError::Parse {
                message: format!("expected a JSON array page, got {}", json_kind(&other)),
            }),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Issues single HTTP requests on behalf of the paginator and validation.
#[cfg_attr(test, mockall::automock)]
pub trait HttpFetcher {
    /// Performs one request.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Timeout` or `StatsError::Connect` for transport
    /// failures and `StatsError::Http` for any non-2xx status.
    fn fetch(&self, method: FetchMethod, request: &PageRequest)
    -> Result<PageEnvelope, StatsError>;
}

/// `reqwest`-backed blocking fetcher.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Builds a fetcher whose connect and read deadlines are `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Configuration` when the HTTP client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self, StatsError> {
        let client = Client::builder()
            .user_agent(concat!("repostat/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|error| StatsError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client })
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch(
        &self,
        method: FetchMethod,
        request: &PageRequest,
    ) -> Result<PageEnvelope, StatsError> {
        let mut builder = self
            .client
            .request(method.as_http(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(query) = request.query() {
            builder = builder.query(query);
        }

        let response = builder.send().map_err(|error| map_transport_error(&error))?;
        let status = response.status();
        debug!(%status, url = %request.url(), ?method, "received response");

        if !status.is_success() {
            return Err(StatsError::from_status(status));
        }

        let links = response
            .headers()
            .get(http::header::LINK)
            .and_then(|value| value.to_str().ok())
            .map(PageLinks::parse)
            .unwrap_or_default();
        let rate_limit = RateLimitInfo::from_headers(response.headers());

        let body = match method {
            FetchMethod::Head => None,
            FetchMethod::Get => {
                let text = response.text().map_err(|error| map_transport_error(&error))?;
                serde_json::from_str::<Value>(&text).ok()
            }
        };

        Ok(PageEnvelope::new(body, links, rate_limit, status))
    }
}

fn map_transport_error(error: &reqwest::Error) -> StatsError {
    if error.is_timeout() {
        StatsError::Timeout {
            message: error.to_string(),
        }
    } else {
        StatsError::Connect {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
