//! Rate limit information from provider responses.
//!
//! The provider includes `X-RateLimit-Remaining` and `X-RateLimit-Reset`
//! headers on every response. The pipeline surfaces them on each envelope but
//! never throttles on its own; pacing is left to the caller.

use chrono::{DateTime, Utc};
use http::HeaderMap;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit counters extracted from response headers.
///
/// # Example
///
/// ```
/// use http::HeaderMap;
/// use repostat::github::rate_limit::RateLimitInfo;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-ratelimit-remaining", "4999".parse().expect("valid header"));
/// headers.insert("x-ratelimit-reset", "1700000000".parse().expect("valid header"));
///
/// let info = RateLimitInfo::from_headers(&headers);
/// assert_eq!(info.remaining(), Some(4999));
/// assert!(!info.is_exhausted());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    remaining: Option<u32>,
    reset_at: Option<DateTime<Utc>>,
}

impl RateLimitInfo {
    /// Creates a rate limit snapshot from already-parsed values.
    #[must_use]
    pub const fn new(remaining: Option<u32>, reset_at: Option<DateTime<Utc>>) -> Self {
        Self {
            remaining,
            reset_at,
        }
    }

    /// Reads the rate limit headers, ignoring any that are absent or
    /// malformed.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = header_str(headers, REMAINING_HEADER).and_then(|raw| raw.parse().ok());
        let reset_at = header_str(headers, RESET_HEADER)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0));

        Self {
            remaining,
            reset_at,
        }
    }

    /// Remaining requests in the current window, when reported.
    #[must_use]
    pub const fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Instant at which the window resets, when reported.
    #[must_use]
    pub const fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.reset_at
    }

    /// Returns true if the provider reported zero remaining requests.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }
}

fn header_str<'headers>(headers: &'headers HeaderMap, name: &str) -> Option<&'headers str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
