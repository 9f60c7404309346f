//! Per-record classification for pull request and issue counts.
//!
//! A record passes when its creation date lies inside the query window, it is
//! a genuine issue (for the issues endpoint), and, for the old bucket, it is
//! stale. Records without `created_at` never pass.

use chrono::{DateTime, NaiveDate};

use super::window::{DateWindow, is_stale};
use crate::github::error::StatsError;
use crate::github::record::RawRecord;
use crate::github::request::StateFilter;

/// Resource type being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Pull requests from the pulls endpoint.
    PullRequest,
    /// Issues from the issues endpoint, which also lists pull requests.
    Issue,
}

impl RecordKind {
    /// Age in days beyond which an open record counts as old.
    #[must_use]
    pub const fn stale_after_days(self) -> u32 {
        match self {
            Self::PullRequest => 30,
            Self::Issue => 14,
        }
    }

    /// Label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PullRequest => "pull requests",
            Self::Issue => "issues",
        }
    }
}

/// Count bucket a fetch contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Open records.
    Open,
    /// Closed records.
    Closed,
    /// Open records that are also stale.
    Old,
}

impl Bucket {
    /// All buckets, in report order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Closed, Self::Old];

    /// Provider state filter used to fetch this bucket.
    ///
    /// The old bucket is a subset of the open collection.
    #[must_use]
    pub const fn state(self) -> StateFilter {
        match self {
            Self::Open | Self::Old => StateFilter::Open,
            Self::Closed => StateFilter::Closed,
        }
    }

    /// Label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Old => "old",
        }
    }
}

/// What an issue-endpoint record's `url` says it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResourcePath {
    Issue,
    PullRequest,
}

fn resource_path(record: &RawRecord) -> Result<ResourcePath, StatsError> {
    let url = record.url().ok_or_else(|| StatsError::Parse {
        message: "issue record has no url".to_owned(),
    })?;
    if url.contains("/issues/") {
        Ok(ResourcePath::Issue)
    } else if url.contains("/pulls/") {
        Ok(ResourcePath::PullRequest)
    } else {
        Err(StatsError::Parse {
            message: format!("cannot tell whether {url} is an issue or a pull request"),
        })
    }
}

/// Parses the record's `created_at` into a calendar date.
///
/// # Errors
///
/// Returns `StatsError::Parse` when the field is present but is not an
/// RFC 3339 timestamp.
pub fn created_date(record: &RawRecord) -> Result<Option<NaiveDate>, StatsError> {
    record
        .created_at()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|instant| instant.date_naive())
                .map_err(|error| StatsError::Parse {
                    message: format!("created_at '{raw}' is not an RFC 3339 timestamp: {error}"),
                })
        })
        .transpose()
}

/// Predicate deciding whether a record counts towards one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    kind: RecordKind,
    bucket: Bucket,
    window: DateWindow,
    today: NaiveDate,
}

impl Classifier {
    /// Builds a classifier; `today` anchors the staleness check.
    #[must_use]
    pub const fn new(
        kind: RecordKind,
        bucket: Bucket,
        window: DateWindow,
        today: NaiveDate,
    ) -> Self {
        Self {
            kind,
            bucket,
            window,
            today,
        }
    }

    /// Returns true when the record counts towards this bucket.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Parse` for a malformed `created_at`, or for an
    /// issue record whose `url` is neither an issue nor a pull request path.
    pub fn accepts(&self, record: &RawRecord) -> Result<bool, StatsError> {
        let Some(created) = created_date(record)? else {
            return Ok(false);
        };

        if self.kind == RecordKind::Issue
            && resource_path(record)? == ResourcePath::Issue
            && record.has_pull_request()
        {
            return Ok(false);
        }

        if !self.window.contains(created) {
            return Ok(false);
        }

        if self.bucket == Bucket::Old {
            return Ok(is_stale(self.today, created, self.kind.stale_after_days()));
        }

        Ok(true)
    }
}
