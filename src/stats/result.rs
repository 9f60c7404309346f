//! Aggregated statistics returned to callers.

use serde::Serialize;

use super::aggregator::AuthorActivity;
use super::classifier::Bucket;

/// Open, closed, and old counts for one resource type.
///
/// Open and old are not exclusive: every old record is also open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    /// Open records inside the window.
    pub open: u64,
    /// Closed records inside the window.
    pub closed: u64,
    /// Open records inside the window that are also stale.
    pub old: u64,
}

impl StateCounts {
    /// Creates a set of counts.
    #[must_use]
    pub const fn new(open: u64, closed: u64, old: u64) -> Self {
        Self { open, closed, old }
    }

    /// Stores the count for one bucket.
    pub const fn set(&mut self, bucket: Bucket, count: u64) {
        match bucket {
            Bucket::Open => self.open = count,
            Bucket::Closed => self.closed = count,
            Bucket::Old => self.old = count,
        }
    }
}

/// Statistics for one run; each group is present only when requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Top commit authors, most active first.
    pub commit_activity: Option<Vec<AuthorActivity>>,
    /// Pull request counts targeting the queried branch.
    pub pull_requests: Option<StateCounts>,
    /// Issue counts.
    pub issues: Option<StateCounts>,
}
