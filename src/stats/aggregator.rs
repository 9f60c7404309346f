//! Folding record streams into author tallies and scalar counts.
//!
//! Both folds consume a fallible record stream and stop at the first error,
//! so a failed page fails the whole metric rather than truncating it.

use std::collections::HashMap;

use serde::Serialize;

use super::classifier::Classifier;
use crate::github::error::StatsError;
use crate::github::record::RawRecord;

/// Number of authors kept in a commit tally.
pub const TOP_AUTHORS: usize = 30;

/// Commit count for one author login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorActivity {
    /// Provider login of the author.
    pub author: String,
    /// Commits attributed to the author.
    pub commits: u64,
}

impl AuthorActivity {
    /// Creates an entry.
    #[must_use]
    pub fn new(author: impl Into<String>, commits: u64) -> Self {
        Self {
            author: author.into(),
            commits,
        }
    }
}

/// Tallies commits per author login.
///
/// Commits without a linked author account are skipped. The result is sorted
/// by descending count, ties keep first-encountered order, and only the top
/// [`TOP_AUTHORS`] entries are returned.
///
/// # Errors
///
/// Returns the first error produced by the stream.
///
/// # Example
///
/// ```
/// use repostat::github::RawRecord;
/// use repostat::stats::aggregator::{AuthorActivity, tally_authors};
/// use serde_json::json;
///
/// let commits = ["bob", "alice", "bob"]
///     .map(|login| Ok(RawRecord::new(json!({"author": {"login": login}}))));
///
/// let tally = tally_authors(commits).expect("no errors in stream");
/// assert_eq!(tally, vec![AuthorActivity::new("bob", 2), AuthorActivity::new("alice", 1)]);
/// ```
pub fn tally_authors<I>(records: I) -> Result<Vec<AuthorActivity>, StatsError>
where
    I: IntoIterator<Item = Result<RawRecord, StatsError>>,
{
    let mut tally: Vec<AuthorActivity> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in records {
        let record = item?;
        let Some(login) = record.author_login() else {
            continue;
        };

        if let Some(entry) = positions
            .get(login)
            .and_then(|&position| tally.get_mut(position))
        {
            entry.commits += 1;
        } else {
            positions.insert(login.to_owned(), tally.len());
            tally.push(AuthorActivity::new(login, 1));
        }
    }

    tally.sort_by(|left, right| right.commits.cmp(&left.commits));
    tally.truncate(TOP_AUTHORS);
    Ok(tally)
}

/// Counts the records the classifier accepts.
///
/// # Errors
///
/// Returns the first error produced by the stream or the classifier.
pub fn count_matching<I>(records: I, classifier: &Classifier) -> Result<u64, StatsError>
where
    I: IntoIterator<Item = Result<RawRecord, StatsError>>,
{
    records.into_iter().try_fold(0_u64, |count, item| {
        let accepted = classifier.accepts(&item?)?;
        Ok(count + u64::from(accepted))
    })
}
