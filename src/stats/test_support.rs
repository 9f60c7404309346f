//! Builders for provider JSON records used in tests.
//!
//! The shapes carry only the fields the classifier and aggregator read, plus
//! a `number` so fixtures stay distinguishable in failure output.
//!
//! # Examples
//!
//! ```
//! use repostat::stats::test_support::{commit, pull_request};
//!
//! let pull = pull_request(7, "2024-01-15T10:00:00Z");
//! assert_eq!(pull["number"], 7);
//!
//! let change = commit("alice");
//! assert_eq!(change["author"]["login"], "alice");
//! ```

use chrono::{Days, NaiveDate};
use serde_json::{Value, json};

const API_REPO: &str = "https://api.github.com/repos/octo/repo";

/// Pull request record as listed by the pulls endpoint.
#[must_use]
pub fn pull_request(number: u64, created_at: &str) -> Value {
    json!({
        "number": number,
        "url": format!("{API_REPO}/pulls/{number}"),
        "created_at": created_at,
    })
}

/// Genuine issue record as listed by the issues endpoint.
#[must_use]
pub fn issue(number: u64, created_at: &str) -> Value {
    json!({
        "number": number,
        "url": format!("{API_REPO}/issues/{number}"),
        "created_at": created_at,
        "pull_request": null,
    })
}

/// Pull request surfaced through the issues endpoint.
#[must_use]
pub fn issue_for_pull_request(number: u64, created_at: &str) -> Value {
    json!({
        "number": number,
        "url": format!("{API_REPO}/issues/{number}"),
        "created_at": created_at,
        "pull_request": {"url": format!("{API_REPO}/pulls/{number}")},
    })
}

/// Commit record linked to a provider account.
#[must_use]
pub fn commit(login: &str) -> Value {
    json!({
        "sha": format!("{login}-sha"),
        "author": {"login": login},
        "commit": {"author": {"name": login}},
    })
}

/// Commit record whose author has no linked account.
#[must_use]
pub fn commit_without_account(name: &str) -> Value {
    json!({
        "sha": format!("{name}-sha"),
        "author": null,
        "commit": {"author": {"name": name}},
    })
}

/// RFC 3339 timestamp at noon UTC, `days` before `today`.
///
/// Returns `None` if the subtraction leaves the supported calendar range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use repostat::stats::test_support::days_before;
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date");
/// assert_eq!(days_before(today, 40).as_deref(), Some("2024-01-01T12:00:00Z"));
/// ```
#[must_use]
pub fn days_before(today: NaiveDate, days: u64) -> Option<String> {
    today
        .checked_sub_days(Days::new(days))
        .map(|date| format!("{}T12:00:00Z", date.format("%Y-%m-%d")))
}
