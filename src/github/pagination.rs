//! Link-header pagination over provider collections.
//!
//! [`Paginator`] walks a collection by following the `next` relation of each
//! response until none is present. It is a forward-only cursor: every call to
//! [`Paginator::fetch_next_page`] performs exactly one blocking request, and
//! nothing is fetched ahead of what the caller consumes. The iterator view
//! yields records one at a time and returns a fetch error once, after every
//! record from earlier pages, and then ends.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::error::StatsError;
use super::fetcher::{FetchMethod, HttpFetcher, PageRequest};
use super::record::RawRecord;

/// Pagination links of one response, keyed by lower-cased relation name.
///
/// # Example
///
/// ```
/// use repostat::github::pagination::PageLinks;
///
/// let links = PageLinks::parse(
///     r#"<https://api.github.com/repositories/1/pulls?page=2>; rel="next", <https://api.github.com/repositories/1/pulls?page=5>; rel="last""#,
/// );
/// assert_eq!(links.next(), Some("https://api.github.com/repositories/1/pulls?page=2"));
/// assert_eq!(links.get("last"), Some("https://api.github.com/repositories/1/pulls?page=5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks(BTreeMap<String, String>);

impl PageLinks {
    /// Parses an RFC 8288 `Link` header value.
    ///
    /// Entries without a target or a `rel` parameter are skipped. When a
    /// relation appears more than once the first target wins.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut links = BTreeMap::new();

        for entry in header.split(',') {
            let Some((target, params)) = entry
                .trim()
                .strip_prefix('<')
                .and_then(|rest| rest.split_once('>'))
            else {
                continue;
            };

            for param in params.split(';') {
                let Some((key, value)) = param.trim().split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                for relation in value.trim().trim_matches('"').split_whitespace() {
                    links
                        .entry(relation.to_ascii_lowercase())
                        .or_insert_with(|| target.to_owned());
                }
            }
        }

        Self(links)
    }

    /// Target of the named relation.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&str> {
        self.0.get(relation).map(String::as_str)
    }

    /// Target of the `next` relation, absent on the last page.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get("next")
    }

    /// Returns true when the response carried no usable links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lazy, forward-only walk over every record of a paginated collection.
pub struct Paginator<'fetcher, F>
where
    F: HttpFetcher + ?Sized,
{
    fetcher: &'fetcher F,
    next_request: Option<Result<PageRequest, StatsError>>,
    buffered: std::vec::IntoIter<RawRecord>,
    pages_fetched: usize,
}

impl<'fetcher, F> Paginator<'fetcher, F>
where
    F: HttpFetcher + ?Sized,
{
    /// Starts a walk at the first page described by `request`.
    #[must_use]
    pub fn new(fetcher: &'fetcher F, request: PageRequest) -> Self {
        Self {
            fetcher,
            next_request: Some(Ok(request)),
            buffered: Vec::new().into_iter(),
            pages_fetched: 0,
        }
    }

    /// Returns true while another page remains to be fetched.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_request.is_some()
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches the next page and returns its records, or `None` once the
    /// collection is exhausted.
    ///
    /// After an error the cursor is finished and further calls return
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates any fetch failure and a `Parse` error for a non-array page.
    /// A `next` link that cannot be resolved is reported by the call after
    /// the page that carried it, so that page's records are still returned.
    pub fn fetch_next_page(&mut self) -> Result<Option<Vec<RawRecord>>, StatsError> {
        let Some(pending) = self.next_request.take() else {
            return Ok(None);
        };
        let request = pending?;

        let envelope = self.fetcher.fetch(FetchMethod::Get, &request)?;
        self.pages_fetched += 1;

        let next_link = envelope.links().next().map(ToOwned::to_owned);
        let rate_limit = envelope.rate_limit();
        if rate_limit.is_exhausted() {
            warn!(
                url = %request.url(),
                reset_at = ?rate_limit.reset_at(),
                "rate limit exhausted; later requests will be rejected until the reset"
            );
        }
        let records = envelope.into_records()?;

        debug!(
            url = %request.url(),
            page = self.pages_fetched,
            records = records.len(),
            rate_limit_remaining = ?rate_limit.remaining(),
            has_next = next_link.is_some(),
            "fetched page"
        );

        self.next_request = next_link.map(|next| request.follow(&next));

        Ok(Some(records))
    }
}

impl<F> Iterator for Paginator<'_, F>
where
    F: HttpFetcher + ?Sized,
{
    type Item = Result<RawRecord, StatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffered.next() {
                return Some(Ok(record));
            }

            match self.fetch_next_page() {
                Ok(Some(records)) => self.buffered = records.into_iter(),
                Ok(None) => return None,
                Err(error) => return Some(Err(error)),
            }
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
