//! Provider boundary for repository statistics.
//!
//! This module parses repository URLs, builds authenticated collection
//! requests, and walks paginated collections one blocking request at a time.
//! Transport and status failures are mapped into [`StatsError`] so that the
//! statistics layer never sees `reqwest` types.

pub mod error;
pub mod fetcher;
pub mod locator;
pub mod pagination;
pub mod rate_limit;
pub mod record;
pub mod request;

pub use error::StatsError;
pub use fetcher::{
    DEFAULT_TIMEOUT, FetchMethod, HttpFetcher, PageEnvelope, PageRequest, ReqwestFetcher,
};
pub use locator::{
    Endpoint, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use pagination::{PageLinks, Paginator};
pub use rate_limit::RateLimitInfo;
pub use record::RawRecord;
pub use request::{PER_PAGE, StateFilter};

#[cfg(test)]
pub use fetcher::MockHttpFetcher;
