//! Repostat library crate providing repository activity statistics.
//!
//! The library validates a repository query, walks the provider's paginated
//! commit, pull request, and issue collections over blocking HTTP, and
//! classifies each record into open, closed, and old buckets inside an
//! optional date window. Errors are mapped into [`StatsError`] so the CLI can
//! report them without exposing transport internals.

pub mod config;
pub mod github;
pub mod stats;
pub mod telemetry;

pub use config::RepostatConfig;
pub use github::{
    HttpFetcher, PersonalAccessToken, RepositoryLocator, ReqwestFetcher, StatsError,
};
pub use stats::{
    QueryInput, QueryParams, ResultSet, StatisticsCollector, SystemClock, validate,
};
