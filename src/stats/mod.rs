//! Classification and aggregation of repository activity.
//!
//! Raw user input is checked by [`validate`], which yields immutable
//! [`QueryParams`]. A [`StatisticsCollector`] then walks each requested
//! collection, classifies every record against the date window and the
//! staleness thresholds, and folds the results into a [`ResultSet`].

pub mod aggregator;
pub mod classifier;
pub mod collector;
pub mod query;
pub mod result;
pub mod validation;
pub mod window;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregator::{AuthorActivity, TOP_AUTHORS};
pub use classifier::{Bucket, Classifier, RecordKind};
pub use collector::StatisticsCollector;
pub use query::{DEFAULT_BRANCH, MetricSelection, QueryInput, QueryParams};
pub use result::{ResultSet, StateCounts};
pub use validation::validate;
pub use window::{Clock, DateWindow, FixedClock, SystemClock};
