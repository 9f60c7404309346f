//! Inclusive calendar-date windows and the staleness predicate.
//!
//! Dates supplied by the user are timezone-naive calendar days. Bounds are
//! widened to the first and last instant of their day before they are sent
//! to the provider, so a record created at any time on the end date is still
//! inside the window.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::github::error::StatsError;

/// Format accepted for user-supplied dates (`dd.mm.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a user-supplied `dd.mm.yyyy` date.
///
/// # Errors
///
/// Returns `StatsError::Parse` when the text does not match the format or
/// names a day that does not exist.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use repostat::stats::window::parse_date;
///
/// let date = parse_date("31.01.2024").expect("valid date");
/// assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 31), Some(date));
/// assert!(parse_date("2024-01-31").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, StatsError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|error| StatsError::Parse {
        message: format!("'{input}' is not a dd.mm.yyyy date: {error}"),
    })
}

/// Optional inclusive `[begin, end]` calendar-date interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    begin: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateWindow {
    /// Creates a window; either bound may be absent.
    #[must_use]
    pub const fn new(begin: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { begin, end }
    }

    /// Window without bounds; every date is inside.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            begin: None,
            end: None,
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn begin(&self) -> Option<NaiveDate> {
        self.begin
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Start of the begin day, in UTC.
    #[must_use]
    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.begin
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Last whole second of the end day, in UTC.
    #[must_use]
    pub fn until(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .map(|instant| instant.and_utc())
    }

    /// Returns true when `date` lies inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        in_interval(self.begin, self.end, date)
    }
}

/// Returns true iff `begin` is unset or `date >= begin`, and `end` is unset
/// or `date <= end`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use repostat::stats::window::in_interval;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
/// assert!(in_interval(None, None, day));
/// assert!(in_interval(Some(day), Some(day), day));
/// assert!(!in_interval(day.succ_opt(), None, day));
/// ```
#[must_use]
pub fn in_interval(begin: Option<NaiveDate>, end: Option<NaiveDate>, date: NaiveDate) -> bool {
    begin.is_none_or(|lower| date >= lower) && end.is_none_or(|upper| date <= upper)
}

/// Returns true when `created` is more than `threshold_days` away from
/// `today`, in either direction.
///
/// Future-dated records far enough ahead of `today` also count as stale.
#[must_use]
pub fn is_stale(today: NaiveDate, created: NaiveDate, threshold_days: u32) -> bool {
    today.signed_duration_since(created).num_days().abs() > i64::from(threshold_days)
}

/// Source of the current calendar date.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock reading the UTC calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
