//! Domain wrapper types for the statistics BDD steps.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Expected number of records, authors, or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordCount(u64);

impl RecordCount {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for RecordCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl fmt::Display for RecordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar day written as `yyyy-mm-dd` in feature files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub(crate) const fn value(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for CalendarDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
