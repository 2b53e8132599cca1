// Calendar month identifiers in "YYYY-MM" form.
//
// Purpose
// - Parse month strings and order them chronologically.
//
// Notes
// - Parsing only checks the shape. "2024-13" parses to (2024, 13); calendar validation is left
//   to callers.
// - A malformed string is never coerced into a month. When used as a sort key it compares as
//   earlier than every valid month, and equal to any other malformed string.

use chrono::{Datelike, Local};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthKeyError {
    #[error("malformed month key {0:?}, expected YYYY-MM")]
    Malformed(String),
}

/// A `(year, month)` pair. Ordering is lexicographic on the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Accepts exactly four ASCII digits, a dash, then two ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return None;
        }
        let (year, month) = (&text[..4], &text[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            year: year.parse().ok()?,
            month: month.parse().ok()?,
        })
    }

    pub fn from_date(date: impl Datelike) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The month of the local wall clock.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MonthKeyError::Malformed(s.to_string()))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Orders two raw month strings. Malformed strings sort before every valid key.
pub fn compare_month_strs(a: &str, b: &str) -> Ordering {
    MonthKey::parse(a).cmp(&MonthKey::parse(b))
}
