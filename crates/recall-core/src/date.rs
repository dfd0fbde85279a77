//! Calendar types for practice days and months.
//!
//! Both types parse strictly (zero-padded, fixed width) so that their string
//! forms sort lexicographically in calendar order and match the keys already
//! written by earlier clients.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A calendar date in `YYYY-MM-DD` form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PracticeDate(NaiveDate);

impl PracticeDate {
    /// Wrap a chrono date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The month this date falls in.
    #[must_use]
    pub fn month(&self) -> Month {
        Month {
            year: self.0.year(),
            month: self.0.month(),
        }
    }

    /// The day before. `None` before 0000-01-01, which has no four-digit form.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.0
            .checked_sub_days(Days::new(1))
            .filter(|d| d.year() >= 0)
            .map(Self)
    }
}

impl FromStr for PracticeDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDate(s.to_string());
        if !fixed_width_digits(s, &[4, 7]) || s.len() != 10 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for PracticeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Debug for PracticeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PracticeDate({self})")
    }
}

impl TryFrom<String> for PracticeDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PracticeDate> for String {
    fn from(date: PracticeDate) -> Self {
        date.to_string()
    }
}

/// A calendar month in `YYYY-MM` form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    // Field order matters: derived `Ord` compares year first.
    year: i32,
    month: u32,
}

impl Month {
    /// Build a month from its parts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidMonth` if `month` is not 1..=12 or the
    /// year does not fit in four digits.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(ValidationError::InvalidMonth(format!("{year:04}-{month:02}")))
        }
    }

    /// The following month, rolling December over into January.
    #[must_use]
    pub const fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of months from `start` to `end`, both inclusive. Zero when
    /// `start > end`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count(start: Self, end: Self) -> usize {
        let months = i64::from(end.year - start.year) * 12 + i64::from(end.month)
            - i64::from(start.month)
            + 1;
        months.max(0) as usize
    }

    /// Every month from `start` to `end`, both inclusive. Empty when
    /// `start > end`.
    #[must_use]
    pub fn span(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.next();
        }
        months
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth(s.to_string());
        if s.len() != 7 || !fixed_width_digits(s, &[4]) {
            return Err(invalid());
        }
        let year = s[..4].parse().map_err(|_| invalid())?;
        let month = s[5..].parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Debug for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Month({self})")
    }
}

impl TryFrom<String> for Month {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// ASCII digits everywhere except `-` at the given byte offsets.
fn fixed_width_digits(s: &str, dashes: &[usize]) -> bool {
    s.bytes().enumerate().all(|(i, b)| {
        if dashes.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_digit()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> PracticeDate {
        s.parse().unwrap()
    }

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    #[test]
    fn date_parse_and_display() {
        let d = date("2024-03-01");
        assert_eq!(d.to_string(), "2024-03-01");
        assert_eq!(d.month(), month("2024-03"));
    }

    #[test]
    fn date_rejects_unpadded_and_impossible_values() {
        for bad in ["2024-3-01", "2024-03-1", "2024-02-30", "24-03-01", "2024/03/01", ""] {
            assert!(bad.parse::<PracticeDate>().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn date_order_matches_string_order() {
        let mut typed = vec![date("2024-10-02"), date("2023-12-31"), date("2024-02-09")];
        let mut strings: Vec<String> = typed.iter().map(ToString::to_string).collect();
        typed.sort();
        strings.sort();
        let typed: Vec<String> = typed.iter().map(ToString::to_string).collect();
        assert_eq!(typed, strings);
    }

    #[test]
    fn previous_crosses_month_and_year() {
        assert_eq!(date("2024-03-01").previous(), Some(date("2024-02-29")));
        assert_eq!(date("2024-01-01").previous(), Some(date("2023-12-31")));
    }

    #[test]
    fn previous_stops_at_year_zero() {
        assert_eq!(date("0000-01-02").previous(), Some(date("0000-01-01")));
        assert_eq!(date("0000-01-01").previous(), None);
    }

    #[test]
    fn month_parse_rejects_out_of_range() {
        assert!("2024-13".parse::<Month>().is_err());
        assert!("2024-00".parse::<Month>().is_err());
        assert!("2024-1".parse::<Month>().is_err());
    }

    #[test]
    fn month_next_wraps_december() {
        assert_eq!(month("2023-12").next(), month("2024-01"));
        assert_eq!(month("2024-09").next(), month("2024-10"));
    }

    #[test]
    fn month_span_is_inclusive() {
        let span = Month::span(month("2023-11"), month("2024-02"));
        let names: Vec<String> = span.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["2023-11", "2023-12", "2024-01", "2024-02"]);

        assert_eq!(Month::span(month("2024-02"), month("2024-02")).len(), 1);
        assert!(Month::span(month("2024-03"), month("2024-02")).is_empty());
    }

    #[test]
    fn month_count_matches_span() {
        for (a, b) in [("2023-11", "2024-02"), ("2024-02", "2024-02"), ("2024-03", "2024-02")] {
            assert_eq!(
                Month::count(month(a), month(b)),
                Month::span(month(a), month(b)).len()
            );
        }
        assert_eq!(Month::count(month("0000-01"), month("9999-12")), 120_000);
    }

    #[test]
    fn serde_uses_string_forms() {
        let json = serde_json::to_string(&date("2024-03-01")).unwrap();
        assert_eq!(json, "\"2024-03-01\"");
        let parsed: Month = serde_json::from_str("\"2024-03\"").unwrap();
        assert_eq!(parsed, month("2024-03"));
        assert!(serde_json::from_str::<PracticeDate>("\"2024-3-1\"").is_err());
    }
}
