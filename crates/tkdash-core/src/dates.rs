//! Date normalization for the heterogeneous date columns in the exports.
//!
//! The Overview export writes `YYYY-MM-DD` while the Content export writes
//! `DD/MM/YY`. Both are parsed into a [`NaiveDate`] before any comparison so
//! that range filters never compare strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when a date string cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("date is empty")]
    Empty,

    #[error("unsupported date format: \"{0}\"")]
    UnsupportedFormat(String),

    #[error("date \"{0}\" is not a valid calendar date")]
    InvalidCalendarDate(String),
}

/// Resolution rule for two-digit years.
///
/// A parsed year below 100 is offset by `base`; with the default base of
/// 2000, `24` becomes `2024` and `99` becomes `2099`. Four-digit years pass
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenturyPolicy {
    base: i32,
}

impl CenturyPolicy {
    pub const DEFAULT_BASE: i32 = 2000;
    /// Largest accepted base; keeps resolved years within four digits.
    pub const MAX_BASE: i32 = 9900;

    /// Builds a policy with the given century base.
    ///
    /// Returns `None` unless `base` is a multiple of 100 in `0..=MAX_BASE`.
    #[must_use]
    pub fn new(base: i32) -> Option<Self> {
        ((0..=Self::MAX_BASE).contains(&base) && base % 100 == 0).then_some(Self { base })
    }

    #[must_use]
    pub fn base(self) -> i32 {
        self.base
    }

    /// Returns `None` if the offset year does not fit in an `i32`.
    #[must_use]
    pub fn resolve(self, year: i32) -> Option<i32> {
        if year < 100 {
            self.base.checked_add(year)
        } else {
            Some(year)
        }
    }
}

impl Default for CenturyPolicy {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
        }
    }
}

/// Parses the supported date shapes into a canonical [`NaiveDate`].
///
/// Accepted inputs (surrounding whitespace ignored):
/// - `YYYY-MM-DD`, optionally followed by a `T...` time part
/// - `DD/MM/YY`
/// - `DD/MM/YYYY`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateNormalizer {
    century: CenturyPolicy,
}

impl DateNormalizer {
    #[must_use]
    pub fn new(century: CenturyPolicy) -> Self {
        Self { century }
    }

    #[must_use]
    pub fn century(&self) -> CenturyPolicy {
        self.century
    }

    /// Normalizes `raw` into a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] when the input is empty, matches none of the
    /// supported shapes, or names a day that does not exist.
    pub fn normalize(&self, raw: &str) -> Result<NaiveDate, DateParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::Empty);
        }

        let (year, month, day) = if let Some((y, m, d)) = split_numeric(date_part(trimmed), '-') {
            (y, m, d)
        } else if let Some((d, m, y)) = split_numeric(trimmed, '/') {
            (y, m, d)
        } else {
            return Err(DateParseError::UnsupportedFormat(trimmed.to_string()));
        };

        let year = i32::try_from(year)
            .map_err(|_| DateParseError::InvalidCalendarDate(trimmed.to_string()))?;

        self.century
            .resolve(year)
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(|| DateParseError::InvalidCalendarDate(trimmed.to_string()))
    }
}

/// Strips an ISO time suffix (`2024-02-15T10:00:00`) down to its date part.
fn date_part(s: &str) -> &str {
    s.split_once('T').map_or(s, |(date, _)| date)
}

/// Splits `s` into exactly three runs of ASCII digits separated by `sep`.
fn split_numeric(s: &str, sep: char) -> Option<(u32, u32, u32)> {
    let mut parts = s.split(sep);
    let a = parse_digits(parts.next()?)?;
    let b = parse_digits(parts.next()?)?;
    let c = parse_digits(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b, c))
}

fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
