//! Date-range and view-count-range predicates over records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateNormalizer;
use crate::records::{ContentRecord, OverviewRecord};
use crate::CoreError;

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Builds a range from two date strings in any supported format.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] if either bound cannot be normalized.
    pub fn parse(start: &str, end: &str, dates: &DateNormalizer) -> Result<Self, CoreError> {
        Ok(Self {
            start: dates.normalize(start)?,
            end: dates.normalize(end)?,
        })
    }

    /// `true` when `start > end`; such a range matches nothing.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Inclusive range over a record's volume field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRange {
    pub min: u64,
    pub max: u64,
}

impl VolumeRange {
    #[must_use]
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// `true` when `min > max`; such a range matches nothing.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A record that can be range-filtered: it has one date and one designated
/// volume field.
pub trait Volume {
    fn filter_date(&self) -> NaiveDate;
    fn volume(&self) -> u64;
}

impl Volume for OverviewRecord {
    fn filter_date(&self) -> NaiveDate {
        self.date
    }

    fn volume(&self) -> u64 {
        self.video_views
    }
}

impl Volume for ContentRecord {
    fn filter_date(&self) -> NaiveDate {
        self.post_day
    }

    fn volume(&self) -> u64 {
        self.total_views
    }
}

/// Returns the records whose date and volume both fall inside the ranges,
/// in their original order.
///
/// Inverted ranges produce an empty result.
#[must_use]
pub fn filter_records<R>(records: &[R], dates: &DateRange, volume: &VolumeRange) -> Vec<R>
where
    R: Volume + Clone,
{
    if dates.is_inverted() || volume.is_inverted() {
        tracing::debug!(
            ?dates,
            ?volume,
            "inverted filter range; no records can match"
        );
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| dates.contains(r.filter_date()) && volume.contains(r.volume()))
        .cloned()
        .collect()
}
