//! Typed records for the two CSV exports and the row-level parser that
//! produces them.
//!
//! Numeric cells degrade to `0` when they are missing, blank or unparsable;
//! only the date column can reject a row.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates::{DateNormalizer, DateParseError};

/// Header names used by the exports.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const VIDEO_VIEWS: &str = "Video Views";
    pub const PROFILE_VIEWS: &str = "Profile Views";
    pub const LIKES: &str = "Likes";
    pub const COMMENTS: &str = "Comments";
    pub const SHARES: &str = "Shares";

    pub const POST_DAY: &str = "Post day";
    pub const VIDEO_TITLE: &str = "Video title";
    pub const TOTAL_VIDEO_TIME: &str = "Total video time";
    pub const TOTAL_VIEWS: &str = "Total views";
    pub const TOTAL_LIKES: &str = "Total likes";
    pub const TOTAL_COMMENTS: &str = "Total comments";
    pub const TOTAL_SHARES: &str = "Total shares";
    pub const TOTAL_SAVES: &str = "Total saves";
    pub const AVG_WATCH_TIME: &str = "Avg watch time";
    pub const FULL_WATCH_PERCENTAGE: &str = "Full watch percentage";
    pub const NEW_FOLLOWERS: &str = "New followers";
    pub const TAGS1: &str = "tags1";
    pub const TAGS2: &str = "tags2";
}

/// One raw CSV row keyed by (trimmed) header name.
pub type RawRow = HashMap<String, String>;

/// Why a single row could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("row has no value in date column \"{column}\"")]
    MissingDate { column: &'static str },

    #[error("row has an unusable date in column \"{column}\": {source}")]
    InvalidDate {
        column: &'static str,
        raw: String,
        #[source]
        source: DateParseError,
    },
}

/// A rejected row, reported back to the user instead of silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based line number in the source file (the header is line 1).
    pub line: usize,
    pub column: Option<String>,
    pub raw: Option<String>,
    pub message: String,
}

impl RowError {
    #[must_use]
    pub fn from_record_error(line: usize, err: &RecordError) -> Self {
        match err {
            RecordError::MissingDate { column } => Self {
                line,
                column: Some((*column).to_string()),
                raw: None,
                message: err.to_string(),
            },
            RecordError::InvalidDate { column, raw, .. } => Self {
                line,
                column: Some((*column).to_string()),
                raw: Some(raw.clone()),
                message: err.to_string(),
            },
        }
    }
}

/// One day of account-level totals from the Overview export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewRecord {
    pub date: NaiveDate,
    pub video_views: u64,
    pub profile_views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl OverviewRecord {
    /// Parses one Overview row.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the `Date` cell is missing or unparsable.
    pub fn from_row(row: &RawRow, dates: &DateNormalizer) -> Result<Self, RecordError> {
        Ok(Self {
            date: parse_date_cell(row, columns::DATE, dates)?,
            video_views: parse_count(cell(row, columns::VIDEO_VIEWS)),
            profile_views: parse_count(cell(row, columns::PROFILE_VIEWS)),
            likes: parse_count(cell(row, columns::LIKES)),
            comments: parse_count(cell(row, columns::COMMENTS)),
            shares: parse_count(cell(row, columns::SHARES)),
        })
    }
}

/// One published video from the Content export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub post_day: NaiveDate,
    pub video_title: String,
    /// Video duration in seconds.
    pub total_video_time: f64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_saves: u64,
    /// Average watch time in seconds.
    pub avg_watch_time: f64,
    /// Share of viewers who watched to the end, `0..=100`.
    pub full_watch_percentage: f64,
    pub new_followers: u64,
    pub tags1: Option<String>,
    pub tags2: Option<String>,
}

impl ContentRecord {
    /// Parses one Content row.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the `Post day` cell is missing or unparsable.
    pub fn from_row(row: &RawRow, dates: &DateNormalizer) -> Result<Self, RecordError> {
        Ok(Self {
            post_day: parse_date_cell(row, columns::POST_DAY, dates)?,
            video_title: parse_text(cell(row, columns::VIDEO_TITLE)),
            total_video_time: parse_decimal(cell(row, columns::TOTAL_VIDEO_TIME)),
            total_views: parse_count(cell(row, columns::TOTAL_VIEWS)),
            total_likes: parse_count(cell(row, columns::TOTAL_LIKES)),
            total_comments: parse_count(cell(row, columns::TOTAL_COMMENTS)),
            total_shares: parse_count(cell(row, columns::TOTAL_SHARES)),
            total_saves: parse_count(cell(row, columns::TOTAL_SAVES)),
            avg_watch_time: parse_decimal(cell(row, columns::AVG_WATCH_TIME)),
            full_watch_percentage: parse_percentage(cell(row, columns::FULL_WATCH_PERCENTAGE)),
            new_followers: parse_count(cell(row, columns::NEW_FOLLOWERS)),
            tags1: parse_optional_text(cell(row, columns::TAGS1)),
            tags2: parse_optional_text(cell(row, columns::TAGS2)),
        })
    }
}

/// Both collections, held for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub overview: Vec<OverviewRecord>,
    pub content: Vec<ContentRecord>,
}

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str)
}

fn parse_date_cell(
    row: &RawRow,
    column: &'static str,
    dates: &DateNormalizer,
) -> Result<NaiveDate, RecordError> {
    let raw = cell(row, column)
        .filter(|s| !s.trim().is_empty())
        .ok_or(RecordError::MissingDate { column })?;
    dates
        .normalize(raw)
        .map_err(|source| RecordError::InvalidDate {
            column,
            raw: raw.to_string(),
            source,
        })
}

/// Removes thousands separators and surrounding whitespace.
fn strip_separators(raw: &str) -> String {
    raw.trim().chars().filter(|&c| c != ',').collect()
}

/// Parses a non-negative integer count. Missing, blank or invalid text is `0`.
#[must_use]
pub fn parse_count(raw: Option<&str>) -> u64 {
    raw.map(strip_separators)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Parses a decimal value such as a duration in seconds. Missing, blank,
/// invalid or non-finite text is `0.0`.
#[must_use]
pub fn parse_decimal(raw: Option<&str>) -> f64 {
    raw.map(strip_separators)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parses a percentage cell like `"45.3%"` into `45.3`, clamped to
/// `0.0..=100.0`.
#[must_use]
pub fn parse_percentage(raw: Option<&str>) -> f64 {
    parse_decimal(raw.map(|s| {
        let s = s.trim();
        s.strip_suffix('%').unwrap_or(s)
    }))
    .clamp(0.0, 100.0)
}

#[must_use]
pub fn parse_text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

fn parse_optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
