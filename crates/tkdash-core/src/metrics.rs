//! Per-video ratios derived from the Content export.

use serde::{Deserialize, Serialize};

use crate::records::ContentRecord;

/// Engagement and watch-time percentages for one video.
///
/// A zero denominator yields `0.0` with the matching `*_undefined` flag set,
/// so downstream charts never see `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub engagement_percent: f64,
    pub watch_time_percent: f64,
    /// Set when `total_views` is zero.
    pub engagement_undefined: bool,
    /// Set when `total_video_time` is zero.
    pub watch_time_undefined: bool,
}

impl DerivedMetrics {
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.engagement_undefined || self.watch_time_undefined
    }
}

/// Sum of likes, comments, shares and saves.
#[must_use]
pub fn interactions(record: &ContentRecord) -> u64 {
    record
        .total_likes
        .saturating_add(record.total_comments)
        .saturating_add(record.total_shares)
        .saturating_add(record.total_saves)
}

/// `(likes + comments + shares + saves) / views * 100`, or `0.0` without views.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_percent(record: &ContentRecord) -> f64 {
    if record.total_views == 0 {
        return 0.0;
    }
    interactions(record) as f64 / record.total_views as f64 * 100.0
}

/// `avg_watch_time / total_video_time * 100`, or `0.0` for a zero-length video.
#[must_use]
pub fn watch_time_percent(record: &ContentRecord) -> f64 {
    if record.total_video_time == 0.0 {
        return 0.0;
    }
    record.avg_watch_time / record.total_video_time * 100.0
}

#[must_use]
pub fn derive_metrics(record: &ContentRecord) -> DerivedMetrics {
    let metrics = DerivedMetrics {
        engagement_percent: engagement_percent(record),
        watch_time_percent: watch_time_percent(record),
        engagement_undefined: record.total_views == 0,
        watch_time_undefined: record.total_video_time == 0.0,
    };
    if metrics.is_flagged() {
        tracing::debug!(
            title = %record.video_title,
            engagement_undefined = metrics.engagement_undefined,
            watch_time_undefined = metrics.watch_time_undefined,
            "zero denominator in derived metrics; reporting 0%"
        );
    }
    metrics
}
