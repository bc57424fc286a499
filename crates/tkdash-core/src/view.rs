//! Typed view models handed to the rendering layer.
//!
//! [`build_view`] re-runs the whole pipeline for the current state: filter
//! both collections, derive per-video metrics, bucket by tag combination and
//! summarize each bucket. Everything is recomputed from scratch on each call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::filter_records;
use crate::format;
use crate::metrics::derive_metrics;
use crate::records::{ContentRecord, Dataset, OverviewRecord};
use crate::state::{DashboardState, Metric};
use crate::stats::{box_plot_stats, BoxPlotStats, LabeledValue};
use crate::tags::{group_by_combinations, TagBucket};

/// Videos above this many views are highlighted on the duration/views scatter.
pub const HIGHLIGHT_VIEWS_THRESHOLD: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub video_views: u64,
    pub profile_views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl From<&OverviewRecord> for TrendPoint {
    fn from(r: &OverviewRecord) -> Self {
        Self {
            date: r.date,
            video_views: r.video_views,
            profile_views: r.profile_views,
            likes: r.likes,
            comments: r.comments,
            shares: r.shares,
        }
    }
}

impl TrendPoint {
    #[must_use]
    pub fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::VideoViews => self.video_views,
            Metric::ProfileViews => self.profile_views,
            Metric::Likes => self.likes,
            Metric::Comments => self.comments,
            Metric::Shares => self.shares,
        }
    }
}

/// Legend entry for one trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub metric: Metric,
    pub name: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationViewsPoint {
    pub video_title: String,
    pub total_video_time: f64,
    pub total_views: u64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementWatchPoint {
    pub video_title: String,
    pub engagement_percent: f64,
    pub watch_time_percent: f64,
    /// At least one ratio had a zero denominator and was reported as `0.0`.
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSeries {
    pub category_index: usize,
    pub label: String,
    /// Summary over the videos with a defined engagement rate.
    pub stats: BoxPlotStats,
    /// Titles of zero-view videos left out of `stats`.
    pub excluded: Vec<String>,
}

impl From<&TagBucket> for BoxPlotSeries {
    fn from(bucket: &TagBucket) -> Self {
        let (undefined, defined): (Vec<_>, Vec<_>) =
            bucket.points.iter().partition(|p| p.engagement_undefined);
        let sample: Vec<LabeledValue> = defined
            .iter()
            .map(|p| LabeledValue::new(p.engagement, p.video_title.clone()))
            .collect();
        Self {
            category_index: bucket.index,
            label: bucket.label.clone(),
            stats: box_plot_stats(&sample),
            excluded: undefined.iter().map(|p| p.video_title.clone()).collect(),
        }
    }
}

/// Column headers of the content table, in display order.
pub const TABLE_COLUMNS: [&str; 10] = [
    "Video Title",
    "Total Views",
    "Total Likes",
    "Total Comments",
    "Total Shares",
    "Total Saves",
    "Avg Watch Time",
    "Total Video Time",
    "Full Watch %",
    "New Followers",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub video_title: String,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_saves: u64,
    pub avg_watch_time: f64,
    pub total_video_time: f64,
    pub full_watch_percentage: f64,
    pub new_followers: u64,
}

impl TableRow {
    /// Cell texts in [`TABLE_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [String; 10] {
        [
            self.video_title.clone(),
            format::thousands(self.total_views),
            format::thousands(self.total_likes),
            format::thousands(self.total_comments),
            format::thousands(self.total_shares),
            format::thousands(self.total_saves),
            format::seconds(self.avg_watch_time),
            format!("{}s", self.total_video_time),
            format::percent(self.full_watch_percentage),
            format::thousands(self.new_followers),
        ]
    }
}

impl From<&ContentRecord> for TableRow {
    fn from(r: &ContentRecord) -> Self {
        Self {
            video_title: r.video_title.clone(),
            total_views: r.total_views,
            total_likes: r.total_likes,
            total_comments: r.total_comments,
            total_shares: r.total_shares,
            total_saves: r.total_saves,
            avg_watch_time: r.avg_watch_time,
            total_video_time: r.total_video_time,
            full_watch_percentage: r.full_watch_percentage,
            new_followers: r.new_followers,
        }
    }
}

/// Everything the dashboard draws for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub series: Vec<SeriesInfo>,
    pub trend: Vec<TrendPoint>,
    pub duration_views: Vec<DurationViewsPoint>,
    pub engagement_watch: Vec<EngagementWatchPoint>,
    pub tag_buckets: Vec<TagBucket>,
    pub box_plots: Vec<BoxPlotSeries>,
    /// Built from the unfiltered content collection.
    pub table: Vec<TableRow>,
}

#[must_use]
pub fn build_view(dataset: &Dataset, state: &DashboardState) -> DashboardView {
    let overview = filter_records(&dataset.overview, &state.date_range, &state.views_range);
    let content = filter_records(&dataset.content, &state.date_range, &state.views_range);

    tracing::debug!(
        overview_total = dataset.overview.len(),
        overview_kept = overview.len(),
        content_total = dataset.content.len(),
        content_kept = content.len(),
        "applied dashboard filters"
    );

    let series = Metric::ALL
        .into_iter()
        .map(|metric| SeriesInfo {
            metric,
            name: metric.display_name().to_string(),
            visible: state.visible_metrics.is_visible(metric),
        })
        .collect();

    let duration_views = content
        .iter()
        .map(|r| DurationViewsPoint {
            video_title: r.video_title.clone(),
            total_video_time: r.total_video_time,
            total_views: r.total_views,
            highlighted: r.total_views > HIGHLIGHT_VIEWS_THRESHOLD,
        })
        .collect();

    let engagement_watch = content
        .iter()
        .map(|r| {
            let m = derive_metrics(r);
            EngagementWatchPoint {
                video_title: r.video_title.clone(),
                engagement_percent: m.engagement_percent,
                watch_time_percent: m.watch_time_percent,
                flagged: m.is_flagged(),
            }
        })
        .collect();

    let tag_buckets = group_by_combinations(&content, &state.combinations);
    let box_plots = tag_buckets.iter().map(BoxPlotSeries::from).collect();

    DashboardView {
        series,
        trend: overview.iter().map(TrendPoint::from).collect(),
        duration_views,
        engagement_watch,
        tag_buckets,
        box_plots,
        table: dataset.content.iter().map(TableRow::from).collect(),
    }
}
