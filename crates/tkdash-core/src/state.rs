//! Dashboard filter state and the pure update function the UI drives.
//!
//! The rendering layer never mutates state in place: each user event goes
//! through [`DashboardState::apply`], which returns the next state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::filter::{DateRange, VolumeRange};
use crate::records::OverviewRecord;
use crate::tags::{toggle_selection, TagCombinations};
use crate::CoreError;

/// One of the overview time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    VideoViews,
    ProfileViews,
    Likes,
    Comments,
    Shares,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::VideoViews,
        Metric::ProfileViews,
        Metric::Likes,
        Metric::Comments,
        Metric::Shares,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Metric::VideoViews => "videoViews",
            Metric::ProfileViews => "profileViews",
            Metric::Likes => "likes",
            Metric::Comments => "comments",
            Metric::Shares => "shares",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::VideoViews => "Video Views",
            Metric::ProfileViews => "Profile Views",
            Metric::Likes => "Likes",
            Metric::Comments => "Comments",
            Metric::Shares => "Shares",
        }
    }

    #[must_use]
    pub fn value(self, record: &OverviewRecord) -> u64 {
        match self {
            Metric::VideoViews => record.video_views,
            Metric::ProfileViews => record.profile_views,
            Metric::Likes => record.likes,
            Metric::Comments => record.comments,
            Metric::Shares => record.shares,
        }
    }

    fn index(self) -> usize {
        match self {
            Metric::VideoViews => 0,
            Metric::ProfileViews => 1,
            Metric::Likes => 2,
            Metric::Comments => 3,
            Metric::Shares => 4,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Metric {
    type Err = CoreError;

    /// Accepts the camelCase key, the display name, or a kebab/snake spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| CoreError::InvalidMetric(s.to_string()))
    }
}

/// Per-series visibility toggles for the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleMetrics {
    flags: [bool; 5],
}

impl Default for VisibleMetrics {
    fn default() -> Self {
        Self { flags: [true; 5] }
    }
}

impl VisibleMetrics {
    #[must_use]
    pub fn is_visible(&self, metric: Metric) -> bool {
        self.flags[metric.index()]
    }

    #[must_use]
    pub fn toggled(self, metric: Metric) -> Self {
        let mut flags = self.flags;
        flags[metric.index()] = !flags[metric.index()];
        Self { flags }
    }

    /// Visible metrics in chart order.
    pub fn visible(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.is_visible(*m))
    }
}

/// Plain-value events emitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    ToggleMetric(Metric),
    SetDateRange(DateRange),
    SetViewsRange(VolumeRange),
    /// Select or deselect a tag in the pending combination.
    ToggleTag(String),
    /// Turn the pending selection into a combination; no-op when nothing is selected.
    AddCombination { label: Option<String> },
    RemoveCombination(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub date_range: DateRange,
    pub views_range: VolumeRange,
    pub visible_metrics: VisibleMetrics,
    pub combinations: TagCombinations,
    pub selected_tags: Vec<String>,
}

const DEFAULT_START: (i32, u32, u32) = (2024, 2, 1);
const DEFAULT_END: (i32, u32, u32) = (2024, 2, 28);
const DEFAULT_MAX_VIEWS: u64 = 200_000;

impl Default for DashboardState {
    fn default() -> Self {
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self {
            date_range: DateRange::new(date(DEFAULT_START), date(DEFAULT_END)),
            views_range: VolumeRange::new(0, DEFAULT_MAX_VIEWS),
            visible_metrics: VisibleMetrics::default(),
            combinations: TagCombinations::default(),
            selected_tags: Vec::new(),
        }
    }
}

impl DashboardState {
    /// Initial state from configuration and the preset combinations.
    #[must_use]
    pub fn from_config(config: &AppConfig, combinations: TagCombinations) -> Self {
        Self {
            date_range: DateRange::new(config.default_start, config.default_end),
            views_range: VolumeRange::new(config.default_min_views, config.default_max_views),
            visible_metrics: VisibleMetrics::default(),
            combinations,
            selected_tags: Vec::new(),
        }
    }

    /// Returns the state that results from `event`.
    #[must_use]
    pub fn apply(&self, event: DashboardEvent) -> Self {
        let mut next = self.clone();
        match event {
            DashboardEvent::ToggleMetric(metric) => {
                next.visible_metrics = self.visible_metrics.toggled(metric);
            }
            DashboardEvent::SetDateRange(range) => {
                if range.is_inverted() {
                    tracing::warn!(?range, "date range start is after end; nothing will match");
                }
                next.date_range = range;
            }
            DashboardEvent::SetViewsRange(range) => {
                if range.is_inverted() {
                    tracing::warn!(?range, "views range min is above max; nothing will match");
                }
                next.views_range = range;
            }
            DashboardEvent::ToggleTag(tag) => {
                next.selected_tags = toggle_selection(&self.selected_tags, &tag);
            }
            DashboardEvent::AddCombination { label } => {
                if self.selected_tags.is_empty() {
                    return next;
                }
                next.combinations = self
                    .combinations
                    .with_added(self.selected_tags.as_slice(), label.as_deref());
                next.selected_tags.clear();
            }
            DashboardEvent::RemoveCombination(id) => {
                next.combinations = self.combinations.without(id);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_state_matches_initial_dashboard() {
        let s = DashboardState::default();
        assert_eq!(s.date_range, DateRange::new(ymd(2024, 2, 1), ymd(2024, 2, 28)));
        assert_eq!(s.views_range, VolumeRange::new(0, 200_000));
        assert!(Metric::ALL.iter().all(|m| s.visible_metrics.is_visible(*m)));
        assert_eq!(s.combinations.len(), 1);
        assert!(s.selected_tags.is_empty());
    }

    #[test]
    fn toggle_metric_flips_only_that_metric() {
        let s = DashboardState::default();
        let next = s.apply(DashboardEvent::ToggleMetric(Metric::Likes));
        assert!(!next.visible_metrics.is_visible(Metric::Likes));
        assert!(next.visible_metrics.is_visible(Metric::Shares));
        // The original value is untouched.
        assert!(s.visible_metrics.is_visible(Metric::Likes));

        let back = next.apply(DashboardEvent::ToggleMetric(Metric::Likes));
        assert_eq!(back.visible_metrics, s.visible_metrics);
    }

    #[test]
    fn visible_iterates_in_chart_order() {
        let v = VisibleMetrics::default().toggled(Metric::ProfileViews);
        let shown: Vec<Metric> = v.visible().collect();
        assert_eq!(
            shown,
            vec![Metric::VideoViews, Metric::Likes, Metric::Comments, Metric::Shares]
        );
    }

    #[test]
    fn set_ranges_replace_previous_values() {
        let range = DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 31));
        let s = DashboardState::default()
            .apply(DashboardEvent::SetDateRange(range))
            .apply(DashboardEvent::SetViewsRange(VolumeRange::new(10, 20)));
        assert_eq!(s.date_range, range);
        assert_eq!(s.views_range, VolumeRange::new(10, 20));
    }

    #[test]
    fn add_combination_with_empty_selection_is_noop() {
        let s = DashboardState::default();
        let next = s.apply(DashboardEvent::AddCombination { label: None });
        assert_eq!(next, s);
        assert_eq!(next.combinations.len(), 1);
    }

    #[test]
    fn add_combination_consumes_selection() {
        let s = DashboardState::default()
            .apply(DashboardEvent::ToggleTag("dc".to_string()))
            .apply(DashboardEvent::ToggleTag("heroi".to_string()))
            .apply(DashboardEvent::AddCombination { label: None });
        assert_eq!(s.combinations.len(), 2);
        let added = &s.combinations.as_slice()[1];
        assert_eq!(added.id, 2);
        assert_eq!(added.label, "dc + heroi");
        assert!(s.selected_tags.is_empty());
    }

    #[test]
    fn remove_combination_by_id() {
        let s = DashboardState::default().apply(DashboardEvent::RemoveCombination(1));
        assert!(s.combinations.is_empty());
    }

    #[test]
    fn metric_parses_from_several_spellings() {
        assert_eq!("videoViews".parse::<Metric>().unwrap(), Metric::VideoViews);
        assert_eq!("Video Views".parse::<Metric>().unwrap(), Metric::VideoViews);
        assert_eq!("profile-views".parse::<Metric>().unwrap(), Metric::ProfileViews);
        assert_eq!("SHARES".parse::<Metric>().unwrap(), Metric::Shares);
        assert!(matches!(
            "followers".parse::<Metric>(),
            Err(CoreError::InvalidMetric(ref s)) if s == "followers"
        ));
    }

    #[test]
    fn metric_value_reads_matching_field() {
        let rec = OverviewRecord {
            date: ymd(2024, 2, 1),
            video_views: 1,
            profile_views: 2,
            likes: 3,
            comments: 4,
            shares: 5,
        };
        let values: Vec<u64> = Metric::ALL.iter().map(|m| m.value(&rec)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}
