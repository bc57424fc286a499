//! Five-number summaries for box plots.
//!
//! Quartiles use the nearest-rank positions `floor(0.25 * n)`,
//! `floor(0.5 * n)` and `floor(0.75 * n)` into the ascending sample, without
//! interpolation. For even-sized samples this picks the upper of the two
//! middle values, so results differ from interpolating methods such as R's
//! type 7 or numpy's default.

use serde::{Deserialize, Serialize};

/// IQR multiplier for the outlier fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// A sample value together with the label of the record it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub value: f64,
    pub label: String,
}

impl LabeledValue {
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub value: f64,
    pub label: String,
}

/// Box-plot statistics.
///
/// `min` and `max` are the whisker ends, i.e. the fences clipped to the
/// sample range, not necessarily the raw extremes. All fields are `0.0` and
/// `outliers` is empty for an empty sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub outliers: Vec<Outlier>,
}

impl BoxPlotStats {
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes box-plot statistics over `sample`.
///
/// Non-finite values are ignored. Outliers are reported in ascending order.
#[must_use]
pub fn box_plot_stats(sample: &[LabeledValue]) -> BoxPlotStats {
    let mut sorted: Vec<&LabeledValue> = sample.iter().filter(|v| v.value.is_finite()).collect();
    if sorted.is_empty() {
        return BoxPlotStats::default();
    }
    sorted.sort_by(|a, b| a.value.total_cmp(&b.value));

    let n = sorted.len();
    let q1 = sorted[n / 4].value;
    let median = sorted[n / 2].value;
    let q3 = sorted[n * 3 / 4].value;
    let iqr = q3 - q1;

    let sample_min = sorted[0].value;
    let sample_max = sorted[n - 1].value;
    let lower = (q1 - FENCE_FACTOR * iqr).max(sample_min);
    let upper = (q3 + FENCE_FACTOR * iqr).min(sample_max);

    let outliers = sorted
        .iter()
        .filter(|v| v.value < lower || v.value > upper)
        .map(|v| Outlier {
            value: v.value,
            label: v.label.clone(),
        })
        .collect();

    BoxPlotStats {
        count: n,
        min: lower,
        q1,
        median,
        q3,
        max: upper,
        outliers,
    }
}

/// Convenience wrapper for unlabeled samples.
#[must_use]
pub fn summarize(values: &[f64]) -> BoxPlotStats {
    let labeled: Vec<LabeledValue> = values
        .iter()
        .map(|&v| LabeledValue::new(v, String::new()))
        .collect();
    box_plot_stats(&labeled)
}
