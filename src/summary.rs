//! Descriptive aggregations over the cleaned dataset
//!
//! Group means, five-number summaries, the rolling mean, and the
//! status/flag crosstab. These are the numbers behind every chart in the
//! HTML report.

use serde::{Deserialize, Serialize};

use crate::dataset::DailyDataset;

/// Mean of the sweets flag per period status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMeans {
    pub on_period: f64,
    pub off_period: f64,
    pub on_period_days: usize,
    pub off_period_days: usize,
}

/// Five-number summary of a sample (linear-interpolated quartiles)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Days with/without sweets, split by period status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crosstab {
    pub on_period_sweets: usize,
    pub on_period_no_sweets: usize,
    pub off_period_sweets: usize,
    pub off_period_no_sweets: usize,
}

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased (n-1) sample variance; 0.0 below 2 observations
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64
}

/// Mean sweets flag per period status
pub fn group_means(dataset: &DailyDataset) -> GroupMeans {
    let (on, off) = dataset.samples();
    GroupMeans {
        on_period: mean(&on),
        off_period: mean(&off),
        on_period_days: on.len(),
        off_period_days: off.len(),
    }
}

/// Calculate a percentile from sorted data (linear interpolation)
fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Five-number summary of a sample
pub fn five_number_summary(values: &[f64]) -> FiveNumberSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    FiveNumberSummary {
        min: sorted.first().copied().unwrap_or(0.0),
        q1: calculate_percentile(&sorted, 25.0),
        median: calculate_percentile(&sorted, 50.0),
        q3: calculate_percentile(&sorted, 75.0),
        max: sorted.last().copied().unwrap_or(0.0),
    }
}

/// Trailing rolling mean with `min_periods = 1` semantics: every position
/// gets a value, averaging over however much history the window has seen
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        out.push(mean(&values[start..=i]));
    }

    out
}

/// Count days with/without sweets per period status
pub fn crosstab(dataset: &DailyDataset) -> Crosstab {
    let mut table = Crosstab::default();

    for obs in dataset.observations() {
        match (obs.on_period != 0, obs.sweets_consumed != 0) {
            (true, true) => table.on_period_sweets += 1,
            (true, false) => table.on_period_no_sweets += 1,
            (false, true) => table.off_period_sweets += 1,
            (false, false) => table.off_period_no_sweets += 1,
        }
    }

    table
}
