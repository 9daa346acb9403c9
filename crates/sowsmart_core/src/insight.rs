//! Statistical summaries behind the dataset charts.

use crate::dataset::{Column, ColumnData, Dataset, LABEL_COLUMN, is_missing};
use crate::error::InsightError;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const DEFAULT_BINS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Minimum, quartiles and maximum of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// `None` when there are no values.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Some(Self {
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[values.len() - 1],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub count: usize,
    pub summary: FiveNumberSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlot {
    pub column: String,
    /// Ordered by label.
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub label: String,
    pub count: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanComparison {
    pub column: String,
    /// Ascending by mean.
    pub bars: Vec<GroupMean>,
}

/// Equal-width histogram over the observed range of a numeric column.
pub fn distribution(
    dataset: &Dataset,
    column: &str,
    bins: usize,
) -> Result<Histogram, InsightError> {
    if dataset.is_empty() {
        return Err(InsightError::NoData);
    }
    let col = numeric_column(dataset, column)?;
    let values: Vec<f64> = col.numbers().into_iter().flatten().collect();
    if values.is_empty() {
        return Err(InsightError::NoData);
    }
    let n_bins = bins.max(1);

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let mut counts = vec![0usize; n_bins];
    for &v in &values {
        // the last bin is closed on the right
        let idx = (fraction(v, lo, hi) * n_bins as f64) as usize;
        counts[idx.min(n_bins - 1)] += 1;
    }

    let edge = |i: usize| {
        let t = i as f64 / n_bins as f64;
        lo * (1.0 - t) + hi * t
    };
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: edge(i),
            upper: if i + 1 == n_bins { hi } else { edge(i + 1) },
            count,
        })
        .collect();
    Ok(Histogram {
        column: column.to_string(),
        bins,
    })
}

/// Five-number summary of `column` for every crop in the `label` column.
pub fn grouped_boxplot(dataset: &Dataset, column: &str) -> Result<BoxPlot, InsightError> {
    let groups = group_by_label(dataset, column)?;
    let groups = groups
        .into_iter()
        .filter_map(|(label, values)| {
            let count = values.len();
            FiveNumberSummary::from_values(values).map(|summary| BoxGroup {
                label: label.to_string(),
                count,
                summary,
            })
        })
        .collect();
    Ok(BoxPlot {
        column: column.to_string(),
        groups,
    })
}

/// Mean of `column` per crop, sorted ascending.
pub fn grouped_mean_comparison(
    dataset: &Dataset,
    column: &str,
) -> Result<MeanComparison, InsightError> {
    let groups = group_by_label(dataset, column)?;
    let mut bars: Vec<GroupMean> = groups
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| GroupMean {
            label: label.to_string(),
            count: values.len(),
            mean: values.iter().sum::<f64>() / values.len() as f64,
        })
        .collect();
    bars.sort_by(|a, b| a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal));
    Ok(MeanComparison {
        column: column.to_string(),
        bars,
    })
}

fn numeric_column<'a>(dataset: &'a Dataset, column: &str) -> Result<&'a Column, InsightError> {
    let col = dataset
        .column(column)
        .ok_or_else(|| InsightError::UnknownColumn(column.to_string()))?;
    if !col.is_numeric() {
        return Err(InsightError::NonNumericColumn(column.to_string()));
    }
    Ok(col)
}

/// Present values of `column` per label, keyed in label order.
fn group_by_label<'a>(
    dataset: &'a Dataset,
    column: &str,
) -> Result<BTreeMap<&'a str, Vec<f64>>, InsightError> {
    let labels = dataset.labels().ok_or(InsightError::MissingLabelColumn)?;
    if column == LABEL_COLUMN {
        return Err(InsightError::LabelColumnSelected);
    }
    if dataset.is_empty() {
        return Err(InsightError::NoData);
    }
    let col = dataset
        .column(column)
        .ok_or_else(|| InsightError::UnknownColumn(column.to_string()))?;
    let ColumnData::Numeric(values) = &col.data else {
        return Err(InsightError::NonNumericColumn(column.to_string()));
    };

    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (label, value) in labels.into_iter().zip(values) {
        if is_missing(label) {
            continue;
        }
        let entry = groups.entry(label).or_default();
        if let Some(v) = value {
            entry.push(*v);
        }
    }
    if groups.values().all(Vec::is_empty) {
        return Err(InsightError::NoData);
    }
    Ok(groups)
}

/// Position of `v` in `[lo, hi]` as a fraction; halves the operands when the span overflows.
fn fraction(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span.is_finite() {
        (v - lo) / span
    } else {
        (v / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0)
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Holds the dataset of the current upload. A new upload replaces it entirely.
#[derive(Debug, Clone)]
pub struct InsightSession {
    dataset: Option<Dataset>,
    bins: usize,
}

impl Default for InsightSession {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl InsightSession {
    pub fn new(bins: usize) -> Self {
        Self { dataset: None, bins }
    }

    pub fn upload(&mut self, dataset: Dataset) {
        tracing::info!(
            "dataset uploaded: {} rows, {} columns",
            dataset.row_count(),
            dataset.columns().len()
        );
        self.dataset = Some(dataset);
    }

    pub fn clear(&mut self) {
        self.dataset = None;
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    fn current(&self) -> Result<&Dataset, InsightError> {
        self.dataset.as_ref().ok_or(InsightError::NoData)
    }

    pub fn distribution(&self, column: &str) -> Result<Histogram, InsightError> {
        distribution(self.current()?, column, self.bins)
    }

    pub fn grouped_boxplot(&self, column: &str) -> Result<BoxPlot, InsightError> {
        grouped_boxplot(self.current()?, column)
    }

    pub fn grouped_mean_comparison(&self, column: &str) -> Result<MeanComparison, InsightError> {
        grouped_mean_comparison(self.current()?, column)
    }
}
