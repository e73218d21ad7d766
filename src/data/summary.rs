//! Per-series and aggregate statistics over a plugin result.

use serde::Serialize;

use super::series::{LabeledSeries, PluginResult};
use super::stats::Statistics;
use crate::error::{Error, Result};

/// Statistics for one reported series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SeriesSummary {
    fn compute(label: Option<String>, values: &[f64]) -> Result<Self> {
        match Statistics::new(values) {
            Some(stats) => Ok(Self {
                label,
                min: stats.min(),
                max: stats.max(),
                mean: stats.mean(),
            }),
            None => Err(Error::EmptySeries { label }),
        }
    }
}

/// Compute the summaries to report for a plugin result.
///
/// - a flat series yields one unlabeled summary;
/// - labeled series with `aggregate` set are concatenated (in label order)
///   into one unlabeled summary;
/// - otherwise each label gets its own summary, sorted ascending by mean.
///   Equal means keep label order.
///
/// A result with no samples to report (an empty series, or a labeled
/// collection without any labels) is an [`Error::EmptySeries`].
pub fn summarize(result: &PluginResult, aggregate: bool) -> Result<Vec<SeriesSummary>> {
    match result {
        PluginResult::Flat(series) => Ok(vec![SeriesSummary::compute(None, series)?]),
        PluginResult::Labeled(labeled) if aggregate => {
            Ok(vec![SeriesSummary::compute(None, &flatten(labeled))?])
        }
        PluginResult::Labeled(labeled) if labeled.is_empty() => {
            Err(Error::EmptySeries { label: None })
        }
        PluginResult::Labeled(labeled) => {
            let mut summaries = labeled
                .iter()
                .map(|(label, series)| SeriesSummary::compute(Some(label.clone()), series))
                .collect::<Result<Vec<_>>>()?;
            summaries.sort_by(|a, b| a.mean.total_cmp(&b.mean));
            Ok(summaries)
        }
    }
}

fn flatten(labeled: &LabeledSeries) -> Vec<f64> {
    labeled.values().flatten().copied().collect()
}
