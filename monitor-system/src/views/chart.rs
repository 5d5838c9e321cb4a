use std::fmt::Display;

use itertools::{EitherOrBoth, Itertools};
use remoove_api_caller::{
    errors::ApiError,
    json::{
        chart::{ChartData, ChartSeries, RangeSeries},
        status::WasteCategory,
    },
};

pub const ERROR_LABEL: &str = "Error";
pub const NO_DATA_LABEL: &str = "No Data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelection {
    /// Element-wise sum of every category of the range
    Total,
    Category(WasteCategory),
}

impl Display for ChartSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartSelection::Total => f.write_str("Total"),
            ChartSelection::Category(c) => write!(f, "{c}"),
        }
    }
}

pub fn derive_series(data: &ChartData, range: &str, selection: ChartSelection) -> ChartSeries {
    let Some(range_series) = data.range(range).filter(|r| !r.is_empty()) else {
        return ChartSeries::placeholder(NO_DATA_LABEL);
    };

    let series = match selection {
        ChartSelection::Total => total_series(range_series),
        ChartSelection::Category(category) => range_series
            .get(category.as_str())
            .cloned()
            .map(ChartSeries::normalized)
            .unwrap_or_default(),
    };

    if series.is_empty() {
        ChartSeries::placeholder(NO_DATA_LABEL)
    } else {
        series
    }
}

// Series of different lengths are aligned from the start; the labels of the longest are used
fn total_series(range_series: &RangeSeries) -> ChartSeries {
    range_series
        .values()
        .cloned()
        .map(ChartSeries::normalized)
        .fold(ChartSeries::default(), |total, series| {
            let data = total
                .data
                .iter()
                .zip_longest(&series.data)
                .map(|pair| match pair {
                    EitherOrBoth::Both(a, b) => a + b,
                    EitherOrBoth::Left(v) | EitherOrBoth::Right(v) => *v,
                })
                .collect();
            let labels = if series.labels.len() > total.labels.len() {
                series.labels
            } else {
                total.labels
            };
            ChartSeries { labels, data }
        })
}

/// Chart panel of the detail view
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    range: String,
    selection: ChartSelection,
    series: ChartSeries,
}

impl ChartView {
    pub fn new(range: impl Into<String>, selection: ChartSelection) -> Self {
        Self {
            range: range.into(),
            selection,
            series: ChartSeries::placeholder(NO_DATA_LABEL),
        }
    }

    pub fn apply_fetch(&mut self, fetched: Result<ChartData, ApiError>) {
        self.series = match fetched {
            Ok(data) => derive_series(&data, &self.range, self.selection),
            Err(e) => {
                tracing::error!("Chart data unavailable: {e}");
                ChartSeries::placeholder(ERROR_LABEL)
            }
        };
    }

    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }
}

impl Display for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.selection, self.range)?;
        let width = self.series.labels.iter().map(String::len).max().unwrap_or(0);
        for (label, value) in self.series.labels.iter().zip(&self.series.data) {
            writeln!(f, "  {label:<width$}  {value}")?;
        }
        Ok(())
    }
}
