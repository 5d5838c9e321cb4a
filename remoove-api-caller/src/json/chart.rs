use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

impl ChartSeries {
    /// A single zero-valued point, e.g. `No Data`
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
            data: vec![0.],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len().min(self.data.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops trailing labels or values that have no counterpart, so both have the same length
    pub fn normalized(mut self) -> Self {
        let len = self.len();
        if self.labels.len() != self.data.len() {
            tracing::warn!(
                "Chart series has {} labels but {} values; truncating to {len}",
                self.labels.len(),
                self.data.len()
            );
        }
        self.labels.truncate(len);
        self.data.truncate(len);
        self
    }
}

/// Series of one time range, keyed by category name
pub type RangeSeries = BTreeMap<String, ChartSeries>;

/// `/TrashCount` response: time range -> category -> series
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartData {
    ranges: BTreeMap<String, RangeSeries>,
}

impl ChartData {
    #[must_use]
    pub fn range(&self, name: &str) -> Option<&RangeSeries> {
        self.ranges.get(name)
    }

    pub fn range_names(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }
}

impl FromIterator<(String, RangeSeries)> for ChartData {
    fn from_iter<T: IntoIterator<Item = (String, RangeSeries)>>(iter: T) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

/// Body of `POST /TrashCount`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest<'a> {
    pub trash_can_id: &'a str,
}
