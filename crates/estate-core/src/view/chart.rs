//! Line chart payloads and their pivot into plot rows.
//!
//! The analytics service sends charts column-oriented: one shared list of
//! x-axis labels plus one or more named series. Plotting wants them
//! row-oriented, one row per label carrying every series value at that label.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::null_as_default;

/// Series colours, assigned by dataset index modulo the palette size.
pub const CHART_PALETTE: [&str; 5] = ["#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#0088FE"];

/// Key of the x-axis value in every pivoted row.
pub const X_AXIS_KEY: &str = "year";

/// Column-oriented chart data as returned by the analytics service.
///
/// Both fields are optional on the wire; a chart missing either of them
/// cannot be drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Shared x-axis labels. Years arrive as numbers and are kept as text.
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub labels: Option<Vec<String>>,
    /// Named series; `data[i]` belongs to `labels[i]`.
    #[serde(default)]
    pub datasets: Option<Vec<Dataset>>,
}

impl Chart {
    /// Creates a chart from labels and datasets.
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            labels: Some(labels),
            datasets: Some(datasets),
        }
    }
}

/// One named series of a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    /// Series values; `null` points are kept as gaps.
    #[serde(default)]
    pub data: Vec<Option<f64>>,
}

impl Dataset {
    /// Creates a dataset with every point present.
    pub fn new(label: impl Into<String>, data: impl IntoIterator<Item = f64>) -> Self {
        Self {
            label: label.into(),
            data: data.into_iter().map(Some).collect(),
        }
    }
}

/// Display metadata for one plotted series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub label: String,
    /// Hex colour taken from [`CHART_PALETTE`].
    pub color: &'static str,
}

/// One pivoted row: the x-axis label and every series value at that label.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub year: String,
    /// `(series label, value)` in dataset order. A missing point is `None`.
    pub values: Vec<(String, Option<f64>)>,
}

impl ChartRow {
    /// Returns the value of the named series at this row.
    pub fn value(&self, series: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(label, _)| label == series)
            .and_then(|(_, value)| *value)
    }

    fn set(&mut self, series: &str, value: Option<f64>) {
        match self.values.iter_mut().find(|(label, _)| label == series) {
            Some(slot) => slot.1 = value,
            None => self.values.push((series.to_string(), value)),
        }
    }
}

// Serializes as a flat object, e.g. `{"year": "2020", "Wakad": 5400.0}`.
impl Serialize for ChartRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(X_AXIS_KEY, &self.year)?;
        for (label, value) in &self.values {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// A chart ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub series: Vec<ChartSeries>,
    /// One row per label, in label order.
    pub rows: Vec<ChartRow>,
}

/// Returns the palette colour for the dataset at `index`.
pub fn palette_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Pivots a chart into plot rows.
///
/// Returns `None` when the chart is absent or lacks labels or datasets.
pub fn render_chart(chart: Option<&Chart>) -> Option<ChartView> {
    let chart = chart?;
    let labels = chart.labels.as_ref()?;
    let datasets = chart.datasets.as_ref()?;

    let series = datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| ChartSeries {
            label: ds.label.clone(),
            color: palette_color(i),
        })
        .collect();

    let rows = labels
        .iter()
        .enumerate()
        .map(|(idx, year)| {
            let mut row = ChartRow {
                year: year.clone(),
                values: Vec::with_capacity(datasets.len()),
            };
            for ds in datasets {
                row.set(&ds.label, ds.data.get(idx).copied().flatten());
            }
            row
        })
        .collect();

    Some(ChartView { series, rows })
}

fn deserialize_labels<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| values.into_iter().map(label_text).collect()))
}

fn label_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
