//! Response-to-view mappings.
//!
//! Each submodule owns one kind of reply attachment: the wire type as the
//! analytics service sends it, and a pure `render_*` function producing the
//! shape a front end draws. All renderers return `None` when there is nothing
//! to draw.

use serde::{Deserialize, Deserializer};

pub mod chart;
pub mod growth;
pub mod table;

pub use chart::{Chart, ChartRow, ChartSeries, ChartView, Dataset, render_chart};
pub use growth::{Growth, GrowthCallout, GrowthTrend, TrendColor, render_growth};
pub use table::{Row, TableGroup, cell_text, render_table};

/// Reads an explicit `null` as the type's default, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
