//! Growth trend callouts.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Summary trend accompanying a chat reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    /// Qualitative trend; only `"increasing"` and `"decreasing"` carry meaning.
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub initial: f64,
    #[serde(default, rename = "final", deserialize_with = "null_as_default")]
    pub final_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent_change: f64,
}

/// Trend classification. Anything other than the two exact literals is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTrend {
    Increasing,
    Decreasing,
    Neutral,
}

impl GrowthTrend {
    /// Exact, case-sensitive match on the wire value.
    pub fn classify(trend: &str) -> Self {
        match trend {
            "increasing" => Self::Increasing,
            "decreasing" => Self::Decreasing,
            _ => Self::Neutral,
        }
    }

    pub fn color(self) -> TrendColor {
        match self {
            Self::Increasing => TrendColor::Green,
            Self::Decreasing => TrendColor::Red,
            Self::Neutral => TrendColor::Gray,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Increasing => '▲',
            Self::Decreasing => '▼',
            Self::Neutral => '●',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendColor {
    Green,
    Red,
    Gray,
}

impl TrendColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

/// A growth object resolved into its display indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthCallout {
    /// Trend text as supplied, shown in the callout heading.
    pub label: String,
    pub trend: GrowthTrend,
    pub initial: f64,
    pub final_value: f64,
    pub percent_change: f64,
}

impl GrowthCallout {
    pub fn color(&self) -> TrendColor {
        self.trend.color()
    }

    pub fn glyph(&self) -> char {
        self.trend.glyph()
    }
}

/// Resolves a growth object into a callout; `None` when absent.
pub fn render_growth(growth: Option<&Growth>) -> Option<GrowthCallout> {
    let growth = growth?;
    Some(GrowthCallout {
        label: growth.trend.clone(),
        trend: GrowthTrend::classify(&growth.trend),
        initial: growth.initial,
        final_value: growth.final_value,
        percent_change: growth.percent_change,
    })
}
