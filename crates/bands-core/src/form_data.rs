// File: crates/bands-core/src/form_data.rs
// Summary: Chart configuration (form data) as supplied by the host, with lenient decoding.

use serde::{Deserialize, Deserializer, Serialize};

use crate::band::LEVEL_COUNT;
use crate::error::{Error, Result};
use crate::types::{lenient_columns, lenient_metric, lenient_metrics, MetricRef};

/// Row limit applied when the configuration does not set one.
pub const DEFAULT_ROW_LIMIT: u64 = 10_000;

/// Column name the host uses for the time axis when no x-axis is configured.
pub const TIMESTAMP_COLUMN: &str = "__timestamp";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendType {
    #[default]
    Scroll,
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrientation {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    #[serde(alias = "xAxis", deserialize_with = "lenient_column")]
    pub x_axis: Option<String>,
    #[serde(deserialize_with = "lenient_columns")]
    pub groupby: Vec<String>,
    #[serde(deserialize_with = "lenient_metrics")]
    pub metrics: Vec<MetricRef>,
    #[serde(alias = "yPredictionHat", deserialize_with = "lenient_metric")]
    pub y_prediction_hat: Option<MetricRef>,
    #[serde(alias = "bandConfidenceL1", deserialize_with = "lenient_metrics")]
    pub band_confidence_l1: Vec<MetricRef>,
    #[serde(alias = "bandConfidenceL2", deserialize_with = "lenient_metrics")]
    pub band_confidence_l2: Vec<MetricRef>,
    #[serde(alias = "bandConfidenceL3", deserialize_with = "lenient_metrics")]
    pub band_confidence_l3: Vec<MetricRef>,
    #[serde(alias = "bandConfidenceL4", deserialize_with = "lenient_metrics")]
    pub band_confidence_l4: Vec<MetricRef>,
    /// Per-level display name overrides, index-aligned with the levels.
    #[serde(alias = "legendBands", alias = "bandNames", deserialize_with = "lenient_columns")]
    pub band_names: Vec<String>,
    #[serde(alias = "adhocFilters")]
    pub adhoc_filters: Vec<serde_json::Value>,
    #[serde(alias = "rowLimit", deserialize_with = "lenient_integer")]
    pub row_limit: Option<u64>,
    pub zoomable: bool,
    #[serde(alias = "showLegend")]
    pub show_legend: bool,
    #[serde(alias = "legendType")]
    pub legend_type: LegendType,
    #[serde(alias = "legendOrientation")]
    pub legend_orientation: LegendOrientation,
    #[serde(alias = "xAxisTitle")]
    pub x_axis_title: String,
    #[serde(alias = "yAxisTitle")]
    pub y_axis_title: String,
    #[serde(alias = "colorScheme")]
    pub color_scheme: Option<String>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            x_axis: None,
            groupby: Vec::new(),
            metrics: Vec::new(),
            y_prediction_hat: None,
            band_confidence_l1: Vec::new(),
            band_confidence_l2: Vec::new(),
            band_confidence_l3: Vec::new(),
            band_confidence_l4: Vec::new(),
            band_names: Vec::new(),
            adhoc_filters: Vec::new(),
            row_limit: Some(DEFAULT_ROW_LIMIT),
            zoomable: false,
            show_legend: true,
            legend_type: LegendType::default(),
            legend_orientation: LegendOrientation::default(),
            x_axis_title: String::new(),
            y_axis_title: String::new(),
            color_scheme: None,
        }
    }
}

impl FormData {
    /// Decode form data. A payload may carry a field under both its snake_case
    /// and camelCase spelling; the snake_case entry wins.
    pub fn from_json(s: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(s).map_err(Error::InvalidFormData)?;
        Self::from_value(raw)
    }

    pub fn from_value(v: serde_json::Value) -> Result<Self> {
        serde_json::from_value(dedupe_aliases(v)).map_err(Error::InvalidFormData)
    }

    /// Metrics bound to each band level, level 1 first.
    pub fn band_levels(&self) -> [&[MetricRef]; LEVEL_COUNT] {
        [
            &self.band_confidence_l1,
            &self.band_confidence_l2,
            &self.band_confidence_l3,
            &self.band_confidence_l4,
        ]
    }

    /// Row key holding the x value.
    pub fn x_axis_label(&self) -> &str {
        self.x_axis.as_deref().filter(|x| !x.is_empty()).unwrap_or(TIMESTAMP_COLUMN)
    }

    pub fn has_x_axis(&self) -> bool {
        self.x_axis.as_deref().is_some_and(|x| !x.is_empty())
    }

    pub fn prediction_key(&self) -> Option<&str> {
        self.y_prediction_hat.as_ref().and_then(MetricRef::label)
    }

    /// Row keys of the plain metrics (unlabeled entries are dropped).
    pub fn metric_keys(&self) -> Vec<String> {
        self.metrics.iter().filter_map(MetricRef::label).map(str::to_string).collect()
    }
}

/// Field name followed by the alternate spellings hosts send for it.
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("x_axis", &["xAxis"]),
    ("y_prediction_hat", &["yPredictionHat"]),
    ("band_confidence_l1", &["bandConfidenceL1"]),
    ("band_confidence_l2", &["bandConfidenceL2"]),
    ("band_confidence_l3", &["bandConfidenceL3"]),
    ("band_confidence_l4", &["bandConfidenceL4"]),
    ("band_names", &["legendBands", "bandNames"]),
    ("adhoc_filters", &["adhocFilters"]),
    ("row_limit", &["rowLimit"]),
    ("show_legend", &["showLegend"]),
    ("legend_type", &["legendType"]),
    ("legend_orientation", &["legendOrientation"]),
    ("x_axis_title", &["xAxisTitle"]),
    ("y_axis_title", &["yAxisTitle"]),
    ("color_scheme", &["colorScheme"]),
];

/// Keep one spelling per field so merged raw/camelCased payloads decode.
fn dedupe_aliases(v: serde_json::Value) -> serde_json::Value {
    let serde_json::Value::Object(mut map) = v else { return v };
    for (field, aliases) in FIELD_ALIASES {
        let mut seen = map.contains_key(*field);
        for alias in aliases.iter() {
            if seen {
                map.remove(*alias);
            } else {
                seen = map.contains_key(*alias);
            }
        }
    }
    serde_json::Value::Object(map)
}

/// Form data nested in chart props, decoded through the same alias handling.
pub(crate) fn lenient_form_data<'de, D>(deserializer: D) -> std::result::Result<FormData, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    serde_json::from_value(dedupe_aliases(raw)).map_err(serde::de::Error::custom)
}

/// Column given as a name or as an object carrying a `label`.
fn lenient_column<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map.get("label").and_then(|l| l.as_str()).map(str::to_string),
        _ => None,
    })
}

/// Integer given as a number or a numeric string; anything else is `None`.
fn lenient_integer<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}
