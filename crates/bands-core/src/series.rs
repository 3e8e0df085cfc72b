// File: crates/bands-core/src/series.rs
// Summary: Confidence band series construction: bound sorting, stacking classification, band and line layers.
// Notes:
// - Layers are grouped per band / per metric; callers flatten with `flatten`
//   and the flattened order is the legend and z-order.
// - Band descriptors are never mutated. The classifier returns the effective
//   lower opacity alongside the strategy.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::band::BandDescriptor;
use crate::color::ColorScale;
use crate::theme::{Color, ItemStyle, SeriesStyle, Stroke};
use crate::types::{LabelMap, Row, Value};

/// How the renderer combines the two layers of one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackStrategy {
    /// Every lowest bound is <= 0; both fills stay visible.
    #[serde(rename = "samesign")]
    SameSign,
    /// Every lowest bound is >= 0; the upper layer carries the band width.
    #[serde(rename = "positive")]
    Positive,
    /// Lowest bounds change sign across rows; treated like `Positive`.
    #[serde(rename = "all")]
    Mixed,
}

impl StackStrategy {
    /// Tag understood by the charting library.
    pub fn as_str(&self) -> &'static str {
        match self {
            StackStrategy::SameSign => "samesign",
            StackStrategy::Positive => "positive",
            StackStrategy::Mixed => "all",
        }
    }

    /// Whether the upper layer is rewritten to `upper - lower`.
    pub fn stacks_delta(&self) -> bool { !matches!(self, StackStrategy::SameSign) }
}

/// One (x, y) point of a layer.
pub type Point = (Value, Value);

/// Area layer for one side of a band.
#[derive(Clone, Debug, PartialEq)]
pub struct BandLayer {
    pub name: String,
    pub group_key: String,
    pub stack_strategy: StackStrategy,
    pub fill_opacity: f64,
    pub color: Color,
    pub item: ItemStyle,
    pub points: Vec<Point>,
}

/// Line layer for the prediction metric or a plain metric.
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayer {
    pub name: String,
    pub color: Color,
    pub line_opacity: f64,
    /// Set only for the prediction line.
    pub stroke: Option<Stroke>,
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Band(BandLayer),
    Line(LineLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Band(b) => &b.name,
            Layer::Line(l) => &l.name,
        }
    }

    pub fn points(&self) -> &[Point] {
        match self {
            Layer::Band(b) => &b.points,
            Layer::Line(l) => &l.points,
        }
    }
}

/// Layers contributed by one band or one metric.
pub type LayerGroup = Vec<Layer>;

/// Inputs for one series build.
#[derive(Clone, Copy, Debug)]
pub struct SeriesInputs<'a> {
    pub rows: &'a [Row],
    pub x_axis: &'a str,
    pub bands: &'a [BandDescriptor],
    /// Column key of the prediction metric, if one is configured.
    pub prediction: Option<&'a str>,
    /// Column keys of the plain metrics, in legend order.
    pub metrics: &'a [String],
    pub label_map: &'a LabelMap,
}

/// Ascending numeric order; cells without a number sort after all numbers
/// and keep their relative order.
pub fn numeric_order(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Bound cells of `row` for `labels`, sorted numerically ascending.
pub fn sorted_bounds(row: &Row, labels: &[String]) -> Vec<Value> {
    let mut values = labels.iter().map(|l| row.get(l)).collect::<Vec<_>>();
    values.sort_by(numeric_order);
    values
}

/// Per-band sign bookkeeping over the lowest bound of every row.
/// A lowest bound of exactly 0 (or a missing one) clears neither flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignTracker {
    pub all_negative: bool,
    pub all_positive: bool,
}

impl Default for SignTracker {
    fn default() -> Self { Self { all_negative: true, all_positive: true } }
}

impl SignTracker {
    pub fn observe(&mut self, lowest: &Value) {
        if let Some(v) = lowest.as_f64() {
            if v > 0.0 { self.all_negative = false; }
            if v < 0.0 { self.all_positive = false; }
        }
    }

    /// Both flags still set (all zeros, or no rows) resolves to `Positive`.
    pub fn strategy(&self) -> StackStrategy {
        if self.all_positive {
            StackStrategy::Positive
        } else if self.all_negative {
            StackStrategy::SameSign
        } else {
            StackStrategy::Mixed
        }
    }
}

/// Lower/upper values of one row, paired with its x value.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundRow {
    pub x: Value,
    pub lower: Value,
    pub upper: Value,
}

/// Outcome of classifying one band over the full row set.
#[derive(Clone, Debug, PartialEq)]
pub struct BandBounds {
    pub strategy: StackStrategy,
    /// Effective lower fill opacity (0 unless `SameSign`).
    pub opacity_lower: f64,
    pub opacity_upper: f64,
    /// Upper values already rewritten to deltas when the strategy stacks them.
    pub rows: Vec<BoundRow>,
}

fn delta(upper: &Value, lower: &Value) -> Value {
    match (upper.as_f64(), lower.as_f64()) {
        (Some(u), Some(l)) => Value::Number(u - l),
        _ => Value::Null,
    }
}

/// Sort each row's bounds, classify the band and apply the stacking rewrite.
pub fn classify_bounds(rows: &[Row], x_axis: &str, band: &BandDescriptor) -> BandBounds {
    let mut signs = SignTracker::default();
    let mut bounds = Vec::with_capacity(rows.len());
    for row in rows {
        let mut sorted = sorted_bounds(row, &band.metric_labels).into_iter();
        let lower = sorted.next().unwrap_or_default();
        let upper = sorted.next().unwrap_or_default();
        signs.observe(&lower);
        bounds.push(BoundRow { x: row.get(x_axis), lower, upper });
    }

    let strategy = signs.strategy();
    let mut opacity_lower = band.opacity_lower;
    if strategy.stacks_delta() {
        opacity_lower = 0.0;
        for b in bounds.iter_mut() {
            b.upper = delta(&b.upper, &b.lower);
        }
    }
    debug!(
        band = %band.group_key,
        rows = rows.len(),
        strategy = strategy.as_str(),
        opacity_lower,
        opacity_upper = band.opacity_upper,
        "classified band"
    );

    BandBounds { strategy, opacity_lower, opacity_upper: band.opacity_upper, rows: bounds }
}

fn band_layers(band: &BandDescriptor, bounds: BandBounds, style: &SeriesStyle) -> LayerGroup {
    let layer = |fill_opacity: f64, points: Vec<Point>| {
        Layer::Band(BandLayer {
            name: band.name.clone(),
            group_key: band.group_key.clone(),
            stack_strategy: bounds.strategy,
            fill_opacity,
            color: style.band_fill,
            item: style.band_item,
            points,
        })
    };
    let lower = bounds.rows.iter().map(|b| (b.x.clone(), b.lower.clone())).collect();
    let upper = bounds.rows.iter().map(|b| (b.x.clone(), b.upper.clone())).collect();
    vec![layer(bounds.opacity_lower, lower), layer(bounds.opacity_upper, upper)]
}

fn line_points(rows: &[Row], x_axis: &str, key: &str) -> Vec<Point> {
    rows.iter().map(|r| (r.get(x_axis), r.get(key))).collect()
}

/// Build every layer group: one per band (lower + upper), then the prediction
/// line, then one line per plain metric.
pub fn build_series(
    inputs: &SeriesInputs<'_>,
    colors: &dyn ColorScale,
    style: &SeriesStyle,
) -> Vec<LayerGroup> {
    let mut groups = Vec::with_capacity(inputs.bands.len() + inputs.metrics.len() + 1);

    for band in inputs.bands {
        let bounds = classify_bounds(inputs.rows, inputs.x_axis, band);
        groups.push(band_layers(band, bounds, style));
    }

    if let Some(key) = inputs.prediction {
        groups.push(vec![Layer::Line(LineLayer {
            name: inputs.label_map.display(key).to_string(),
            color: style.prediction_color,
            line_opacity: 1.0,
            stroke: Some(style.prediction_stroke),
            points: line_points(inputs.rows, inputs.x_axis, key),
        })]);
    }

    for key in inputs.metrics {
        groups.push(vec![Layer::Line(LineLayer {
            name: inputs.label_map.display(key).to_string(),
            color: colors.color_of(key).unwrap_or(style.metric_fallback),
            line_opacity: 1.0,
            stroke: None,
            points: line_points(inputs.rows, inputs.x_axis, key),
        })]);
    }

    debug!(groups = groups.len(), rows = inputs.rows.len(), "built confidence band series");
    groups
}

/// Flatten layer groups preserving order.
pub fn flatten(groups: Vec<LayerGroup>) -> Vec<Layer> {
    groups.into_iter().flatten().collect()
}
