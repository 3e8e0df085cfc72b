// File: crates/bands-core/src/options.rs
// Summary: Assembles the charting-library option (grid, legend, axes, series, zoom) from chart props.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};

use crate::band::extract_band_descriptors;
use crate::color::ColorScale;
use crate::error::{Error, Result};
use crate::form_data::{lenient_form_data, FormData, LegendOrientation, LegendType};
use crate::series::{build_series, flatten, Layer, SeriesInputs};
use crate::theme::SeriesStyle;
use crate::types::{LabelMap, Row};

/// Layout offsets, in pixels.
pub mod offsets {
    pub const GRID: u32 = 20;
    pub const GRID_BOTTOM_ZOOMABLE: u32 = 80;
    pub const LEGEND: u32 = 30;
    pub const ZOOM_BOTTOM: u32 = 30;
    pub const TOOLBOX_TOP: u32 = 0;
    pub const TOOLBOX_RIGHT: u32 = 5;
    pub const DATA_ZOOM_START: u32 = 0;
    pub const DATA_ZOOM_END: u32 = 100;
}

/// One query result as returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResult {
    pub data: Vec<Row>,
    pub label_map: LabelMap,
}

/// Everything the host hands over for one render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartProps {
    pub width: u32,
    pub height: u32,
    #[serde(alias = "formData", deserialize_with = "lenient_form_data")]
    pub form_data: FormData,
    #[serde(alias = "queriesData")]
    pub queries_data: Vec<QueryResult>,
}

impl ChartProps {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(Error::InvalidChartProps)
    }

    /// First query result; an absent one reads as empty.
    pub fn query(&self) -> QueryResult {
        self.queries_data.first().cloned().unwrap_or_default()
    }
}

/// Props handed to the chart component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransformedProps {
    pub width: u32,
    pub height: u32,
    pub echart_options: Json,
}

/// Charting-library entry for one layer.
pub fn layer_option(layer: &Layer) -> Json {
    match layer {
        Layer::Band(b) => json!({
            "name": b.name,
            "type": "line",
            "lineStyle": { "opacity": 0.0 },
            "itemStyle": { "color": b.item.color, "opacity": b.item.opacity },
            "stackStrategy": b.stack_strategy,
            "stack": b.group_key,
            "areaStyle": { "color": b.color, "opacity": b.fill_opacity },
            "data": b.points,
        }),
        Layer::Line(l) => {
            let mut line_style = json!({ "opacity": l.line_opacity });
            if let Some(s) = &l.stroke {
                line_style["color"] = json!(s.color);
                line_style["width"] = json!(s.width);
                line_style["type"] = json!(s.line_type);
            }
            json!({
                "name": l.name,
                "type": "line",
                "lineStyle": line_style,
                "itemStyle": { "color": l.color },
                "data": l.points,
            })
        }
    }
}

fn grid(form: &FormData) -> Json {
    let mut top = offsets::GRID;
    let mut bottom = if form.zoomable { offsets::GRID_BOTTOM_ZOOMABLE } else { offsets::GRID };
    let mut left = offsets::GRID;
    let mut right = offsets::GRID;
    if form.show_legend {
        match form.legend_orientation {
            LegendOrientation::Top => top += offsets::LEGEND,
            LegendOrientation::Bottom => bottom += offsets::LEGEND,
            LegendOrientation::Left => left += offsets::LEGEND,
            LegendOrientation::Right => right += offsets::LEGEND,
        }
    }
    json!({ "containLabel": true, "top": top, "bottom": bottom, "left": left, "right": right })
}

fn legend(form: &FormData) -> Json {
    let kind = match form.legend_type {
        LegendType::Scroll => "scroll",
        LegendType::Plain => "plain",
    };
    let (orient, side) = match form.legend_orientation {
        LegendOrientation::Top => ("horizontal", "top"),
        LegendOrientation::Bottom => ("horizontal", "bottom"),
        LegendOrientation::Left => ("vertical", "left"),
        LegendOrientation::Right => ("vertical", "right"),
    };
    let mut out = json!({ "show": form.show_legend, "type": kind, "orient": orient });
    out[side] = json!(0);
    out
}

/// Transform chart props into the option object for the charting library.
pub fn transform_props(props: &ChartProps, colors: &dyn ColorScale, style: &SeriesStyle) -> TransformedProps {
    let form = &props.form_data;
    let query = props.query();

    let bands = extract_band_descriptors(form.band_levels(), &form.band_names);
    let metrics = form.metric_keys();
    let inputs = SeriesInputs {
        rows: &query.data,
        x_axis: form.x_axis_label(),
        bands: &bands,
        prediction: form.prediction_key(),
        metrics: &metrics,
        label_map: &query.label_map,
    };
    let series = flatten(build_series(&inputs, colors, style))
        .iter()
        .map(layer_option)
        .collect::<Vec<_>>();

    let data_zoom = if form.zoomable {
        json!([{
            "type": "slider",
            "start": offsets::DATA_ZOOM_START,
            "end": offsets::DATA_ZOOM_END,
            "bottom": offsets::ZOOM_BOTTOM,
        }])
    } else {
        json!([])
    };

    let echart_options = json!({
        "grid": grid(form),
        "legend": legend(form),
        "xAxis": { "type": "category", "name": form.x_axis_title },
        "yAxis": { "type": "value", "name": form.y_axis_title },
        "series": series,
        "toolbox": {
            "show": form.zoomable,
            "top": offsets::TOOLBOX_TOP,
            "right": offsets::TOOLBOX_RIGHT,
            "feature": {
                "dataZoom": {
                    "yAxisIndex": false,
                    "title": { "zoom": "zoom area", "back": "restore zoom" },
                },
            },
        },
        "tooltip": { "trigger": "axis" },
        "dataZoom": data_zoom,
    });

    TransformedProps { width: props.width, height: props.height, echart_options }
}
