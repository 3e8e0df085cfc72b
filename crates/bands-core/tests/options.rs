// File: crates/bands-core/tests/options.rs
// Purpose: Chart option assembly from chart props and plugin registry lookup.

use bands_core::plugin::ChartPlugin;
use bands_core::{ChartProps, ConfidenceBandsPlugin, Error, PluginRegistry};

const PROPS: &str = r#"{
    "width": 800,
    "height": 400,
    "formData": {
        "x_axis": "ds",
        "y_prediction_hat": "yhat",
        "metrics": ["y"],
        "bandConfidenceL1": ["lo95", "hi95"],
        "bandConfidenceL2": ["hi85"],
        "zoomable": true,
        "legend_orientation": "bottom",
        "y_axis_title": "Demand"
    },
    "queriesData": [{
        "data": [
            {"ds": 1700000000000, "yhat": 10.0, "y": 11.0, "lo95": 8.0, "hi95": 12.0},
            {"ds": 1700086400000, "yhat": 11.0, "y": null, "lo95": 9.0, "hi95": 14.0}
        ],
        "label_map": {"yhat": ["Forecast"], "y": ["Actual"]}
    }]
}"#;

#[test]
fn transform_props_assembles_series_in_order() {
    let props = ChartProps::from_json(PROPS).expect("decode props");
    let out = ConfidenceBandsPlugin::default().transform_props(&props);
    assert_eq!((out.width, out.height), (800, 400));

    let opts = &out.echart_options;
    let series = opts["series"].as_array().expect("series array");
    // one band (two layers), prediction, one plain metric
    assert_eq!(series.len(), 4);

    assert_eq!(series[0]["name"], "Bound L1 (95%)");
    assert_eq!(series[0]["stack"], "bandConfidenceL1");
    assert_eq!(series[0]["stackStrategy"], "positive");
    assert_eq!(series[0]["areaStyle"]["opacity"], 0.0);
    assert_eq!(series[0]["areaStyle"]["color"], "#ff0000");
    assert_eq!(series[0]["lineStyle"]["opacity"], 0.0);
    assert_eq!(series[1]["areaStyle"]["opacity"], 0.05);
    assert_eq!(series[1]["data"][1][1], 5.0);

    assert_eq!(series[2]["name"], "Forecast");
    assert_eq!(series[2]["lineStyle"]["type"], "dashed");
    assert_eq!(series[2]["itemStyle"]["color"], "#2c3227");

    assert_eq!(series[3]["name"], "Actual");
    assert!(series[3]["data"][1][1].is_null());
    assert_eq!(series[3]["itemStyle"]["color"], "#1fa8c9");
}

#[test]
fn layout_follows_zoom_and_legend_settings() {
    let props = ChartProps::from_json(PROPS).expect("decode props");
    let opts = ConfidenceBandsPlugin::default().transform_props(&props).echart_options;

    assert_eq!(opts["grid"]["containLabel"], true);
    assert_eq!(opts["grid"]["bottom"], 110);
    assert_eq!(opts["grid"]["top"], 20);
    assert_eq!(opts["legend"]["orient"], "horizontal");
    assert_eq!(opts["legend"]["bottom"], 0);
    assert_eq!(opts["toolbox"]["show"], true);
    assert_eq!(opts["dataZoom"][0]["type"], "slider");
    assert_eq!(opts["yAxis"]["name"], "Demand");
    assert_eq!(opts["xAxis"]["type"], "category");
    assert_eq!(opts["tooltip"]["trigger"], "axis");
}

#[test]
fn missing_query_result_renders_empty_layers() {
    let props = ChartProps::from_json(
        r#"{"formData": {"y_prediction_hat": "yhat", "band_confidence_l1": ["a", "b"]}}"#,
    )
    .expect("decode props");
    let opts = ConfidenceBandsPlugin::default().transform_props(&props).echart_options;
    let series = opts["series"].as_array().expect("series array");
    assert_eq!(series.len(), 3);
    assert!(series.iter().all(|s| s["data"].as_array().is_some_and(|d| d.is_empty())));
    assert_eq!(opts["dataZoom"].as_array().map(Vec::len), Some(0));
    assert_eq!(opts["toolbox"]["show"], false);
}

#[test]
fn invalid_props_report_decode_error() {
    let err = ChartProps::from_json("[1, 2").expect_err("malformed json");
    assert!(matches!(err, Error::InvalidChartProps(_)));
}

#[test]
fn registry_resolves_plugins_by_key() {
    let registry = PluginRegistry::with_defaults();
    assert_eq!(registry.keys(), vec![ConfidenceBandsPlugin::KEY]);
    let plugin = registry.get("confidence_bands").expect("registered");
    assert_eq!(plugin.metadata().name, "Confidence Bands");

    match registry.get("pie") {
        Err(Error::UnknownPlugin(key)) => assert_eq!(key, "pie"),
        _ => panic!("expected unknown plugin error"),
    }
}

#[test]
fn non_numeric_cells_pass_through_decode() {
    let props = ChartProps::from_json(
        r#"{
            "formData": {"x_axis": "ds", "metrics": ["y"], "band_confidence_l1": ["lo", "hi"]},
            "queriesData": [{"data": [
                {"ds": 1, "lo": 1, "hi": 2, "y": 3, "is_holiday": true, "tags": ["a"], "meta": {"k": 1}}
            ]}]
        }"#,
    )
    .expect("decode props with bool and nested cells");
    let out = ConfidenceBandsPlugin::default().transform_props(&props);
    let series = out.echart_options["series"].as_array().expect("series array");
    assert_eq!(series.len(), 3);
    assert_eq!(series[1]["data"][0][1], 1.0);
    assert_eq!(series[2]["data"][0][1], 3.0);
}

#[test]
fn form_data_with_both_spellings_decodes() {
    let props = ChartProps::from_json(
        r#"{
            "formData": {
                "band_confidence_l1": ["lo", "hi"],
                "bandConfidenceL1": ["ignored", "also_ignored"],
                "row_limit": 50,
                "rowLimit": 10
            }
        }"#,
    )
    .expect("decode merged form data");
    assert_eq!(props.form_data.row_limit, Some(50));
    assert_eq!(props.form_data.band_confidence_l1.len(), 2);
    assert_eq!(props.form_data.band_confidence_l1[0].label(), Some("lo"));
}
