// File: crates/bands-core/tests/query.rs
// Purpose: Query context built from form data (metric order, dedup, columns, timeseries flag).

use bands_core::form_data::{DEFAULT_ROW_LIMIT, TIMESTAMP_COLUMN};
use bands_core::{build_query, FormData};

#[test]
fn metrics_include_prediction_plain_and_band_metrics() {
    let form = FormData::from_json(
        r#"{
            "x_axis": "ds",
            "groupby": ["region"],
            "y_prediction_hat": "yhat",
            "metrics": ["y", {"label": "residual", "expressionType": "SQL", "sqlExpression": "y - yhat"}],
            "band_confidence_l1": ["lo95", "hi95"],
            "band_confidence_l2": ["lo85", "hi85", "yhat"],
            "row_limit": "500"
        }"#,
    )
    .expect("decode");
    let ctx = build_query(&form);
    let q = &ctx.queries[0];

    let labels = q.metrics.iter().map(|m| m.label().unwrap_or_default()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["yhat", "y", "residual", "lo95", "hi95", "lo85", "hi85"]);
    assert_eq!(q.columns, vec!["ds".to_string(), "region".to_string()]);
    assert_eq!(q.series_columns, vec!["region".to_string()]);
    assert_eq!(q.is_timeseries, None);
    assert_eq!(q.row_limit, Some(500));
}

#[test]
fn adhoc_metric_fields_are_forwarded() {
    let form = FormData::from_json(
        r#"{"metrics": [{"label": "residual", "expressionType": "SQL", "sqlExpression": "y - yhat"}]}"#,
    )
    .expect("decode");
    let json = serde_json::to_value(build_query(&form)).expect("serialize");
    let metric = &json["queries"][0]["metrics"][0];
    assert_eq!(metric["label"], "residual");
    assert_eq!(metric["sqlExpression"], "y - yhat");
}

#[test]
fn missing_x_axis_marks_timeseries() {
    let form = FormData::default();
    let q = &build_query(&form).queries[0];
    assert!(q.columns.is_empty());
    assert_eq!(q.is_timeseries, Some(true));
    assert_eq!(q.row_limit, Some(DEFAULT_ROW_LIMIT));
    assert_eq!(form.x_axis_label(), TIMESTAMP_COLUMN);
}

#[test]
fn unlabeled_metrics_are_not_queried() {
    let form = FormData::from_json(r#"{"band_confidence_l1": [7, "hi"]}"#).expect("decode");
    let q = &build_query(&form).queries[0];
    assert_eq!(q.metrics.len(), 1);
    assert_eq!(q.metrics[0].label(), Some("hi"));
}
