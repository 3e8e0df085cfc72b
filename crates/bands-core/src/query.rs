// File: crates/bands-core/src/query.rs
// Summary: Builds the backend query context from the chart configuration.

use serde::{Deserialize, Serialize};

use crate::form_data::FormData;
use crate::types::MetricRef;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryObject {
    pub metrics: Vec<MetricRef>,
    pub columns: Vec<String>,
    pub series_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_timeseries: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_limit: Option<u64>,
    pub filters: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryContext {
    pub queries: Vec<QueryObject>,
}

/// Push `metric` unless a metric with the same label is already present.
/// Unlabeled metrics are never queried.
fn push_unique(out: &mut Vec<MetricRef>, metric: &MetricRef) {
    let Some(label) = metric.label() else { return };
    if out.iter().any(|m| m.label() == Some(label)) { return; }
    out.push(metric.clone());
}

/// Query for the chart: prediction, plain metrics, then every band metric.
pub fn build_query(form_data: &FormData) -> QueryContext {
    let mut metrics = Vec::new();
    if let Some(p) = &form_data.y_prediction_hat {
        push_unique(&mut metrics, p);
    }
    for m in &form_data.metrics {
        push_unique(&mut metrics, m);
    }
    for level in form_data.band_levels() {
        for m in level {
            push_unique(&mut metrics, m);
        }
    }

    let mut columns = Vec::with_capacity(form_data.groupby.len() + 1);
    if form_data.has_x_axis() {
        columns.push(form_data.x_axis_label().to_string());
    }
    columns.extend(form_data.groupby.iter().cloned());

    QueryContext {
        queries: vec![QueryObject {
            metrics,
            columns,
            series_columns: form_data.groupby.clone(),
            is_timeseries: (!form_data.has_x_axis()).then_some(true),
            row_limit: form_data.row_limit,
            filters: form_data.adhoc_filters.clone(),
        }],
    }
}
