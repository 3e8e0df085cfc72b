// File: crates/bands-core/src/types.rs
// Summary: Shared data types for query results (cell values, rows, label maps, metric references).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One cell of a query result row.
/// Serialized untagged so host JSON (`1.5`, `"abc"`, `true`, `null`) maps
/// directly; arrays and objects are carried through as `Json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Null,
    Json(serde_json::Value),
}

impl Value {
    /// Numeric view of the cell. Text holding a finite number counts, so
    /// bounds delivered as `"2.5"` still order and subtract as numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self { Value::Number(v) }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self { Value::Number(v as f64) }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self { Value::Number(v as f64) }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::Text(v.to_string()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

/// One x-axis position worth of data, keyed by column or metric label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub HashMap<String, Value>);

impl Row {
    pub fn new() -> Self { Self(HashMap::new()) }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Cell for `key`; absent columns read as `Null`.
    pub fn get(&self, key: &str) -> Value {
        self.0.get(key).cloned().unwrap_or(Value::Null)
    }
}

/// Column key -> display labels, as returned alongside query results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(pub HashMap<String, Vec<String>>);

impl LabelMap {
    pub fn new() -> Self { Self(HashMap::new()) }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.0.insert(key.into(), vec![label.into()]);
    }

    /// Preferred display label for `key`, falling back to the key itself.
    pub fn display<'a>(&'a self, key: &'a str) -> &'a str {
        self.0
            .get(key)
            .and_then(|labels| labels.first())
            .filter(|l| !l.is_empty())
            .map(String::as_str)
            .unwrap_or(key)
    }
}

/// A metric as bound in the chart configuration: either a saved metric name
/// or an ad-hoc metric object. Ad-hoc fields other than `label` are kept
/// verbatim so they can be forwarded to the query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricRef {
    Saved(String),
    Adhoc {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(flatten)]
        rest: serde_json::Map<String, serde_json::Value>,
    },
}

impl MetricRef {
    pub fn saved(name: impl Into<String>) -> Self { MetricRef::Saved(name.into()) }

    pub fn adhoc(label: impl Into<String>) -> Self {
        MetricRef::Adhoc { label: Some(label.into()), rest: serde_json::Map::new() }
    }

    /// Entry that could not be recognised; it has no label but still counts.
    pub fn unlabeled() -> Self {
        MetricRef::Adhoc { label: None, rest: serde_json::Map::new() }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MetricRef::Saved(name) => Some(name.as_str()),
            MetricRef::Adhoc { label, .. } => label.as_deref(),
        }
    }

    /// Column key used to read this metric from a row ("" when unlabeled).
    pub fn key(&self) -> &str { self.label().unwrap_or("") }
}

/// Decode a metric list leniently: anything other than a JSON array is an
/// empty list, and unrecognised entries become unlabeled metrics.
pub fn lenient_metrics<'de, D>(deserializer: D) -> Result<Vec<MetricRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(metrics_from_json(raw))
}

/// Decode a single optional metric leniently.
pub fn lenient_metric<'de, D>(deserializer: D) -> Result<Option<MetricRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Null => None,
        other => serde_json::from_value(other).ok(),
    })
}

/// Decode a list of column names leniently (non-strings are skipped).
pub fn lenient_columns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        serde_json::Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

pub(crate) fn metrics_from_json(raw: serde_json::Value) -> Vec<MetricRef> {
    match raw {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_else(|_| MetricRef::unlabeled()))
            .collect(),
        _ => Vec::new(),
    }
}
