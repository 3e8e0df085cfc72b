// File: crates/bands-core/src/plugin.rs
// Summary: Chart plugin trait, the confidence bands plugin, and a keyed registry for hosts.

use crate::color::CategoricalColorScale;
use crate::error::{Error, Result};
use crate::form_data::FormData;
use crate::options::{transform_props, ChartProps, TransformedProps};
use crate::query::{build_query, QueryContext};
use crate::theme::SeriesStyle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// A chart type the host can load: turns form data into a query and query
/// results into chart props.
pub trait ChartPlugin {
    fn key(&self) -> &'static str;
    fn metadata(&self) -> ChartMetadata;
    fn build_query(&self, form_data: &FormData) -> QueryContext;
    fn transform_props(&self, props: &ChartProps) -> TransformedProps;
}

/// Time series with up to four stacked confidence bands around a prediction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfidenceBandsPlugin {
    pub style: SeriesStyle,
}

impl ConfidenceBandsPlugin {
    pub const KEY: &'static str = "confidence_bands";

    pub fn new(style: SeriesStyle) -> Self { Self { style } }
}

impl ChartPlugin for ConfidenceBandsPlugin {
    fn key(&self) -> &'static str { Self::KEY }

    fn metadata(&self) -> ChartMetadata {
        ChartMetadata {
            name: "Confidence Bands",
            description: "Time series with a prediction line and up to four confidence band levels.",
            tags: &["Time series", "Forecast", "ECharts"],
        }
    }

    fn build_query(&self, form_data: &FormData) -> QueryContext { build_query(form_data) }

    fn transform_props(&self, props: &ChartProps) -> TransformedProps {
        let colors = CategoricalColorScale::from_scheme(props.form_data.color_scheme.as_deref());
        transform_props(props, &colors, &self.style)
    }
}

/// Plugins keyed by `ChartPlugin::key`, in registration order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn ChartPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self { Self::default() }

    /// Registry with the confidence bands plugin already registered.
    pub fn with_defaults() -> Self {
        let mut r = Self::new();
        r.register(Box::new(ConfidenceBandsPlugin::default()));
        r
    }

    /// Register `plugin`, replacing any plugin with the same key.
    pub fn register(&mut self, plugin: Box<dyn ChartPlugin>) {
        self.plugins.retain(|p| p.key() != plugin.key());
        self.plugins.push(plugin);
    }

    pub fn get(&self, key: &str) -> Result<&dyn ChartPlugin> {
        self.plugins
            .iter()
            .find(|p| p.key() == key)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::UnknownPlugin(key.to_string()))
    }

    pub fn keys(&self) -> Vec<&'static str> { self.plugins.iter().map(|p| p.key()).collect() }
}
