// File: crates/bands-core/src/lib.rs
// Summary: Core library entry point; exports band extraction, series building and the chart plugin.

pub mod band;
pub mod color;
pub mod error;
pub mod form_data;
pub mod options;
pub mod plugin;
pub mod query;
pub mod series;
pub mod theme;
pub mod types;

pub use band::{extract_band_descriptors, BandDescriptor, BAND_LEVELS};
pub use color::{CategoricalColorScale, ColorScale, NoColors};
pub use error::{Error, Result};
pub use form_data::FormData;
pub use options::{transform_props, ChartProps, QueryResult, TransformedProps};
pub use plugin::{ChartPlugin, ConfidenceBandsPlugin, PluginRegistry};
pub use query::{build_query, QueryContext, QueryObject};
pub use series::{build_series, classify_bounds, flatten, Layer, LayerGroup, SeriesInputs, StackStrategy};
pub use theme::{Color, SeriesStyle};
pub use types::{LabelMap, MetricRef, Row, Value};
