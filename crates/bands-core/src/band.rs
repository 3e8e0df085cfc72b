// File: crates/bands-core/src/band.rs
// Summary: Confidence band levels and extraction of band descriptors from the chart configuration.

use tracing::trace;

use crate::types::MetricRef;

/// Number of configurable band levels.
pub const LEVEL_COUNT: usize = 4;

/// Fixed per-level defaults. Opacity grows inward as confidence drops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLevel {
    /// Stacking group key; also the configuration field the level is read from.
    pub key: &'static str,
    pub default_name: &'static str,
    pub opacity: f64,
}

pub const BAND_LEVELS: [BandLevel; LEVEL_COUNT] = [
    BandLevel { key: "bandConfidenceL1", default_name: "Bound L1 (95%)", opacity: 0.05 },
    BandLevel { key: "bandConfidenceL2", default_name: "Bound L2 (85%)", opacity: 0.07 },
    BandLevel { key: "bandConfidenceL3", default_name: "Bound L3 (75%)", opacity: 0.10 },
    BandLevel { key: "bandConfidenceL4", default_name: "Bound L4 (65%)", opacity: 0.20 },
];

/// One band level ready for series construction.
/// Contract: `metric_labels.len() >= 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct BandDescriptor {
    pub name: String,
    pub group_key: String,
    pub opacity_lower: f64,
    pub opacity_upper: f64,
    pub metric_labels: Vec<String>,
}

impl BandDescriptor {
    /// Descriptor for `level` (0-based) with its default name and opacity.
    pub fn for_level(level: usize, metric_labels: Vec<String>) -> Self {
        let defaults = &BAND_LEVELS[level];
        Self {
            name: defaults.default_name.to_string(),
            group_key: defaults.key.to_string(),
            opacity_lower: defaults.opacity,
            opacity_upper: defaults.opacity,
            metric_labels,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Override name, unless it is blank.
fn display_override(name: Option<&String>) -> Option<&str> {
    name.map(String::as_str).filter(|n| !n.trim().is_empty())
}

/// Build descriptors for every level bound to at least two metrics.
///
/// `levels[i]` holds the metrics assigned to level `i + 1`; `names[i]` is an
/// optional display override for that level (blank means absent). Levels with
/// fewer than two metrics are skipped and leave no gap in the output.
pub fn extract_band_descriptors(
    levels: [&[MetricRef]; LEVEL_COUNT],
    names: &[String],
) -> Vec<BandDescriptor> {
    let mut out = Vec::with_capacity(LEVEL_COUNT);
    for (i, metrics) in levels.iter().enumerate() {
        if metrics.len() < 2 {
            trace!(level = i + 1, metrics = metrics.len(), "skipping band level");
            continue;
        }
        let labels = metrics.iter().map(|m| m.key().to_string()).collect();
        let mut band = BandDescriptor::for_level(i, labels);
        if let Some(name) = display_override(names.get(i)) {
            band = band.with_name(name);
        }
        out.push(band);
    }
    out
}
