// File: crates/bands-core/src/theme.rs
// Summary: Colors and the named style constants used when building band and line layers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color; serialized as `#rrggbb` (alpha is carried separately as opacity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() { return None; }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Solid,
    Dashed,
    Dotted,
}

/// Stroke override for a line layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub line_type: LineType,
}

/// Item style shared by the band layers (marker color and opacity).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemStyle {
    pub color: Color,
    pub opacity: f64,
}

/// Named style constants threaded into the series builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Fill color of every band area (one color for all levels).
    pub band_fill: Color,
    pub band_item: ItemStyle,
    pub prediction_color: Color,
    pub prediction_stroke: Stroke,
    /// Used when the color scale has nothing for a metric.
    pub metric_fallback: Color,
}

impl SeriesStyle {
    pub const PREDICTION_COLOR: Color = Color::rgb(0x2c, 0x32, 0x27);
    pub const BAND_FILL: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const METRIC_FALLBACK: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn classic() -> Self {
        Self {
            band_fill: Self::BAND_FILL,
            band_item: ItemStyle { color: Self::BAND_FILL, opacity: 0.6 },
            prediction_color: Self::PREDICTION_COLOR,
            prediction_stroke: Stroke {
                color: Self::PREDICTION_COLOR,
                width: 1.5,
                line_type: LineType::Dashed,
            },
            metric_fallback: Self::METRIC_FALLBACK,
        }
    }
}

impl Default for SeriesStyle {
    fn default() -> Self { Self::classic() }
}
