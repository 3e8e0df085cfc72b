// File: crates/bands-core/src/color.rs
// Summary: Color-assignment capability and a categorical, scheme-backed implementation.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::theme::Color;

/// Color lookup injected into the series builder.
/// The builder only reads from it; any memoization is the implementor's business.
pub trait ColorScale {
    fn color_of(&self, key: &str) -> Option<Color>;
}

impl<F> ColorScale for F
where
    F: Fn(&str) -> Option<Color>,
{
    fn color_of(&self, key: &str) -> Option<Color> { self(key) }
}

/// Scale that never assigns a color; every metric gets the fallback.
pub struct NoColors;

impl ColorScale for NoColors {
    fn color_of(&self, _key: &str) -> Option<Color> { None }
}

const SUPERSET_COLORS: [&str; 20] = [
    "#1FA8C9", "#454E7C", "#5AC189", "#FF7F44", "#666666",
    "#E04355", "#FCC700", "#A868B7", "#3CCCCB", "#A38F79",
    "#8FD3E4", "#A1A6BD", "#ACE1C4", "#FEC0A1", "#B2B2B2",
    "#EFA1AA", "#FDE380", "#D3B3DA", "#9EE5E5", "#D1C6BC",
];

const D3_CATEGORY_10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Name of the scheme used when none (or an unknown one) is requested.
pub const DEFAULT_SCHEME: &str = "supersetColors";

/// Return the palette registered under `name`, if any.
pub fn scheme(name: &str) -> Option<Vec<Color>> {
    let hexes: &[&str] = match name {
        "supersetColors" => &SUPERSET_COLORS,
        "d3Category10" => &D3_CATEGORY_10,
        _ => return None,
    };
    Some(hexes.iter().filter_map(|h| Color::from_hex(h)).collect())
}

/// Assigns palette colors to keys in first-seen order; a key keeps its color.
pub struct CategoricalColorScale {
    palette: Vec<Color>,
    assigned: RefCell<HashMap<String, Color>>,
}

impl CategoricalColorScale {
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette, assigned: RefCell::new(HashMap::new()) }
    }

    /// Scale for a named scheme, falling back to the default scheme.
    pub fn from_scheme(name: Option<&str>) -> Self {
        let palette = name
            .and_then(scheme)
            .or_else(|| scheme(DEFAULT_SCHEME))
            .unwrap_or_default();
        Self::new(palette)
    }

    pub fn len(&self) -> usize { self.assigned.borrow().len() }

    pub fn is_empty(&self) -> bool { self.assigned.borrow().is_empty() }
}

impl Default for CategoricalColorScale {
    fn default() -> Self { Self::from_scheme(None) }
}

impl ColorScale for CategoricalColorScale {
    fn color_of(&self, key: &str) -> Option<Color> {
        if self.palette.is_empty() { return None; }
        let mut assigned = self.assigned.borrow_mut();
        if let Some(c) = assigned.get(key) { return Some(*c); }
        let c = self.palette[assigned.len() % self.palette.len()];
        assigned.insert(key.to_string(), c);
        Some(c)
    }
}
