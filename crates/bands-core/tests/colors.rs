// File: crates/bands-core/tests/colors.rs
// Purpose: Hex color parsing and categorical color assignment.

use bands_core::color::{scheme, DEFAULT_SCHEME};
use bands_core::{CategoricalColorScale, Color, ColorScale};

#[test]
fn hex_round_trip_and_short_form() {
    let c = Color::from_hex("#2C3227").expect("valid hex");
    assert_eq!(c, Color::rgb(0x2c, 0x32, 0x27));
    assert_eq!(c.to_hex(), "#2c3227");
    assert_eq!(Color::from_hex("f00"), Some(Color::rgb(255, 0, 0)));
    assert_eq!(Color::from_hex("#12345"), None);
    assert_eq!(Color::from_hex("#zzzzzz"), None);
}

#[test]
fn same_key_keeps_its_color() {
    let scale = CategoricalColorScale::default();
    let a = scale.color_of("sales");
    let b = scale.color_of("cost");
    assert_ne!(a, b);
    assert_eq!(scale.color_of("sales"), a);
    assert_eq!(scale.len(), 2);
}

#[test]
fn palette_wraps_and_unknown_scheme_falls_back() {
    let palette = vec![Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)];
    let scale = CategoricalColorScale::new(palette.clone());
    assert_eq!(scale.color_of("a"), Some(palette[0]));
    assert_eq!(scale.color_of("b"), Some(palette[1]));
    assert_eq!(scale.color_of("c"), Some(palette[0]));

    let fallback = CategoricalColorScale::from_scheme(Some("no-such-scheme"));
    let first = scheme(DEFAULT_SCHEME).expect("default scheme")[0];
    assert_eq!(fallback.color_of("x"), Some(first));
}

#[test]
fn empty_palette_assigns_nothing() {
    let scale = CategoricalColorScale::new(Vec::new());
    assert_eq!(scale.color_of("a"), None);
    assert!(scale.is_empty());
}
