//! Color utilities for charts

use plotters::style::RGBColor;

/// Brand red, `#E50914`
pub const NETFLIX_RED: RGBColor = RGBColor(229, 9, 20);

/// Brand near-black, `#221F1F`
pub const NETFLIX_DARK: RGBColor = RGBColor(34, 31, 31);

/// Get a categorical color from the brand palette
pub fn categorical_color(index: usize) -> RGBColor {
    const PALETTE: &[RGBColor] = &[NETFLIX_RED, NETFLIX_DARK];
    PALETTE[index % PALETTE.len()]
}

/// Reversed "Reds" ramp: `t = 0` is the darkest red, `t = 1` the palest
pub fn reds_reversed(t: f64) -> RGBColor {
    let color = colorous::REDS.eval_continuous(1.0 - t.clamp(0.0, 1.0));
    RGBColor(color.r, color.g, color.b)
}

/// `count` colors spread along [`reds_reversed`], darkest first
pub fn reds_reversed_palette(count: usize) -> Vec<RGBColor> {
    match count {
        0 => Vec::new(),
        1 => vec![reds_reversed(0.0)],
        _ => (0..count)
            .map(|i| reds_reversed(i as f64 / (count - 1) as f64 * 0.85))
            .collect(),
    }
}
