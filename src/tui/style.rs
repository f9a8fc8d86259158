//! Color constants and scaling helpers for the TUI.

use ratatui::style::Color;

/// GHI series line color.
pub const GHI_COLOR: Color = Color::Yellow;
/// DNI series line color.
pub const DNI_COLOR: Color = Color::Magenta;
/// DHI series line color.
pub const DHI_COLOR: Color = Color::Cyan;
/// GHI histogram bar color.
pub const GHI_BAR: Color = Color::Yellow;
/// Wind speed histogram bar color.
pub const WS_BAR: Color = Color::Cyan;
/// ModA bar color in the cleaning-impact chart.
pub const MODA_COLOR: Color = Color::Green;
/// ModB bar color in the cleaning-impact chart.
pub const MODB_COLOR: Color = Color::LightBlue;
/// Bubble scatter point color.
pub const BUBBLE_COLOR: Color = Color::LightYellow;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Sidebar selection highlight.
pub const SELECTED_FG: Color = Color::Cyan;
/// Warning message color.
pub const WARNING_FG: Color = Color::Yellow;
/// Load error message color.
pub const ERROR_FG: Color = Color::Red;
/// Masked or undefined heatmap cells.
pub const MASKED_FG: Color = Color::DarkGray;

/// Coolwarm ramp endpoint for r = -1.
const COOL: (u8, u8, u8) = (59, 76, 192);
/// Coolwarm midpoint for r = 0.
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
/// Coolwarm ramp endpoint for r = +1.
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Maps a correlation coefficient onto the coolwarm ramp.
///
/// NaN coefficients (undefined correlations) render in the masked color.
pub fn corr_color(r: f64) -> Color {
    if r.is_nan() {
        return MASKED_FG;
    }
    let t = (r.clamp(-1.0, 1.0) + 1.0) / 2.0;
    let (lo, hi, u) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    Color::Rgb(lerp(lo.0, hi.0, u), lerp(lo.1, hi.1, u), lerp(lo.2, hi.2, u))
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

/// Computes axis bounds from chart values with 10% padding.
pub fn auto_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corr_color_endpoints() {
        assert_eq!(corr_color(-1.0), Color::Rgb(COOL.0, COOL.1, COOL.2));
        assert_eq!(corr_color(1.0), Color::Rgb(WARM.0, WARM.1, WARM.2));
        assert_eq!(corr_color(0.0), Color::Rgb(NEUTRAL.0, NEUTRAL.1, NEUTRAL.2));
    }

    #[test]
    fn corr_color_nan_uses_masked_color() {
        assert_eq!(corr_color(f64::NAN), MASKED_FG);
    }

    #[test]
    fn auto_bounds_pads_the_range() {
        let [lo, hi] = auto_bounds([0.0_f64, 10.0].into_iter());
        assert!(lo < 0.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn auto_bounds_empty_input_falls_back() {
        assert_eq!(auto_bounds(std::iter::empty()), [-1.0, 1.0]);
    }
}
