//! Color mapping for the choropleth ramp.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as a hex color: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Neutral fill for regions with no defined ratio (no matching result row,
/// or zero expressed ballots).
pub(crate) const NO_DATA: Rgb = Rgb { r: 217, g: 217, b: 217 };

/// Sequential light-to-dark ramp for a ratio in [0.0, 1.0].
///
/// Piecewise-linear interpolation between OrRd scale stops. Values outside
/// the nominal domain are clamped; non-finite input falls back to the
/// no-data gray.
pub(crate) fn ratio_color(ratio: f64) -> Rgb {
    if !ratio.is_finite() { return NO_DATA }

    let x = ratio.clamp(0.0, 1.0);

    const STOPS: &[(f64, Rgb)] = &[
        (0.00, Rgb { r: 255, g: 247, b: 236 }),
        (0.25, Rgb { r: 253, g: 212, b: 158 }),
        (0.50, Rgb { r: 252, g: 141, b:  89 }),
        (0.75, Rgb { r: 215, g:  48, b:  31 }),
        (1.00, Rgb { r: 127, g:   0, b:   0 }),
    ];

    for window in STOPS.windows(2) {
        let (lo, from) = window[0];
        let (hi, to) = window[1];
        if x <= hi {
            let t = if hi > lo { (x - lo) / (hi - lo) } else { 0.0 };
            return Rgb {
                r: lerp(from.r, to.r, t),
                g: lerp(from.g, to.g, t),
                b: lerp(from.b, to.b, t),
            };
        }
    }

    STOPS[STOPS.len() - 1].1
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}
