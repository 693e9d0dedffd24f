//! WCAG relative luminance and contrast ratio.

use crate::rgb::{ColorParseError, Rgb};

/// Relative luminance of an RGB color per WCAG 2.x.
///
/// Each channel is normalized to `[0, 1]`, linearized, and the channels are
/// combined with the standard coefficients.
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(value: u8) -> f64 {
        let c = value as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
///
/// Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = luminance(a.r, a.g, a.b);
    let lb = luminance(b.r, b.g, b.b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Parse two color specifications and compute their contrast ratio.
pub fn contrast_between(a: &str, b: &str) -> Result<f64, ColorParseError> {
    Ok(contrast_ratio(Rgb::parse(a)?, Rgb::parse(b)?))
}
