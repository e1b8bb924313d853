#![forbid(unsafe_code)]

//! WCAG contrast ratio and relative luminance.

use crate::rgb::Rgb;

/// WCAG AA minimum contrast for normal text.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// WCAG AA minimum contrast for large text.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// WCAG AAA minimum contrast for normal text.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;

/// WCAG relative luminance in [0,1].
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.channels();
    0.2126 * linearize(r / 255.0) + 0.7152 * linearize(g / 255.0) + 0.0722 * linearize(b / 255.0)
}

fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio `(L_hi + 0.05) / (L_lo + 0.05)`.
///
/// Symmetric; in [1, 21]; exactly 1 for colors of equal relative
/// luminance.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Whether `fg` on `bg` meets WCAG AA for normal text.
#[must_use]
pub fn meets_wcag_aa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_NORMAL_TEXT
}

/// Whether `fg` on `bg` meets WCAG AA for large text.
#[must_use]
pub fn meets_wcag_aa_large_text(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_LARGE_TEXT
}

/// Whether `fg` on `bg` meets WCAG AAA for normal text.
#[must_use]
pub fn meets_wcag_aaa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AAA_NORMAL_TEXT
}

/// Black or white, whichever contrasts more against `bg`.
#[must_use]
pub fn best_text_color(bg: Rgb) -> Rgb {
    if contrast_ratio(Rgb::WHITE, bg) >= contrast_ratio(Rgb::BLACK, bg) {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
