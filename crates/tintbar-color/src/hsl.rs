#![forbid(unsafe_code)]

//! Hue/saturation/lightness representation and conversions.
//!
//! All three components are normalized to [0,1]; hue 0 is red, wrapping
//! at 1. Round trips through [`Rgb`] stay within one unit per channel.

use crate::rgb::{Rgb, clamp_channel};

/// A color in HSL space, all components in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue, [0,1), red at 0.
    pub h: f64,
    /// Saturation, [0,1].
    pub s: f64,
    /// Lightness, [0,1].
    pub l: f64,
}

impl Hsl {
    /// Create from components; saturation and lightness are clamped to
    /// [0,1], hue wraps.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(1.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Replace lightness, clamped.
    #[inline]
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Replace saturation, clamped.
    #[inline]
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    /// Hue in degrees, [0,360).
    #[inline]
    #[must_use]
    pub fn hue_degrees(self) -> f64 {
        self.h * 360.0
    }

    pub(crate) fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.channels();
        let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            // Achromatic: hue is undefined, fixed at 0.
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        } / 6.0;

        Self { h, s, l }
    }

    /// Convert back to RGB.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        if self.s == 0.0 {
            let v = clamp_channel(self.l * 255.0);
            return Rgb::new(v, v, v);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        Rgb::new(
            clamp_channel(hue_to_channel(p, q, self.h + 1.0 / 3.0) * 255.0),
            clamp_channel(hue_to_channel(p, q, self.h) * 255.0),
            clamp_channel(hue_to_channel(p, q, self.h - 1.0 / 3.0) * 255.0),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
