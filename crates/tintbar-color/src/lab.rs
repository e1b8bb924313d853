#![forbid(unsafe_code)]

//! CIELAB conversion and the CIEDE2000 distance.
//!
//! sRGB channels are gamma-decoded with the standard piecewise function,
//! run through the D65 sRGB→XYZ matrix, and mapped to L*a*b*.
//! [`delta_e_2000`] implements the full CIEDE2000 formula including the
//! blue-region rotation term, with the k_L = k_C = k_H = 1 weights.
//!
//! # Invariants
//!
//! 1. `delta_e_2000(a, b) == delta_e_2000(b, a)` for all colors.
//! 2. `delta_e_2000(a, a) == 0`.
//! 3. The distance is non-negative and finite for all valid inputs.

use crate::rgb::Rgb;

/// D65 reference white in XYZ.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

/// CIE ε = (6/29)³, the linear/cube-root split point of the Lab transfer
/// function.
const LAB_EPSILON: f64 = 216.0 / 24389.0;
/// CIE κ = (29/3)³, slope of the linear segment.
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// A color in CIELAB space (D65).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lab {
    /// Lightness, [0,100].
    pub l: f64,
    /// Green–red axis.
    pub a: f64,
    /// Blue–yellow axis.
    pub b: f64,
}

impl Lab {
    pub(crate) fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.channels();
        let r = srgb_decode(r / 255.0);
        let g = srgb_decode(g / 255.0);
        let b = srgb_decode(b / 255.0);

        // sRGB D65 primaries.
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Chroma: `sqrt(a² + b²)`.
    #[inline]
    #[must_use]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

fn srgb_decode(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

/// CIEDE2000 perceptual distance between two colors.
///
/// Symmetric, non-negative, zero iff the colors coincide in Lab space.
/// Distances around 2 are just noticeable; chrome roles in tintbar are
/// held tens of units apart.
#[must_use]
pub fn delta_e_2000(a: Rgb, b: Rgb) -> f64 {
    let lab1 = a.to_lab();
    let lab2 = b.to_lab();

    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let c_bar = (c1 + c2) / 2.0;

    // Chroma-dependent a-axis rescaling.
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + 25.0f64.powi(7))).sqrt());
    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);

    let h1p = hue_prime(lab1.b, a1p);
    let h2p = hue_prime(lab2.b, a2p);

    let dl = lab2.l - lab1.l;
    let dc = c2p - c1p;

    let dh = if c1p * c2p == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d.abs() <= 180.0 {
            d
        } else if d > 180.0 {
            d - 360.0
        } else {
            d + 360.0
        }
    };
    let dh_big = 2.0 * (c1p * c2p).sqrt() * (dh / 2.0).to_radians().sin();

    let l_bar = (lab1.l + lab2.l) / 2.0;
    let cp_bar = (c1p + c2p) / 2.0;

    let h_bar = if c1p * c2p == 0.0 {
        h1p + h2p
    } else {
        let sum = h1p + h2p;
        if (h1p - h2p).abs() <= 180.0 {
            sum / 2.0
        } else if sum < 360.0 {
            (sum + 360.0) / 2.0
        } else {
            (sum - 360.0) / 2.0
        }
    };

    let t = 1.0 - 0.17 * (h_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar).to_radians().cos()
        + 0.32 * (3.0 * h_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar - 63.0).to_radians().cos();

    let d_theta = 30.0 * (-((h_bar - 275.0) / 25.0).powi(2)).exp();
    let cp_bar7 = cp_bar.powi(7);
    let r_c = 2.0 * (cp_bar7 / (cp_bar7 + 25.0f64.powi(7))).sqrt();
    let r_t = -r_c * (2.0 * d_theta).to_radians().sin();

    let l_dev = (l_bar - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_dev / (20.0 + l_dev).sqrt();
    let s_c = 1.0 + 0.045 * cp_bar;
    let s_h = 1.0 + 0.015 * cp_bar * t;

    let dl = dl / s_l;
    let dc = dc / s_c;
    let dh_big = dh_big / s_h;

    (dl * dl + dc * dc + dh_big * dh_big + r_t * dc * dh_big).sqrt()
}

/// Hue angle of (b, a'), in degrees [0,360). Zero for achromatic input.
fn hue_prime(b: f64, ap: f64) -> f64 {
    if b == 0.0 && ap == 0.0 {
        return 0.0;
    }
    b.atan2(ap).to_degrees().rem_euclid(360.0)
}
