#![forbid(unsafe_code)]

//! Perceptual color metrics for tintbar.
//!
//! # Role in tintbar
//! `tintbar-color` is the shared vocabulary for color values and the
//! perceptual math the scheme engine is built on. It knows nothing about
//! palettes, themes, or roles; `tintbar-scheme` composes these primitives
//! into the selection and refinement pipeline.
//!
//! # This crate provides
//! - [`Rgb`] as the immutable color value type, with tint/shade/tone
//!   mixing and hex parsing.
//! - [`Hsl`] with round-trip conversions on the [0,1] normalized
//!   convention.
//! - [`Lab`] (CIELAB, D65) and [`delta_e_2000`] perceptual distance.
//! - WCAG relative luminance, [`contrast_ratio`], and AA/AAA predicates.
//! - [`Rgb::hsp`], a fast perceived-brightness proxy.
//!
//! # Contracts
//! Every function is total over valid channel inputs: no panics, no
//! `Result`s, channels clamped to [0,255] before a value is returned.
//! Given equal inputs all functions return bit-identical outputs.

/// WCAG contrast ratio and relative luminance.
pub mod contrast;
/// Hue/saturation/lightness representation and conversions.
pub mod hsl;
/// CIELAB conversion and the CIEDE2000 distance.
pub mod lab;
/// The RGB value type and channel mixing.
pub mod rgb;

pub use contrast::{
    WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_NORMAL_TEXT, best_text_color,
    contrast_ratio, meets_wcag_aa, meets_wcag_aa_large_text, meets_wcag_aaa, relative_luminance,
};
pub use hsl::Hsl;
pub use lab::{Lab, delta_e_2000};
pub use rgb::Rgb;
