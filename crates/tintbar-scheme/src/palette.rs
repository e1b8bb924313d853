#![forbid(unsafe_code)]

//! The weighted palette input and the working candidate pool.
//!
//! A [`Palette`] is the validated, immutable input: exactly twelve
//! colors with pixel-count weights summing to ~100. A [`CandidatePool`]
//! is the per-derivation working copy the selectors consume from.
//!
//! # Invariants
//!
//! 1. A constructed `Palette` always holds exactly [`PALETTE_LEN`]
//!    entries with weights in [0,100] summing to 100 ± 1.
//! 2. The pool's prominent view is always a prefix of its full view;
//!    removing an entry keeps both views consistent because there is
//!    only one backing array and one prefix length.
//! 3. The prominent view is non-empty while the pool is non-empty.

use thiserror::Error;
use tintbar_color::{Hsl, Rgb};

/// Required palette size. Weights come from a 12-color quantization of
/// the source image, performed by the caller.
pub const PALETTE_LEN: usize = 12;

/// Tolerance on the weight sum around 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1.0;

/// Cumulative weight the prominent prefix must cover, in percent.
const PROMINENT_COVER: f64 = 90.0;

/// One palette entry: a color and the percentage of source pixels that
/// quantized to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedColor {
    pub color: Rgb,
    /// Weight in percent, [0,100].
    pub weight: f64,
}

impl WeightedColor {
    /// Create an entry.
    #[must_use]
    pub const fn new(color: Rgb, weight: f64) -> Self {
        Self { color, weight }
    }
}

/// Palette validation failure.
#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    /// The palette did not contain exactly [`PALETTE_LEN`] entries.
    #[error("palette must contain exactly {PALETTE_LEN} colors, got {0}")]
    WrongLen(usize),
    /// A weight fell outside [0,100].
    #[error("palette weight at index {index} out of range: {weight}")]
    WeightOutOfRange { index: usize, weight: f64 },
    /// The weights did not sum to 100 within tolerance.
    #[error("palette weights must sum to 100 ± {WEIGHT_SUM_TOLERANCE}, got {0:.2}")]
    BadWeightSum(f64),
}

/// A validated 12-entry weighted palette, ordered by the caller
/// (conventionally descending weight).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    entries: Vec<WeightedColor>,
}

impl Palette {
    /// Validate and wrap a set of weighted colors.
    ///
    /// This is the only fallible surface in the crate: once a `Palette`
    /// exists, scheme derivation is total.
    pub fn new(entries: Vec<WeightedColor>) -> Result<Self, PaletteError> {
        if entries.len() != PALETTE_LEN {
            return Err(PaletteError::WrongLen(entries.len()));
        }
        for (index, e) in entries.iter().enumerate() {
            if !(0.0..=100.0).contains(&e.weight) || !e.weight.is_finite() {
                return Err(PaletteError::WeightOutOfRange { index, weight: e.weight });
            }
        }
        let sum: f64 = entries.iter().map(|e| e.weight).sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PaletteError::BadWeightSum(sum));
        }
        Ok(Self { entries })
    }

    /// The validated entries, in caller order.
    #[must_use]
    pub fn entries(&self) -> &[WeightedColor] {
        &self.entries
    }
}

/// One scoring candidate: a palette entry with its HSL cached, since
/// every role evaluates saturation and lightness repeatedly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub color: Rgb,
    pub hsl: Hsl,
    pub weight: f64,
}

/// The working pool for one derivation.
///
/// One backing array, one prominent-prefix length. Selectors index into
/// either view and [`CandidatePool::take`] keeps both consistent, so
/// there is no parallel index space to drift out of sync.
#[derive(Debug, Clone)]
pub(crate) struct CandidatePool {
    entries: Vec<Candidate>,
    prominent_len: usize,
}

impl CandidatePool {
    /// Build the pool: the prominent prefix is the shortest prefix whose
    /// cumulative weight reaches [`PROMINENT_COVER`], extended to
    /// `prominent_min` entries, capped at the pool length.
    pub fn from_palette(palette: &Palette, prominent_min: usize) -> Self {
        let entries: Vec<Candidate> = palette
            .entries()
            .iter()
            .map(|e| Candidate {
                color: e.color,
                hsl: e.color.to_hsl(),
                weight: e.weight,
            })
            .collect();

        let mut cumulative = 0.0;
        let mut prominent_len = entries.len();
        for (i, c) in entries.iter().enumerate() {
            cumulative += c.weight;
            if cumulative >= PROMINENT_COVER {
                prominent_len = i + 1;
                break;
            }
        }
        let prominent_len = prominent_len.max(prominent_min).min(entries.len());

        Self { entries, prominent_len }
    }

    /// The prominent prefix.
    pub fn prominent(&self) -> &[Candidate] {
        &self.entries[..self.prominent_len]
    }

    /// Every remaining candidate.
    pub fn all(&self) -> &[Candidate] {
        &self.entries
    }

    /// Remove and return the candidate at `index` (into the full view).
    /// Prominent-prefix indices are full-view indices, so a selection
    /// made on either view consumes through this one method.
    pub fn take(&mut self, index: usize) -> Candidate {
        if index < self.prominent_len {
            self.prominent_len -= 1;
        }
        self.entries.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(colors: &[(u8, u8, u8, f64)]) -> Vec<WeightedColor> {
        colors
            .iter()
            .map(|&(r, g, b, w)| WeightedColor::new(Rgb::new(r, g, b), w))
            .collect()
    }

    fn even_palette() -> Palette {
        let entries = (0..PALETTE_LEN)
            .map(|i| WeightedColor::new(Rgb::new(i as u8 * 20, 100, 150), 100.0 / 12.0))
            .collect();
        Palette::new(entries).unwrap()
    }

    #[test]
    fn new_rejects_wrong_length() {
        assert_eq!(Palette::new(vec![]), Err(PaletteError::WrongLen(0)));
        let thirteen = (0..13).map(|_| WeightedColor::new(Rgb::BLACK, 100.0 / 13.0)).collect();
        assert_eq!(Palette::new(thirteen), Err(PaletteError::WrongLen(13)));
    }

    #[test]
    fn new_rejects_out_of_range_weight() {
        let mut entries = even_palette().entries().to_vec();
        entries[3].weight = -1.0;
        assert!(matches!(
            Palette::new(entries),
            Err(PaletteError::WeightOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn new_rejects_bad_weight_sum() {
        let entries = (0..PALETTE_LEN).map(|_| WeightedColor::new(Rgb::BLACK, 5.0)).collect();
        assert!(matches!(Palette::new(entries), Err(PaletteError::BadWeightSum(_))));
    }

    #[test]
    fn new_accepts_sum_within_tolerance() {
        let mut entries: Vec<WeightedColor> =
            (0..PALETTE_LEN).map(|_| WeightedColor::new(Rgb::BLACK, 100.0 / 12.0)).collect();
        entries[0].weight += 0.9;
        assert!(Palette::new(entries).is_ok());
    }

    #[test]
    fn prominent_prefix_covers_ninety_percent() {
        // 60 + 20 + 12 = 92 >= 90 after three entries.
        let mut raw = vec![(200, 10, 10, 60.0), (10, 200, 10, 20.0), (10, 10, 200, 12.0)];
        for _ in 0..9 {
            raw.push((40, 40, 40, 8.0 / 9.0));
        }
        let palette = Palette::new(weighted(&raw)).unwrap();
        let pool = CandidatePool::from_palette(&palette, 0);
        assert_eq!(pool.prominent().len(), 3);
    }

    #[test]
    fn prominent_prefix_extends_to_minimum() {
        let mut raw = vec![(200, 10, 10, 95.0)];
        for _ in 0..11 {
            raw.push((40, 40, 40, 5.0 / 11.0));
        }
        let palette = Palette::new(weighted(&raw)).unwrap();
        let pool = CandidatePool::from_palette(&palette, 5);
        assert_eq!(pool.prominent().len(), 5);
    }

    #[test]
    fn prominent_minimum_caps_at_pool_length() {
        let pool = CandidatePool::from_palette(&even_palette(), 40);
        assert_eq!(pool.prominent().len(), PALETTE_LEN);
    }

    #[test]
    fn take_inside_prefix_shrinks_both_views() {
        let mut pool = CandidatePool::from_palette(&even_palette(), 6);
        let before_prominent = pool.prominent().len();
        let before_all = pool.all().len();
        pool.take(0);
        assert_eq!(pool.prominent().len(), before_prominent - 1);
        assert_eq!(pool.all().len(), before_all - 1);
    }

    #[test]
    fn take_outside_prefix_leaves_prominent_view() {
        let mut pool = CandidatePool::from_palette(&even_palette(), 4);
        let before_prominent = pool.prominent().len();
        pool.take(pool.all().len() - 1);
        assert_eq!(pool.prominent().len(), before_prominent);
        assert_eq!(pool.all().len(), PALETTE_LEN - 1);
    }

    #[test]
    fn prominent_indices_are_full_view_indices() {
        let mut pool = CandidatePool::from_palette(&even_palette(), 6);
        let c = pool.prominent()[2];
        let taken = pool.take(2);
        assert_eq!(taken.color, c.color);
    }

    #[test]
    fn pool_caches_hsl() {
        let pool = CandidatePool::from_palette(&even_palette(), 4);
        for c in pool.all() {
            assert_eq!(c.hsl, c.color.to_hsl());
        }
    }

    #[test]
    fn error_messages_name_the_problem() {
        let msg = PaletteError::WrongLen(3).to_string();
        assert!(msg.contains("12") && msg.contains('3'), "{msg}");
    }
}
