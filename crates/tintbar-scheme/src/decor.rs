#![forbid(unsafe_code)]

//! Decoration pass: bar border, menu border, and the derived
//! highlights.
//!
//! Runs after the role selector has consumed the four background/accent
//! roles, over whatever candidates remain. Unlike the role selector this
//! is a sort-and-accept policy: no cost model, no tiered bounds.

use tracing::debug;

use tintbar_color::Rgb;

use crate::palette::Candidate;
use crate::profile::{DecorTargets, Mode};

/// Mix fraction used to derive highlight colors from border picks.
const HIGHLIGHT_MIX: f64 = 0.25;

/// Saturation/lightness boost applied to a neon fallback pick still
/// under the neon floor.
const NEON_BOOST: f64 = 1.2;

/// The bar-border pick: index into the pool, plus whether it came from
/// the scored fallback (only fallback picks are eligible for the neon
/// boost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BarBorderPick {
    pub index: usize,
    pub from_fallback: bool,
}

/// Pick the bar border from the remaining pool.
///
/// Dark mode sorts by lightness descending (the lightest leftover makes
/// the border); light mode by saturation descending (the most colorful
/// one does). With `neon` enabled, the first sorted candidate with
/// saturation above the floor and lightness inside the band wins;
/// otherwise the fallback minimizes `1.25·|l − target| − s`.
pub(crate) fn select_bar_border(
    pool: &[Candidate],
    mode: Mode,
    decor: &DecorTargets,
    neon: bool,
) -> BarBorderPick {
    debug_assert!(!pool.is_empty(), "decoration needs at least one candidate");

    let mut order: Vec<usize> = (0..pool.len()).collect();
    match mode {
        Mode::Dark => order.sort_by(|&a, &b| pool[b].hsl.l.total_cmp(&pool[a].hsl.l)),
        Mode::Light => order.sort_by(|&a, &b| pool[b].hsl.s.total_cmp(&pool[a].hsl.s)),
    }

    if !neon {
        return BarBorderPick { index: order[0], from_fallback: false };
    }

    for &index in &order {
        let c = &pool[index];
        if c.hsl.s > decor.neon_sat_floor
            && (decor.neon_light_low..=decor.neon_light_high).contains(&c.hsl.l)
        {
            debug!(index, "neon bar border accepted");
            return BarBorderPick { index, from_fallback: false };
        }
    }

    let mut best = order[0];
    let mut best_score = f64::INFINITY;
    for (index, c) in pool.iter().enumerate() {
        let score = 1.25 * (c.hsl.l - decor.border_light_target).abs() - c.hsl.s;
        if score < best_score {
            best = index;
            best_score = score;
        }
    }
    debug!(index = best, "neon bar border fell back to scored pick");
    BarBorderPick { index: best, from_fallback: true }
}

/// Boost a fallback pick's saturation and lightness by a fixed 20%,
/// applied when the pick still sits under the neon floor.
pub(crate) fn boost_neon(color: Rgb) -> Rgb {
    let hsl = color.to_hsl();
    hsl.with_saturation((hsl.s * NEON_BOOST).min(1.0))
        .with_lightness((hsl.l * NEON_BOOST).min(1.0))
        .to_rgb()
}

/// Pick the menu border: literally the lightest (light mode) or darkest
/// (dark mode) remaining candidate, no scoring.
pub(crate) fn select_menu_border(pool: &[Candidate], mode: Mode) -> usize {
    debug_assert!(!pool.is_empty(), "decoration needs at least one candidate");
    let extreme = match mode {
        Mode::Light => pool
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.hsl.l.total_cmp(&b.hsl.l)),
        Mode::Dark => pool
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.hsl.l.total_cmp(&b.hsl.l)),
    };
    extreme.map(|(i, _)| i).unwrap_or(0)
}

/// Derive a highlight from a border pick: toward white on a dark shell,
/// toward black on a light one.
pub(crate) fn derive_highlight(border: Rgb, mode: Mode) -> Rgb {
    match mode {
        Mode::Dark => border.tint(HIGHLIGHT_MIX),
        Mode::Light => border.shade(HIGHLIGHT_MIX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ThemeKind, ThemeProfile};

    fn candidate(r: u8, g: u8, b: u8) -> Candidate {
        let color = Rgb::new(r, g, b);
        Candidate { color, hsl: color.to_hsl(), weight: 8.0 }
    }

    fn decor() -> DecorTargets {
        ThemeProfile::resolve(ThemeKind::Dark, Mode::Dark).decor
    }

    #[test]
    fn dark_mode_without_neon_takes_lightest() {
        let pool = [candidate(30, 30, 30), candidate(220, 220, 220), candidate(120, 120, 120)];
        let pick = select_bar_border(&pool, Mode::Dark, &decor(), false);
        assert_eq!(pick.index, 1);
        assert!(!pick.from_fallback);
    }

    #[test]
    fn light_mode_without_neon_takes_most_saturated() {
        let pool = [candidate(140, 140, 140), candidate(240, 30, 30), candidate(180, 160, 160)];
        let pick = select_bar_border(&pool, Mode::Light, &decor(), false);
        assert_eq!(pick.index, 1);
    }

    #[test]
    fn neon_accepts_first_banded_saturated_candidate() {
        // Saturated and mid-light: passes the Dark-theme neon rule
        // (floor 0.62, band [0.35, 0.75]).
        let pool = [candidate(245, 245, 245), candidate(220, 40, 170)];
        let pick = select_bar_border(&pool, Mode::Dark, &decor(), true);
        assert_eq!(pick.index, 1);
        assert!(!pick.from_fallback);
    }

    #[test]
    fn neon_falls_back_to_scored_pick_when_none_qualify() {
        // All washed out: nothing passes the floor.
        let pool = [candidate(240, 240, 240), candidate(150, 150, 160), candidate(40, 40, 44)];
        let pick = select_bar_border(&pool, Mode::Dark, &decor(), true);
        assert!(pick.from_fallback);
        // Scored winner: closest to the lightness target with the most
        // saturation. (150,150,160) has l ≈ 0.61 near target 0.65.
        assert_eq!(pick.index, 1);
    }

    #[test]
    fn boost_raises_saturation_and_lightness() {
        let dull = Rgb::new(120, 100, 100);
        let boosted = boost_neon(dull).to_hsl();
        let before = dull.to_hsl();
        assert!(boosted.s > before.s);
        assert!(boosted.l > before.l);
    }

    #[test]
    fn boost_saturates_at_one() {
        let vivid = Rgb::new(255, 0, 0);
        let boosted = boost_neon(vivid).to_hsl();
        assert!(boosted.s <= 1.0 && boosted.l <= 1.0);
    }

    #[test]
    fn menu_border_takes_lightness_extremes() {
        let pool = [candidate(30, 30, 30), candidate(220, 220, 220), candidate(120, 120, 120)];
        assert_eq!(select_menu_border(&pool, Mode::Light), 1);
        assert_eq!(select_menu_border(&pool, Mode::Dark), 0);
    }

    #[test]
    fn highlight_brightens_on_dark_shell_and_darkens_on_light() {
        let border = Rgb::new(100, 120, 140);
        assert!(derive_highlight(border, Mode::Dark).hsp() > border.hsp());
        assert!(derive_highlight(border, Mode::Light).hsp() < border.hsp());
    }
}
