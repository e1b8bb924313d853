#![forbid(unsafe_code)]

//! Post-selection refinement: pull each chosen color toward its theme
//! window, keep garish hue bands in check, collapse unstable
//! near-achromatics, and keep the roles perceptually apart.
//!
//! # Invariants
//!
//! 1. Refinement never changes hue except through the achromatic
//!    collapse, which discards it entirely.
//! 2. A color inside its window moves toward the window midpoint, never
//!    past it.
//! 3. Surface separation and accent evasion only fire when the measured
//!    ΔE00 is under their thresholds; distant colors pass through
//!    untouched.
//! 4. `order_surfaces` leaves the darker color in the primary slot for
//!    dark-primary theme families and the lighter one otherwise,
//!    whatever order the selector produced.

use tracing::debug;

use tintbar_color::{Hsl, Rgb, delta_e_2000};

use crate::profile::{RefineWindow, ThemeKind};

/// Fraction of the distance toward the window midpoint applied to
/// in-window values.
const IN_WINDOW_REGRESS: f64 = 0.35;

/// Fraction of the distance toward the window minimum applied to values
/// under it. Values over the maximum are clamped instead.
const BELOW_MIN_BLEND: f64 = 0.65;

/// Hue bands (degrees) that get an extra saturation ceiling: vivid
/// greens and hot pinks dominate chrome surfaces at saturations other
/// hues wear fine.
const GREEN_BAND: (f64, f64) = (130.0, 160.0);
const PINK_BAND: (f64, f64) = (290.0, 330.0);

/// Saturation ceiling at a band's center; relaxes linearly to 1.0 at
/// the band edge.
const BAND_CEILING_MIN: f64 = 0.65;

/// Pre-adjustment thresholds under which a color collapses to gray:
/// amplifying a near-zero HSL component would manufacture an arbitrary
/// hue.
const ACHROMATIC_SAT: f64 = 0.08;
const BLACK_LIGHT: f64 = 0.04;
const NEAR_BLACK_LIGHT: f64 = 0.10;
const NEAR_BLACK_SAT: f64 = 0.20;

/// Menu/sub-menu surfaces closer than this are pushed apart.
const SURFACE_SEPARATION: f64 = 30.0;
/// Maximum tint/shade fraction used by the surface push.
const SURFACE_PUSH: f64 = 0.30;

/// Accent closer than this to either background gets evaded outward.
const ACCENT_EVADE: f64 = 25.0;
/// Fraction of the evade push applied past the nearer band edge when
/// the accent sits inside the background band.
const INSIDE_BAND_PUSH: f64 = 0.5;

/// HSP threshold classifying a chrome surface as light for the swap
/// rule. Deliberately higher than the 127.5 used for plain light/dark
/// bucketing; the two call sites are not unified.
const ROLE_SWAP_HSP: f64 = 155.0;

/// Clamp-or-regress one HSL component into its window.
fn adjust_component(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        value + (min - value) * BELOW_MIN_BLEND
    } else if value > max {
        max
    } else {
        let mid = (min + max) / 2.0;
        value + (mid - value) * IN_WINDOW_REGRESS
    }
}

/// Extra saturation ceiling when `hue_deg` falls in a guarded band.
fn band_ceiling(hue_deg: f64, band: (f64, f64)) -> Option<f64> {
    let (low, high) = band;
    if !(low..=high).contains(&hue_deg) {
        return None;
    }
    let center = (low + high) / 2.0;
    let half_width = (high - low) / 2.0;
    let distance = (hue_deg - center).abs() / half_width;
    Some(BAND_CEILING_MIN + (1.0 - BAND_CEILING_MIN) * distance)
}

fn apply_band_ceilings(hue_deg: f64, saturation: f64) -> f64 {
    let mut s = saturation;
    for band in [GREEN_BAND, PINK_BAND] {
        if let Some(ceiling) = band_ceiling(hue_deg, band) {
            s = s.min(ceiling);
        }
    }
    s
}

/// Whether the *pre-adjustment* color is too achromatic or too dark for
/// its hue to be trusted after amplification.
fn collapses_to_gray(original: Hsl) -> bool {
    original.s < ACHROMATIC_SAT
        || original.l < BLACK_LIGHT
        || (original.l < NEAR_BLACK_LIGHT && original.s < NEAR_BLACK_SAT)
}

fn gray_from(adjusted: Rgb, kind: ThemeKind) -> Rgb {
    // Dark-family themes collapse toward the darkest adjusted channel,
    // light-family toward the brightest. Preserved asymmetry.
    let v = if kind.prefers_dark_primary() {
        adjusted.r.min(adjusted.g).min(adjusted.b)
    } else {
        adjusted.r.max(adjusted.g).max(adjusted.b)
    };
    Rgb::new(v, v, v)
}

/// Refine one selected color toward its theme window.
///
/// True Color derivations skip this entirely; the caller owns that
/// decision.
pub(crate) fn refine_role(color: Rgb, window: &RefineWindow, kind: ThemeKind) -> Rgb {
    let original = color.to_hsl();

    let l = adjust_component(original.l, window.light_min, window.light_max);
    let s = if original.s < window.sat_dnd_min {
        // Never amplify a saturation that was essentially absent.
        original.s
    } else {
        adjust_component(original.s, window.sat_min, window.sat_max).max(window.sat_dnd_min)
    };
    let s = apply_band_ceilings(original.hue_degrees(), s);

    let adjusted = Hsl::new(original.h, s, l).to_rgb();
    if collapses_to_gray(original) {
        let gray = gray_from(adjusted, kind);
        debug!(from = %color.to_hex(), to = %gray.to_hex(), "achromatic collapse");
        gray
    } else {
        adjusted
    }
}

/// Push the menu and sub-menu surfaces apart when they are perceptually
/// too close: the lighter one toward white, the darker toward black,
/// proportionally to the deficit.
pub(crate) fn separate_surfaces(a: Rgb, b: Rgb) -> (Rgb, Rgb) {
    let d = delta_e_2000(a, b);
    if d >= SURFACE_SEPARATION {
        return (a, b);
    }
    let amount = SURFACE_PUSH * (SURFACE_SEPARATION - d) / SURFACE_SEPARATION;
    debug!(delta = d, amount, "separating menu surfaces");
    if a.hsp() >= b.hsp() {
        (a.tint(amount), b.shade(amount))
    } else {
        (a.shade(amount), b.tint(amount))
    }
}

/// Move one component out of the `[low, high]` band spanned by the two
/// backgrounds. The three sub-cases use different formulas: a fixed
/// offset further out when already below or above the band, and a jump
/// past the nearer edge when inside it.
fn push_out_of_band(value: f64, low: f64, high: f64, push: f64) -> f64 {
    if value < low {
        (value - push).max(0.0)
    } else if value > high {
        (value + push).min(1.0)
    } else if value - low <= high - value {
        (low - push * INSIDE_BAND_PUSH).max(0.0)
    } else {
        (high + push * INSIDE_BAND_PUSH).min(1.0)
    }
}

/// Evade the accent out of the lightness/saturation band spanned by the
/// two backgrounds when it is perceptually close to either.
pub(crate) fn evade_backgrounds(accent: Rgb, menu: Rgb, sub_menu: Rgb, push: f64) -> Rgb {
    let d = delta_e_2000(accent, menu).min(delta_e_2000(accent, sub_menu));
    if d >= ACCENT_EVADE {
        return accent;
    }
    let m = menu.to_hsl();
    let s = sub_menu.to_hsl();
    let a = accent.to_hsl();
    let l = push_out_of_band(a.l, m.l.min(s.l), m.l.max(s.l), push);
    let sat = push_out_of_band(a.s, m.s.min(s.s), m.s.max(s.s), push);
    let evaded = Hsl::new(a.h, sat, l).to_rgb();
    debug!(delta = d, from = %accent.to_hex(), to = %evaded.to_hex(), "accent evading backgrounds");
    evaded
}

/// Order the two menu surfaces per the theme family's preference:
/// dark-primary families keep the darker color as the primary surface,
/// light-primary families the lighter.
///
/// Surfaces are classified light/dark at [`ROLE_SWAP_HSP`]; when both
/// fall on the same side the raw HSP ordering decides, so the preferred
/// ordering always holds on return.
pub(crate) fn order_surfaces(menu: Rgb, sub_menu: Rgb, kind: ThemeKind) -> (Rgb, Rgb) {
    let menu_hsp = menu.hsp();
    let sub_hsp = sub_menu.hsp();
    let menu_light = menu_hsp > ROLE_SWAP_HSP;
    let sub_light = sub_hsp > ROLE_SWAP_HSP;

    let swap = if menu_light != sub_light {
        if kind.prefers_dark_primary() { menu_light } else { sub_light }
    } else if kind.prefers_dark_primary() {
        menu_hsp > sub_hsp
    } else {
        menu_hsp < sub_hsp
    };

    if swap {
        debug!(?kind, "swapping menu surfaces");
        (sub_menu, menu)
    } else {
        (menu, sub_menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Mode, ThemeKind, ThemeProfile};

    fn dark_menu_window() -> RefineWindow {
        ThemeProfile::resolve(ThemeKind::Dark, Mode::Dark).menu_refine
    }

    #[test]
    fn in_window_value_regresses_toward_midpoint() {
        let v = adjust_component(0.2, 0.0, 1.0);
        // 35% of the way from 0.2 to 0.5.
        assert!((v - 0.305).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn above_max_clamps_exactly() {
        assert_eq!(adjust_component(0.9, 0.1, 0.4), 0.4);
    }

    #[test]
    fn below_min_blends_without_reaching() {
        let v = adjust_component(0.0, 0.2, 0.4);
        assert!((v - 0.13).abs() < 1e-9, "got {v}");
        assert!(v < 0.2);
    }

    #[test]
    fn midpoint_is_a_fixed_point() {
        let v = adjust_component(0.25, 0.1, 0.4);
        assert!((v - 0.25).abs() < 1e-9);
    }

    #[test]
    fn band_ceiling_tightest_at_center() {
        let center = band_ceiling(145.0, GREEN_BAND).unwrap();
        let edge = band_ceiling(159.0, GREEN_BAND).unwrap();
        assert!((center - BAND_CEILING_MIN).abs() < 1e-9);
        assert!(edge > center);
        assert_eq!(band_ceiling(200.0, GREEN_BAND), None);
        assert!(band_ceiling(310.0, PINK_BAND).is_some());
    }

    #[test]
    fn refine_never_changes_hue_of_chromatic_colors() {
        let window = dark_menu_window();
        let color = Rgb::new(40, 90, 160);
        let before = color.to_hsl();
        let after = refine_role(color, &window, ThemeKind::Dark).to_hsl();
        assert!((before.h - after.h).abs() < 0.01, "{} -> {}", before.h, after.h);
    }

    #[test]
    fn near_black_collapses_to_gray() {
        let window = dark_menu_window();
        // Lightness ~0.02 with some nominal saturation: the hue is
        // numerically meaningless.
        let refined = refine_role(Rgb::new(8, 3, 5), &window, ThemeKind::Dark);
        assert_eq!(refined.r, refined.g);
        assert_eq!(refined.g, refined.b);
    }

    #[test]
    fn collapse_direction_follows_theme_family() {
        let dark_window = dark_menu_window();
        let light_window = ThemeProfile::resolve(ThemeKind::Light, Mode::Light).menu_refine;
        let near_gray = Rgb::new(120, 124, 128);
        let dark = refine_role(near_gray, &dark_window, ThemeKind::Dark);
        let light = refine_role(near_gray, &light_window, ThemeKind::Light);
        assert_eq!(dark.r, dark.g);
        assert_eq!(light.r, light.g);
        // Min-channel vs max-channel collapse: the light-family gray is
        // never darker than the dark-family one for the same input.
        assert!(light.r >= dark.r);
    }

    #[test]
    fn dnd_floor_blocks_saturation_amplification() {
        let window = RefineWindow {
            light_min: 0.2,
            light_max: 0.8,
            sat_min: 0.3,
            sat_max: 0.9,
            sat_dnd_min: 0.1,
        };
        // Original saturation 0.05 sits under the floor: it must not be
        // pulled up toward sat_min.
        let muted = Hsl::new(0.6, 0.05, 0.5).to_rgb();
        let refined = refine_role(muted, &window, ThemeKind::Dark).to_hsl();
        assert!(refined.s < 0.3, "saturation was amplified to {}", refined.s);
    }

    #[test]
    fn distant_surfaces_pass_through_unchanged() {
        let a = Rgb::new(20, 20, 30);
        let b = Rgb::new(230, 230, 240);
        assert_eq!(separate_surfaces(a, b), (a, b));
    }

    #[test]
    fn close_surfaces_are_pushed_apart() {
        let a = Rgb::new(100, 100, 110);
        let b = Rgb::new(104, 104, 114);
        let before = delta_e_2000(a, b);
        let (a2, b2) = separate_surfaces(a, b);
        let after = delta_e_2000(a2, b2);
        assert!(after > before, "{after} <= {before}");
        // Lighter went lighter, darker went darker.
        assert!(b2.hsp() >= b.hsp());
        assert!(a2.hsp() <= a.hsp());
    }

    #[test]
    fn push_out_of_band_has_three_distinct_cases() {
        // Below: fixed offset down.
        assert!((push_out_of_band(0.10, 0.3, 0.6, 0.2) - 0.0).abs() < 1e-9);
        // Above: fixed offset up.
        assert!((push_out_of_band(0.70, 0.3, 0.6, 0.2) - 0.9).abs() < 1e-9);
        // Inside, nearer the low edge: jump past it by half the push.
        assert!((push_out_of_band(0.35, 0.3, 0.6, 0.2) - 0.2).abs() < 1e-9);
        // Inside, nearer the high edge: jump past that one instead.
        assert!((push_out_of_band(0.55, 0.3, 0.6, 0.2) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn distant_accent_is_not_evaded() {
        let accent = Rgb::new(230, 80, 40);
        let menu = Rgb::new(25, 28, 36);
        let sub = Rgb::new(40, 44, 56);
        assert_eq!(evade_backgrounds(accent, menu, sub, 0.16), accent);
    }

    #[test]
    fn colliding_accent_moves_away_from_surfaces() {
        let menu = Rgb::new(60, 60, 70);
        let sub = Rgb::new(70, 70, 82);
        // Accent nearly on top of the menu surface.
        let accent = Rgb::new(62, 62, 74);
        let evaded = evade_backgrounds(accent, menu, sub, 0.16);
        assert_ne!(evaded, accent);
        let before = delta_e_2000(accent, menu).min(delta_e_2000(accent, sub));
        let after = delta_e_2000(evaded, menu).min(delta_e_2000(evaded, sub));
        assert!(after > before, "{after} <= {before}");
    }

    #[test]
    fn dark_family_keeps_darker_surface_primary() {
        let darker = Rgb::new(30, 30, 40);
        let lighter = Rgb::new(210, 210, 220);
        for kind in [ThemeKind::Dark, ThemeKind::TrueColor] {
            assert_eq!(order_surfaces(lighter, darker, kind), (darker, lighter), "{kind:?}");
            assert_eq!(order_surfaces(darker, lighter, kind), (darker, lighter), "{kind:?}");
        }
    }

    #[test]
    fn light_family_keeps_lighter_surface_primary() {
        let darker = Rgb::new(30, 30, 40);
        let lighter = Rgb::new(210, 210, 220);
        for kind in [ThemeKind::Light, ThemeKind::Pastel] {
            assert_eq!(order_surfaces(lighter, darker, kind), (lighter, darker), "{kind:?}");
            assert_eq!(order_surfaces(darker, lighter, kind), (lighter, darker), "{kind:?}");
        }
    }

    #[test]
    fn swap_resolves_same_class_surfaces_by_raw_hsp() {
        // Both dark (HSP < 155): ordering still follows the family rule.
        let a = Rgb::new(40, 40, 40);
        let b = Rgb::new(90, 90, 90);
        assert_eq!(order_surfaces(b, a, ThemeKind::Dark), (a, b));
        assert_eq!(order_surfaces(a, b, ThemeKind::Light), (b, a));
    }
}
