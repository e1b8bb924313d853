//! Property-based invariant tests for scheme derivation.
//!
//! Verifies the engine's end-to-end guarantees over arbitrary valid
//! palettes:
//!
//! 1. Derivation is deterministic
//! 2. Derivation is total: every role assigned for every kind and mode
//! 3. Every returned color formats as a valid hex triple
//! 4. Surface ordering follows the theme family (dark-primary families
//!    end with the darker menu surface, light-primary with the lighter)
//! 5. Palette validation accepts exactly what derivation consumes
//! 6. The accent override is honored verbatim under True Color when it
//!    stays clear of the derived surfaces

use proptest::prelude::*;
use tintbar_color::delta_e_2000;
use tintbar_scheme::{
    Mode, Palette, Rgb, SchemeOptions, ThemeKind, WeightedColor, derive,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_palette() -> impl Strategy<Value = Palette> {
    proptest::collection::vec((any::<u8>(), any::<u8>(), any::<u8>(), 1u32..=1000), 12).prop_map(
        |raw| {
            let total: f64 = raw.iter().map(|&(_, _, _, w)| f64::from(w)).sum();
            let entries = raw
                .into_iter()
                .map(|(r, g, b, w)| {
                    WeightedColor::new(Rgb::new(r, g, b), f64::from(w) * 100.0 / total)
                })
                .collect();
            Palette::new(entries).expect("normalized weights sum to 100")
        },
    )
}

fn arb_kind() -> impl Strategy<Value = ThemeKind> {
    prop_oneof![
        Just(ThemeKind::TrueColor),
        Just(ThemeKind::Dark),
        Just(ThemeKind::Light),
        Just(ThemeKind::Pastel),
    ]
}

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Dark), Just(Mode::Light)]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Derivation is deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derivation_deterministic(
        palette in arb_palette(),
        kind in arb_kind(),
        mode in arb_mode(),
        neon in any::<bool>(),
    ) {
        let options = SchemeOptions::new(kind, mode).with_neon(neon);
        let first = derive(&palette, &options);
        let second = derive(&palette, &options);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Derivation is total: every role assigned for every kind and mode
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derivation_total(palette in arb_palette()) {
        for kind in ThemeKind::ALL {
            for mode in [Mode::Dark, Mode::Light] {
                let scheme = derive(&palette, &SchemeOptions::new(kind, mode));
                prop_assert_eq!(scheme.roles().len(), 8, "{:?}/{:?}", kind, mode);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Every returned color formats as a valid hex triple
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn roles_format_as_valid_hex(
        palette in arb_palette(),
        kind in arb_kind(),
        mode in arb_mode(),
    ) {
        let scheme = derive(&palette, &SchemeOptions::new(kind, mode));
        for (name, color) in scheme.roles() {
            prop_assert_eq!(
                Rgb::from_hex(&color.to_hex()),
                Some(color),
                "role {} produced unparseable hex",
                name
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Surface ordering follows the theme family
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn surface_ordering_follows_family(
        palette in arb_palette(),
        mode in arb_mode(),
    ) {
        for kind in ThemeKind::ALL {
            let scheme = derive(&palette, &SchemeOptions::new(kind, mode));
            let menu = scheme.menu_bg.hsp();
            let sub = scheme.sub_menu_bg.hsp();
            if kind.prefers_dark_primary() {
                prop_assert!(
                    menu <= sub,
                    "{:?}: menu hsp {} > sub-menu hsp {}",
                    kind, menu, sub
                );
            } else {
                prop_assert!(
                    menu >= sub,
                    "{:?}: menu hsp {} < sub-menu hsp {}",
                    kind, menu, sub
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Palette validation accepts exactly what derivation consumes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn palette_round_trips_through_entries(palette in arb_palette()) {
        let rebuilt = Palette::new(palette.entries().to_vec()).expect("entries stay valid");
        prop_assert_eq!(rebuilt, palette);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Accent override honored verbatim under True Color when clear of
//    the surfaces
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn true_color_override_verbatim_when_clear(
        palette in arb_palette(),
        mode in arb_mode(),
    ) {
        // A saturated red is a long way from most derived surfaces; the
        // property only applies when no evasion was needed.
        let override_color = Rgb::new(230, 40, 40);
        let options = SchemeOptions::new(ThemeKind::TrueColor, mode)
            .with_accent_override(override_color);
        let scheme = derive(&palette, &options);
        let clear = delta_e_2000(override_color, scheme.menu_bg) >= 25.0
            && delta_e_2000(override_color, scheme.sub_menu_bg) >= 25.0;
        if clear {
            prop_assert_eq!(scheme.accent, override_color);
        }
    }
}
