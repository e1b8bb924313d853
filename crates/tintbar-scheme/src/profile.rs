#![forbid(unsafe_code)]

//! Theme profiles: the per-theme numeric constants driving selection and
//! refinement.
//!
//! Each theme kind defines one complete, disjoint table. The values are
//! design constants, not computed; `ThemeProfile::resolve` is a lookup
//! followed by a small set of mode-keyed overrides (bar targets and the
//! prominent-pool floor), applied last so the override always wins.
//!
//! Bounds come in strict/close pairs: the selector's preferred tier uses
//! the strict bounds, its fallback tier the `*_close` ones. Every strict
//! window nests inside its close window; the tests pin that relation for
//! all four tables.

/// Theme kind selecting one constant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThemeKind {
    /// Palette colors applied with minimal correction.
    TrueColor,
    /// Dark chrome surfaces, vivid accent.
    Dark,
    /// Light chrome surfaces, restrained saturation.
    Light,
    /// Soft mid-lightness surfaces, muted accent.
    Pastel,
}

impl ThemeKind {
    /// All theme kinds, in table order.
    pub const ALL: [ThemeKind; 4] = [
        ThemeKind::TrueColor,
        ThemeKind::Dark,
        ThemeKind::Light,
        ThemeKind::Pastel,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ThemeKind::TrueColor => "True Color",
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Pastel => "Pastel",
        }
    }

    /// Whether this theme family keeps the darker of the two menu
    /// surfaces as the primary one.
    #[must_use]
    pub const fn prefers_dark_primary(self) -> bool {
        matches!(self, ThemeKind::TrueColor | ThemeKind::Dark)
    }
}

/// Light/dark mode of the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Dark shell chrome.
    Dark,
    /// Light shell chrome.
    Light,
}

/// Per-role selection bounds and targets.
///
/// Lightness and saturation are [0,1]; prominence is palette weight in
/// percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleTargets {
    /// Strict lightness window.
    pub light_low: f64,
    pub light_high: f64,
    /// Fallback lightness window; always contains the strict one.
    pub light_low_close: f64,
    pub light_high_close: f64,
    /// Strict saturation ceiling.
    pub sat_high: f64,
    /// Fallback saturation ceiling.
    pub sat_high_close: f64,
    /// Scoring targets.
    pub light_target: f64,
    pub sat_target: f64,
    /// Strict minimum prominence (weight percent).
    pub prom_low: f64,
    /// Fallback minimum prominence.
    pub prom_low_close: f64,
}

/// Cost-model weights for one role. Lower total cost wins.
///
/// `cost = -prominence·weight + sat_dev·|s − s*| + light_dev·|l − l*|
///        + proximity·penalty + contrast_dev·|C* − C|`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Reward per weight percent (k1).
    pub prominence: f64,
    /// Penalty per unit saturation deviation from target (k2).
    pub sat_dev: f64,
    /// Penalty per unit lightness deviation from target (k3).
    pub light_dev: f64,
    /// Penalty scale for candidates near an already-chosen role (k4).
    pub proximity: f64,
    /// Penalty per unit contrast-ratio deviation from target (k5).
    pub contrast_dev: f64,
}

/// Inter-role windows a candidate must satisfy against every
/// already-chosen color, plus the contrast target the cost model aims
/// for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairBounds {
    /// CIEDE2000 window.
    pub delta_low: f64,
    pub delta_high: f64,
    /// Contrast-ratio window.
    pub contrast_low: f64,
    pub contrast_high: f64,
    /// Contrast the cost model steers toward.
    pub contrast_target: f64,
}

/// Post-selection clamp window for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineWindow {
    /// Lightness window.
    pub light_min: f64,
    pub light_max: f64,
    /// Saturation window.
    pub sat_min: f64,
    pub sat_max: f64,
    /// Do-not-desaturate floor: refinement never drags saturation below
    /// this once the color had at least this much.
    pub sat_dnd_min: f64,
}

/// Decoration-pass constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorTargets {
    /// Minimum saturation for the neon acceptance rule.
    pub neon_sat_floor: f64,
    /// Lightness band for the neon acceptance rule.
    pub neon_light_low: f64,
    pub neon_light_high: f64,
    /// Lightness the neon fallback score steers toward.
    pub border_light_target: f64,
}

/// The full constant bundle for one (theme, mode) derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeProfile {
    /// Minimum prominent-prefix size.
    pub prominent_min: usize,
    pub accent: RoleTargets,
    pub menu: RoleTargets,
    pub sub_menu: RoleTargets,
    pub bar: RoleTargets,
    pub accent_weights: ScoreWeights,
    pub menu_weights: ScoreWeights,
    pub sub_menu_weights: ScoreWeights,
    pub bar_weights: ScoreWeights,
    /// Menu background vs accent.
    pub menu_pair: PairBounds,
    /// Sub-menu background vs accent and menu.
    pub sub_menu_pair: PairBounds,
    /// Bar background vs accent and menu.
    pub bar_pair: PairBounds,
    pub accent_refine: RefineWindow,
    pub menu_refine: RefineWindow,
    pub sub_menu_refine: RefineWindow,
    /// How far the accent is pushed out of the background band when it
    /// collides perceptually.
    pub evade_push: f64,
    pub decor: DecorTargets,
}

/// True Color: accept nearly anything, steer gently.
const TRUE_COLOR: ThemeProfile = ThemeProfile {
    prominent_min: 4,
    accent: RoleTargets {
        light_low: 0.18,
        light_high: 0.85,
        light_low_close: 0.08,
        light_high_close: 0.95,
        sat_high: 1.0,
        sat_high_close: 1.0,
        light_target: 0.50,
        sat_target: 0.80,
        prom_low: 6.0,
        prom_low_close: 2.0,
    },
    menu: RoleTargets {
        light_low: 0.05,
        light_high: 0.92,
        light_low_close: 0.02,
        light_high_close: 0.97,
        sat_high: 1.0,
        sat_high_close: 1.0,
        light_target: 0.30,
        sat_target: 0.50,
        prom_low: 8.0,
        prom_low_close: 3.0,
    },
    sub_menu: RoleTargets {
        light_low: 0.05,
        light_high: 0.92,
        light_low_close: 0.02,
        light_high_close: 0.97,
        sat_high: 1.0,
        sat_high_close: 1.0,
        light_target: 0.40,
        sat_target: 0.50,
        prom_low: 6.0,
        prom_low_close: 2.0,
    },
    bar: RoleTargets {
        light_low: 0.02,
        light_high: 0.95,
        light_low_close: 0.0,
        light_high_close: 1.0,
        sat_high: 1.0,
        sat_high_close: 1.0,
        light_target: 0.25,
        sat_target: 0.45,
        prom_low: 4.0,
        prom_low_close: 0.0,
    },
    accent_weights: ScoreWeights {
        prominence: 0.55,
        sat_dev: 24.0,
        light_dev: 18.0,
        proximity: 0.0,
        contrast_dev: 0.0,
    },
    menu_weights: ScoreWeights {
        prominence: 0.70,
        sat_dev: 10.0,
        light_dev: 14.0,
        proximity: 16.0,
        contrast_dev: 2.0,
    },
    sub_menu_weights: ScoreWeights {
        prominence: 0.60,
        sat_dev: 10.0,
        light_dev: 14.0,
        proximity: 16.0,
        contrast_dev: 2.5,
    },
    bar_weights: ScoreWeights {
        prominence: 0.45,
        sat_dev: 8.0,
        light_dev: 12.0,
        proximity: 12.0,
        contrast_dev: 2.0,
    },
    menu_pair: PairBounds {
        delta_low: 25.0,
        delta_high: 150.0,
        contrast_low: 1.20,
        contrast_high: 15.0,
        contrast_target: 4.5,
    },
    sub_menu_pair: PairBounds {
        delta_low: 18.0,
        delta_high: 150.0,
        contrast_low: 1.10,
        contrast_high: 15.0,
        contrast_target: 2.5,
    },
    bar_pair: PairBounds {
        delta_low: 12.0,
        delta_high: 150.0,
        contrast_low: 1.05,
        contrast_high: 21.0,
        contrast_target: 3.0,
    },
    // Windows are present for completeness; True Color derivations skip
    // the refiner's window pass entirely.
    accent_refine: RefineWindow {
        light_min: 0.0,
        light_max: 1.0,
        sat_min: 0.0,
        sat_max: 1.0,
        sat_dnd_min: 0.0,
    },
    menu_refine: RefineWindow {
        light_min: 0.0,
        light_max: 1.0,
        sat_min: 0.0,
        sat_max: 1.0,
        sat_dnd_min: 0.0,
    },
    sub_menu_refine: RefineWindow {
        light_min: 0.0,
        light_max: 1.0,
        sat_min: 0.0,
        sat_max: 1.0,
        sat_dnd_min: 0.0,
    },
    evade_push: 0.10,
    decor: DecorTargets {
        neon_sat_floor: 0.55,
        neon_light_low: 0.35,
        neon_light_high: 0.80,
        border_light_target: 0.60,
    },
};

/// Dark: deep surfaces, vivid accent held well clear of them.
const DARK: ThemeProfile = ThemeProfile {
    prominent_min: 5,
    accent: RoleTargets {
        light_low: 0.30,
        light_high: 0.80,
        light_low_close: 0.18,
        light_high_close: 0.90,
        sat_high: 0.95,
        sat_high_close: 1.0,
        light_target: 0.58,
        sat_target: 0.75,
        prom_low: 5.0,
        prom_low_close: 1.5,
    },
    menu: RoleTargets {
        light_low: 0.04,
        light_high: 0.30,
        light_low_close: 0.02,
        light_high_close: 0.45,
        sat_high: 0.45,
        sat_high_close: 0.60,
        light_target: 0.14,
        sat_target: 0.22,
        prom_low: 8.0,
        prom_low_close: 2.0,
    },
    sub_menu: RoleTargets {
        light_low: 0.06,
        light_high: 0.38,
        light_low_close: 0.03,
        light_high_close: 0.50,
        sat_high: 0.50,
        sat_high_close: 0.65,
        light_target: 0.20,
        sat_target: 0.25,
        prom_low: 6.0,
        prom_low_close: 1.5,
    },
    bar: RoleTargets {
        light_low: 0.02,
        light_high: 0.35,
        light_low_close: 0.0,
        light_high_close: 0.55,
        sat_high: 0.55,
        sat_high_close: 0.75,
        light_target: 0.10,
        sat_target: 0.30,
        prom_low: 3.0,
        prom_low_close: 0.0,
    },
    accent_weights: ScoreWeights {
        prominence: 0.50,
        sat_dev: 28.0,
        light_dev: 22.0,
        proximity: 0.0,
        contrast_dev: 0.0,
    },
    menu_weights: ScoreWeights {
        prominence: 0.80,
        sat_dev: 12.0,
        light_dev: 20.0,
        proximity: 18.0,
        contrast_dev: 3.0,
    },
    sub_menu_weights: ScoreWeights {
        prominence: 0.65,
        sat_dev: 12.0,
        light_dev: 18.0,
        proximity: 18.0,
        contrast_dev: 3.5,
    },
    bar_weights: ScoreWeights {
        prominence: 0.45,
        sat_dev: 8.0,
        light_dev: 16.0,
        proximity: 12.0,
        contrast_dev: 2.0,
    },
    menu_pair: PairBounds {
        delta_low: 40.0,
        delta_high: 140.0,
        contrast_low: 2.2,
        contrast_high: 14.0,
        contrast_target: 5.5,
    },
    sub_menu_pair: PairBounds {
        delta_low: 18.0,
        delta_high: 120.0,
        contrast_low: 1.15,
        contrast_high: 9.0,
        contrast_target: 1.6,
    },
    bar_pair: PairBounds {
        delta_low: 12.0,
        delta_high: 130.0,
        contrast_low: 1.08,
        contrast_high: 16.0,
        contrast_target: 2.0,
    },
    accent_refine: RefineWindow {
        light_min: 0.42,
        light_max: 0.72,
        sat_min: 0.35,
        sat_max: 0.90,
        sat_dnd_min: 0.12,
    },
    menu_refine: RefineWindow {
        light_min: 0.07,
        light_max: 0.24,
        sat_min: 0.04,
        sat_max: 0.38,
        sat_dnd_min: 0.05,
    },
    sub_menu_refine: RefineWindow {
        light_min: 0.10,
        light_max: 0.30,
        sat_min: 0.04,
        sat_max: 0.42,
        sat_dnd_min: 0.05,
    },
    evade_push: 0.16,
    decor: DecorTargets {
        neon_sat_floor: 0.62,
        neon_light_low: 0.35,
        neon_light_high: 0.75,
        border_light_target: 0.65,
    },
};

/// Light: bright surfaces, saturation kept in check.
const LIGHT: ThemeProfile = ThemeProfile {
    prominent_min: 6,
    accent: RoleTargets {
        light_low: 0.25,
        light_high: 0.70,
        light_low_close: 0.15,
        light_high_close: 0.82,
        sat_high: 0.95,
        sat_high_close: 1.0,
        light_target: 0.46,
        sat_target: 0.70,
        prom_low: 5.0,
        prom_low_close: 1.5,
    },
    menu: RoleTargets {
        light_low: 0.70,
        light_high: 0.97,
        light_low_close: 0.55,
        light_high_close: 1.0,
        sat_high: 0.40,
        sat_high_close: 0.55,
        light_target: 0.88,
        sat_target: 0.12,
        prom_low: 8.0,
        prom_low_close: 2.0,
    },
    sub_menu: RoleTargets {
        light_low: 0.62,
        light_high: 0.94,
        light_low_close: 0.50,
        light_high_close: 1.0,
        sat_high: 0.45,
        sat_high_close: 0.60,
        light_target: 0.80,
        sat_target: 0.15,
        prom_low: 6.0,
        prom_low_close: 1.5,
    },
    bar: RoleTargets {
        light_low: 0.55,
        light_high: 0.98,
        light_low_close: 0.40,
        light_high_close: 1.0,
        sat_high: 0.50,
        sat_high_close: 0.70,
        light_target: 0.92,
        sat_target: 0.10,
        prom_low: 3.0,
        prom_low_close: 0.0,
    },
    accent_weights: ScoreWeights {
        prominence: 0.50,
        sat_dev: 26.0,
        light_dev: 22.0,
        proximity: 0.0,
        contrast_dev: 0.0,
    },
    menu_weights: ScoreWeights {
        prominence: 0.80,
        sat_dev: 14.0,
        light_dev: 20.0,
        proximity: 18.0,
        contrast_dev: 3.0,
    },
    sub_menu_weights: ScoreWeights {
        prominence: 0.65,
        sat_dev: 14.0,
        light_dev: 18.0,
        proximity: 18.0,
        contrast_dev: 3.5,
    },
    bar_weights: ScoreWeights {
        prominence: 0.45,
        sat_dev: 10.0,
        light_dev: 16.0,
        proximity: 12.0,
        contrast_dev: 2.0,
    },
    menu_pair: PairBounds {
        delta_low: 40.0,
        delta_high: 140.0,
        contrast_low: 2.2,
        contrast_high: 14.0,
        contrast_target: 5.5,
    },
    sub_menu_pair: PairBounds {
        delta_low: 18.0,
        delta_high: 120.0,
        contrast_low: 1.15,
        contrast_high: 9.0,
        contrast_target: 1.5,
    },
    bar_pair: PairBounds {
        delta_low: 12.0,
        delta_high: 130.0,
        contrast_low: 1.08,
        contrast_high: 16.0,
        contrast_target: 1.8,
    },
    accent_refine: RefineWindow {
        light_min: 0.34,
        light_max: 0.62,
        sat_min: 0.30,
        sat_max: 0.85,
        sat_dnd_min: 0.12,
    },
    menu_refine: RefineWindow {
        light_min: 0.74,
        light_max: 0.95,
        sat_min: 0.02,
        sat_max: 0.30,
        sat_dnd_min: 0.03,
    },
    sub_menu_refine: RefineWindow {
        light_min: 0.66,
        light_max: 0.90,
        sat_min: 0.03,
        sat_max: 0.35,
        sat_dnd_min: 0.03,
    },
    evade_push: 0.14,
    decor: DecorTargets {
        neon_sat_floor: 0.55,
        neon_light_low: 0.30,
        neon_light_high: 0.68,
        border_light_target: 0.40,
    },
};

/// Pastel: soft mid-lightness surfaces, muted accent.
const PASTEL: ThemeProfile = ThemeProfile {
    prominent_min: 5,
    accent: RoleTargets {
        light_low: 0.45,
        light_high: 0.85,
        light_low_close: 0.32,
        light_high_close: 0.92,
        sat_high: 0.62,
        sat_high_close: 0.75,
        light_target: 0.68,
        sat_target: 0.42,
        prom_low: 5.0,
        prom_low_close: 1.5,
    },
    menu: RoleTargets {
        light_low: 0.30,
        light_high: 0.75,
        light_low_close: 0.20,
        light_high_close: 0.88,
        sat_high: 0.45,
        sat_high_close: 0.58,
        light_target: 0.55,
        sat_target: 0.28,
        prom_low: 8.0,
        prom_low_close: 2.0,
    },
    sub_menu: RoleTargets {
        light_low: 0.35,
        light_high: 0.82,
        light_low_close: 0.25,
        light_high_close: 0.92,
        sat_high: 0.50,
        sat_high_close: 0.62,
        light_target: 0.62,
        sat_target: 0.30,
        prom_low: 6.0,
        prom_low_close: 1.5,
    },
    bar: RoleTargets {
        light_low: 0.25,
        light_high: 0.85,
        light_low_close: 0.12,
        light_high_close: 0.95,
        sat_high: 0.55,
        sat_high_close: 0.70,
        light_target: 0.48,
        sat_target: 0.30,
        prom_low: 3.0,
        prom_low_close: 0.0,
    },
    accent_weights: ScoreWeights {
        prominence: 0.50,
        sat_dev: 24.0,
        light_dev: 20.0,
        proximity: 0.0,
        contrast_dev: 0.0,
    },
    menu_weights: ScoreWeights {
        prominence: 0.75,
        sat_dev: 14.0,
        light_dev: 18.0,
        proximity: 16.0,
        contrast_dev: 2.5,
    },
    sub_menu_weights: ScoreWeights {
        prominence: 0.60,
        sat_dev: 14.0,
        light_dev: 16.0,
        proximity: 16.0,
        contrast_dev: 3.0,
    },
    bar_weights: ScoreWeights {
        prominence: 0.45,
        sat_dev: 10.0,
        light_dev: 14.0,
        proximity: 12.0,
        contrast_dev: 2.0,
    },
    menu_pair: PairBounds {
        delta_low: 32.0,
        delta_high: 140.0,
        contrast_low: 1.6,
        contrast_high: 12.0,
        contrast_target: 3.5,
    },
    sub_menu_pair: PairBounds {
        delta_low: 16.0,
        delta_high: 120.0,
        contrast_low: 1.10,
        contrast_high: 8.0,
        contrast_target: 1.4,
    },
    bar_pair: PairBounds {
        delta_low: 12.0,
        delta_high: 130.0,
        contrast_low: 1.05,
        contrast_high: 14.0,
        contrast_target: 1.6,
    },
    accent_refine: RefineWindow {
        light_min: 0.52,
        light_max: 0.80,
        sat_min: 0.22,
        sat_max: 0.58,
        sat_dnd_min: 0.10,
    },
    menu_refine: RefineWindow {
        light_min: 0.38,
        light_max: 0.70,
        sat_min: 0.08,
        sat_max: 0.42,
        sat_dnd_min: 0.05,
    },
    sub_menu_refine: RefineWindow {
        light_min: 0.44,
        light_max: 0.78,
        sat_min: 0.08,
        sat_max: 0.46,
        sat_dnd_min: 0.05,
    },
    evade_push: 0.12,
    decor: DecorTargets {
        neon_sat_floor: 0.40,
        neon_light_low: 0.45,
        neon_light_high: 0.85,
        border_light_target: 0.70,
    },
};

impl ThemeProfile {
    /// Look up the constant bundle for a theme kind, then apply the
    /// mode-keyed bar-evade and prominent-floor overrides.
    #[must_use]
    pub fn resolve(kind: ThemeKind, mode: Mode) -> Self {
        let mut profile = match kind {
            ThemeKind::TrueColor => TRUE_COLOR,
            ThemeKind::Dark => DARK,
            ThemeKind::Light => LIGHT,
            ThemeKind::Pastel => PASTEL,
        };

        // Bar-evade: the bar background follows the shell mode, whatever
        // the theme kind says. Applied last; last write wins. Both ends
        // of the window move so it never inverts.
        match mode {
            Mode::Dark => {
                profile.bar.light_low = profile.bar.light_low.min(0.05);
                profile.bar.light_low_close = profile.bar.light_low_close.min(0.02);
                profile.bar.light_high = profile.bar.light_high.min(0.60);
                profile.bar.light_high_close = profile.bar.light_high_close.min(0.75);
                profile.bar.light_target = profile.bar.light_target.min(0.30);
            }
            Mode::Light => {
                profile.bar.light_low = profile.bar.light_low.max(0.40);
                profile.bar.light_low_close = profile.bar.light_low_close.max(0.25);
                profile.bar.light_high = profile.bar.light_high.max(0.95);
                profile.bar.light_high_close = 1.0;
                profile.bar.light_target = profile.bar.light_target.max(0.70);
                // Light derivations always see a wider accent pool.
                profile.prominent_min = profile.prominent_min.max(5);
            }
        }

        profile
    }
}
